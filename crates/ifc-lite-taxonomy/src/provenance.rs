// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Provenance handles linking taxonomy nodes back to schema entities
//!
//! The taxonomy never interprets a source instance. It only stores the handle
//! and asks it for a textual description when printing debug traces.

use std::fmt;
use std::sync::Arc;

/// Opaque source instance supplied by a file-schema parser
///
/// Implementations must be thread-safe so that finished trees can be handed
/// to a consumer on another thread.
pub trait SourceInstance: Send + Sync {
    /// Human-readable description used in debug traces
    fn describe(&self) -> String;
}

/// Shared, read-only handle to a source instance
///
/// Cloning a `Provenance` yields another handle to the same instance.
/// Equality is identity of the instance, never its contents.
#[derive(Clone)]
pub struct Provenance(Arc<dyn SourceInstance>);

impl Provenance {
    /// Wrap a source instance
    pub fn new(instance: impl SourceInstance + 'static) -> Self {
        Self(Arc::new(instance))
    }

    /// Wrap an already shared source instance
    pub fn from_arc(instance: Arc<dyn SourceInstance>) -> Self {
        Self(instance)
    }

    /// Description of the underlying instance
    pub fn describe(&self) -> String {
        self.0.describe()
    }

    /// Check whether two handles point at the same instance
    pub fn same_instance(&self, other: &Provenance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Provenance {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for Provenance {}

impl fmt::Debug for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Provenance").field(&self.describe()).finish()
    }
}

/// Identity of two optional provenance handles
///
/// Two absent handles are considered the same (neither node was traced).
pub(crate) fn same_provenance(a: &Option<Provenance>, b: &Option<Provenance>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_instance(b),
        (None, None) => true,
        _ => false,
    }
}

/// Minimal source instance: a STEP entity id plus its type name
///
/// Producers that do not want to hand their decoded entities to the
/// taxonomy can attach this instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceEntity {
    /// STEP instance id (`#123` becomes 123)
    pub id: u32,
    /// Schema type name, e.g. `IFCEXTRUDEDAREASOLID`
    pub type_name: String,
}

impl SourceEntity {
    /// Create a new source entity description
    pub fn new(id: u32, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for SourceEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}={}", self.id, self.type_name.to_uppercase())
    }
}

impl SourceInstance for SourceEntity {
    fn describe(&self) -> String {
        self.to_string()
    }
}

impl From<SourceEntity> for Provenance {
    fn from(entity: SourceEntity) -> Self {
        Provenance::new(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entity_description() {
        let entity = SourceEntity::new(42, "IfcTrimmedCurve");
        assert_eq!(entity.describe(), "#42=IFCTRIMMEDCURVE");
    }

    #[test]
    fn test_provenance_identity() {
        let a = Provenance::new(SourceEntity::new(1, "IFCSTYLEDITEM"));
        let b = Provenance::new(SourceEntity::new(1, "IFCSTYLEDITEM"));
        let a2 = a.clone();

        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert!(same_provenance(&None, &None));
        assert!(!same_provenance(&Some(a), &None));
    }
}
