// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appearance values attached to geometry

use crate::provenance::same_provenance;
use crate::Provenance;
use nalgebra::Vector3;

/// RGB colour, components nominally in 0.0-1.0, no alpha
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Colour {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    pub components: Vector3<f64>,
}

impl Colour {
    /// Create a colour
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            instance: None,
            components: Vector3::new(r, g, b),
        }
    }

    pub fn r(&self) -> f64 {
        self.components.x
    }

    pub fn g(&self) -> f64 {
        self.components.y
    }

    pub fn b(&self) -> f64 {
        self.components.z
    }

    /// Convert to an RGBA array as used by render buffers
    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r() as f32, self.g() as f32, self.b() as f32, alpha]
    }
}

/// Surface style
///
/// Equality compares the provenance instance, not the values: two styles
/// with identical colours that come from different schema entities are
/// unequal. Use the canonical ordering for value-based deduplication.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Style {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    pub name: Option<String>,
    pub diffuse: Option<Colour>,
    pub specular: Option<Colour>,
    pub specularity: Option<f64>,
    pub transparency: Option<f64>,
}

impl Style {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named style
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attach a provenance handle
    pub fn with_instance(mut self, instance: Provenance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Set the diffuse colour
    pub fn with_diffuse(mut self, colour: Colour) -> Self {
        self.diffuse = Some(colour);
        self
    }

    /// Set the specular colour
    pub fn with_specular(mut self, colour: Colour) -> Self {
        self.specular = Some(colour);
        self
    }

    /// Check whether no appearance value is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.diffuse.is_none()
            && self.specular.is_none()
            && self.specularity.is_none()
            && self.transparency.is_none()
    }

    /// Render colour with transparency folded into alpha
    pub fn rgba(&self) -> Option<[f32; 4]> {
        let alpha = 1.0 - self.transparency.unwrap_or(0.0) as f32;
        self.diffuse.as_ref().map(|c| c.to_rgba(alpha))
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        same_provenance(&self.instance, &other.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SourceEntity;

    #[test]
    fn test_style_equality_is_identity() {
        let red = Colour::new(1.0, 0.0, 0.0);
        let a = Style::named("brick")
            .with_diffuse(red.clone())
            .with_instance(SourceEntity::new(10, "IFCSURFACESTYLE").into());
        let b = Style::named("brick")
            .with_diffuse(red)
            .with_instance(SourceEntity::new(11, "IFCSURFACESTYLE").into());

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_style_rgba() {
        let mut style = Style::new().with_diffuse(Colour::new(0.5, 0.25, 1.0));
        style.transparency = Some(0.75);
        assert_eq!(style.rgba(), Some([0.5, 0.25, 1.0, 0.25]));
        assert!(Style::new().is_empty());
    }
}
