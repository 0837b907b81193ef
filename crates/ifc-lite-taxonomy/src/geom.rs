// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State shared by every geometric node

use crate::{Matrix4, Provenance, Style};

/// Common geometric node state
///
/// The local transform composes with the transforms of all ancestors to
/// place the node in model space.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeomItem {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    pub matrix: Matrix4,
    pub surface_style: Style,
    pub orientation: Option<bool>,
}

impl GeomItem {
    /// Untransformed, unstyled node state
    pub fn new() -> Self {
        Self::default()
    }

    /// Node state with a local transform
    pub fn with_matrix(matrix: Matrix4) -> Self {
        Self {
            matrix,
            ..Self::default()
        }
    }

    /// Node state traced back to a source instance
    pub fn with_instance(instance: Provenance) -> Self {
        Self {
            instance: Some(instance),
            ..Self::default()
        }
    }
}
