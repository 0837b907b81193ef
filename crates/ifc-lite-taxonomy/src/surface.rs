// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Surfaces used as face bases

use crate::{GeomItem, Matrix4};

/// Unbounded plane, the local xy plane of its placement
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Plane {
    pub geom: GeomItem,
}

impl Plane {
    pub fn new(matrix: Matrix4) -> Self {
        Self {
            geom: GeomItem::with_matrix(matrix),
        }
    }
}
