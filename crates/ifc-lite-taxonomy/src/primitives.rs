// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometric leaf primitives: transforms, points and directions

use crate::Provenance;
use nalgebra::Vector3;

/// Structural category of an affine transform
///
/// This is a cached hint set by the producer, never re-derived from the
/// matrix. Consumers may use it to skip orthonormalisation or scale
/// decomposition, but must not treat it as authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AffineTag {
    /// Exactly the identity transform
    #[default]
    Identity,
    /// Rotation and translation only
    AffineWithoutScale,
    /// Rotation, translation and a uniform scale
    AffineWithUniformScale,
    /// Rotation, translation and a non-uniform scale
    AffineWithNonUniformScale,
    /// Anything else (including caller-supplied matrices)
    Other,
}

impl AffineTag {
    /// Check whether the transform is known to carry no scale component
    pub fn is_scale_free(self) -> bool {
        matches!(self, AffineTag::Identity | AffineTag::AffineWithoutScale)
    }
}

/// 4x4 affine transform with a classification tag
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Matrix4 {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    components: nalgebra::Matrix4<f64>,
    /// Producer-supplied structural hint
    pub tag: AffineTag,
}

impl Matrix4 {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            instance: None,
            components: nalgebra::Matrix4::identity(),
            tag: AffineTag::Identity,
        }
    }

    /// Explicit matrix, tagged `Other`
    ///
    /// The bottom row is forced to `(0, 0, 0, 1)`.
    pub fn from_matrix(components: nalgebra::Matrix4<f64>) -> Self {
        Self::with_tag(components, AffineTag::Other)
    }

    /// Explicit matrix with a producer-chosen tag
    ///
    /// The bottom row is forced to `(0, 0, 0, 1)`.
    pub fn with_tag(mut components: nalgebra::Matrix4<f64>, tag: AffineTag) -> Self {
        let bottom = [0.0, 0.0, 0.0, 1.0];
        if (0..4).any(|col| components[(3, col)] != bottom[col]) {
            log::debug!("normalising non-affine bottom row of transform");
            for (col, value) in bottom.iter().enumerate() {
                components[(3, col)] = *value;
            }
        }

        Self {
            instance: None,
            components,
            tag,
        }
    }

    /// Placement from an origin, a z axis and an x reference direction
    ///
    /// Columns are `[X Y Z origin]` with `X = |x|`, `Z = |z|` and
    /// `Y = |z × x|`. Always tagged `AffineWithoutScale`.
    pub fn from_axes(origin: &Point3, z_axis: &Direction3, x_axis: &Direction3) -> Self {
        let o = origin.components;
        let x = x_axis.components.normalize();
        let y = z_axis.components.cross(&x_axis.components).normalize();
        let z = z_axis.components.normalize();

        #[rustfmt::skip]
        let components = nalgebra::Matrix4::new(
            x.x, y.x, z.x, o.x,
            x.y, y.y, z.y, o.y,
            x.z, y.z, z.z, o.z,
            0.0, 0.0, 0.0, 1.0,
        );

        Self {
            instance: None,
            components,
            tag: AffineTag::AffineWithoutScale,
        }
    }

    /// Attach a provenance handle
    pub fn with_instance(mut self, instance: Provenance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Underlying matrix
    pub fn components(&self) -> &nalgebra::Matrix4<f64> {
        &self.components
    }

    /// Translation column
    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(
            self.components[(0, 3)],
            self.components[(1, 3)],
            self.components[(2, 3)],
        )
    }

    /// Check the matrix contents against the identity (ignores the tag)
    pub fn is_identity(&self) -> bool {
        self.components == nalgebra::Matrix4::identity()
    }

    /// Compose `self * other` (other is expressed in this frame)
    ///
    /// The tag degrades to the weaker of the two hints.
    pub fn compose(&self, other: &Matrix4) -> Matrix4 {
        let tag = match (self.tag, other.tag) {
            (AffineTag::Identity, t) | (t, AffineTag::Identity) => t,
            (a, b) => a.max(b),
        };

        Matrix4 {
            instance: None,
            components: self.components * other.components,
            tag,
        }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<nalgebra::Matrix4<f64>> for Matrix4 {
    fn from(components: nalgebra::Matrix4<f64>) -> Self {
        Self::from_matrix(components)
    }
}

/// Cartesian point in model space
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point3 {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    pub components: Vector3<f64>,
}

impl Point3 {
    /// Create a point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            instance: None,
            components: Vector3::new(x, y, z),
        }
    }

    /// Attach a provenance handle
    pub fn with_instance(mut self, instance: Provenance) -> Self {
        self.instance = Some(instance);
        self
    }

    pub fn x(&self) -> f64 {
        self.components.x
    }

    pub fn y(&self) -> f64 {
        self.components.y
    }

    pub fn z(&self) -> f64 {
        self.components.z
    }
}

/// Direction vector, conventionally (not necessarily) of unit length
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Direction3 {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub instance: Option<Provenance>,
    pub components: Vector3<f64>,
}

impl Direction3 {
    /// Create a direction; the input is stored as given
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            instance: None,
            components: Vector3::new(x, y, z),
        }
    }

    /// Attach a provenance handle
    pub fn with_instance(mut self, instance: Provenance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Euclidean length of the stored vector
    pub fn length(&self) -> f64 {
        self.components.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        let m = Matrix4::default();
        assert_eq!(m.tag, AffineTag::Identity);
        assert!(m.is_identity());
    }

    #[test]
    fn test_from_axes_canonical_frame() {
        let m = Matrix4::from_axes(
            &Point3::new(0.0, 0.0, 0.0),
            &Direction3::new(0.0, 0.0, 1.0),
            &Direction3::new(1.0, 0.0, 0.0),
        );
        assert_eq!(m.tag, AffineTag::AffineWithoutScale);
        assert_relative_eq!(*m.components(), nalgebra::Matrix4::identity());
    }

    #[test]
    fn test_from_axes_normalises_and_translates() {
        let m = Matrix4::from_axes(
            &Point3::new(1.0, 2.0, 3.0),
            &Direction3::new(0.0, 0.0, 5.0),
            &Direction3::new(0.0, 2.0, 0.0),
        );
        let c = m.components();

        // X = +Y world, Z = +Z world, Y = Z x X = -X world
        assert_relative_eq!(c[(1, 0)], 1.0);
        assert_relative_eq!(c[(0, 1)], -1.0);
        assert_relative_eq!(c[(2, 2)], 1.0);
        assert_relative_eq!(m.translation(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(c.row(3).iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_explicit_matrix_bottom_row() {
        let mut raw = nalgebra::Matrix4::identity();
        raw[(3, 0)] = 7.0;
        raw[(3, 3)] = 2.0;
        let m = Matrix4::from_matrix(raw);

        assert_eq!(m.tag, AffineTag::Other);
        assert_eq!(m.components()[(3, 0)], 0.0);
        assert_eq!(m.components()[(3, 3)], 1.0);
    }

    #[test]
    fn test_compose_tags() {
        let a = Matrix4::identity();
        let b = Matrix4::with_tag(
            nalgebra::Matrix4::new_scaling(2.0),
            AffineTag::AffineWithUniformScale,
        );
        assert_eq!(a.compose(&b).tag, AffineTag::AffineWithUniformScale);

        let c = Matrix4::from_matrix(nalgebra::Matrix4::identity());
        assert_eq!(b.compose(&c).tag, AffineTag::Other);
    }

    #[test]
    fn test_scale_free_tags() {
        assert!(Matrix4::identity().tag.is_scale_free());
        let frame = Matrix4::from_axes(
            &Point3::new(1.0, 0.0, 0.0),
            &Direction3::new(0.0, 0.0, 1.0),
            &Direction3::new(1.0, 0.0, 0.0),
        );
        assert!(frame.tag.is_scale_free());
        assert!(!AffineTag::AffineWithUniformScale.is_scale_free());
        assert!(!AffineTag::AffineWithNonUniformScale.is_scale_free());
        assert!(!Matrix4::from_matrix(nalgebra::Matrix4::identity()).tag.is_scale_free());
    }

    #[test]
    fn test_direction_not_normalised() {
        let d = Direction3::new(0.0, 3.0, 4.0);
        assert_relative_eq!(d.length(), 5.0);
    }
}
