// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Curve variant family
//!
//! Curves carry their placement in the shared [`GeomItem`] matrix. Only the
//! shape parameters the kernel needs are stored here; evaluation is left to
//! the consumer.

use crate::{GeomItem, Item, Matrix4, Point3};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Unbounded straight line along the local x axis
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Line {
    pub geom: GeomItem,
}

impl Line {
    pub fn new(matrix: Matrix4) -> Self {
        Self {
            geom: GeomItem::with_matrix(matrix),
        }
    }
}

/// Circle in the local xy plane
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Circle {
    pub geom: GeomItem,
    pub radius: f64,
}

impl Circle {
    pub fn new(matrix: Matrix4, radius: f64) -> Self {
        Self {
            geom: GeomItem::with_matrix(matrix),
            radius,
        }
    }
}

/// Ellipse in the local xy plane
///
/// `radius` is the semi-axis along local x, `radius2` along local y.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ellipse {
    pub geom: GeomItem,
    pub radius: f64,
    pub radius2: f64,
}

impl Ellipse {
    pub fn new(matrix: Matrix4, radius: f64, radius2: f64) -> Self {
        Self {
            geom: GeomItem::with_matrix(matrix),
            radius,
            radius2,
        }
    }
}

/// B-spline curve; control data stays with the producer
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BSplineCurve {
    pub geom: GeomItem,
}

/// One end of a trimmed span
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrimBound {
    /// Explicit spatial bound
    Point(Point3),
    /// Parameter value along the basis curve
    Parameter(f64),
}

impl TrimBound {
    pub fn as_point(&self) -> Option<&Point3> {
        match self {
            TrimBound::Point(p) => Some(p),
            TrimBound::Parameter(_) => None,
        }
    }

    pub fn as_parameter(&self) -> Option<f64> {
        match self {
            TrimBound::Point(_) => None,
            TrimBound::Parameter(t) => Some(*t),
        }
    }
}

impl Default for TrimBound {
    fn default() -> Self {
        TrimBound::Parameter(0.0)
    }
}

impl From<Point3> for TrimBound {
    fn from(point: Point3) -> Self {
        TrimBound::Point(point)
    }
}

impl From<f64> for TrimBound {
    fn from(parameter: f64) -> Self {
        TrimBound::Parameter(parameter)
    }
}

/// Bounded span of an unbounded basis curve
///
/// `start` and `end` are stored in basis-parameter order. Traversal
/// direction is recorded separately in `orientation_2`, which reversal
/// toggles; the bounds themselves are never swapped.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrimmedCurve {
    pub geom: GeomItem,
    pub start: TrimBound,
    pub end: TrimBound,
    /// Shared, read-only handle to the untrimmed curve
    pub basis: Option<Arc<Item>>,
    /// Sense agreement with the basis (composite curve segment semantics)
    pub orientation_2: Option<bool>,
}

impl TrimmedCurve {
    /// Trim `basis` between two bounds
    pub fn new(basis: Item, start: impl Into<TrimBound>, end: impl Into<TrimBound>) -> Self {
        Self {
            basis: Some(Arc::new(basis)),
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    /// Trim a basis that is already shared with other curves
    pub fn with_shared_basis(
        basis: Arc<Item>,
        start: impl Into<TrimBound>,
        end: impl Into<TrimBound>,
    ) -> Self {
        Self {
            basis: Some(basis),
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    /// Borrow the basis curve
    pub fn basis(&self) -> Option<&Item> {
        self.basis.as_deref()
    }

    /// Mutable basis access; detaches from other holders first
    pub fn basis_mut(&mut self) -> Option<&mut Item> {
        self.basis.as_mut().map(Arc::make_mut)
    }

    /// Whether traversal follows the basis parameterisation
    pub fn same_sense(&self) -> bool {
        self.orientation_2.unwrap_or(true)
    }

    pub(crate) fn reverse(&mut self) {
        self.orientation_2 = Some(!self.same_sense());
    }
}

impl Default for TrimmedCurve {
    fn default() -> Self {
        Self {
            geom: GeomItem::default(),
            start: TrimBound::default(),
            end: TrimBound::default(),
            basis: None,
            orientation_2: Some(true),
        }
    }
}

/// Trimmed curve used as a BREP boundary edge
///
/// Same shape as [`TrimmedCurve`] with its own kind, so loops and shells
/// can tell boundary edges from standalone bounded curves.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge(pub TrimmedCurve);

impl Edge {
    pub fn new(basis: Item, start: impl Into<TrimBound>, end: impl Into<TrimBound>) -> Self {
        Self(TrimmedCurve::new(basis, start, end))
    }

    /// Straight edge between two points
    pub fn segment(start: Point3, end: Point3) -> Self {
        Self(TrimmedCurve {
            start: start.into(),
            end: end.into(),
            basis: Some(Arc::new(Item::Line(Line::default()))),
            ..TrimmedCurve::default()
        })
    }

    pub fn into_inner(self) -> TrimmedCurve {
        self.0
    }
}

impl Deref for Edge {
    type Target = TrimmedCurve;

    fn deref(&self) -> &TrimmedCurve {
        &self.0
    }
}

impl DerefMut for Edge {
    fn deref_mut(&mut self) -> &mut TrimmedCurve {
        &mut self.0
    }
}

impl From<TrimmedCurve> for Edge {
    fn from(curve: TrimmedCurve) -> Self {
        Edge(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_bounds() {
        let curve = TrimmedCurve::new(
            Item::Circle(Circle::new(Matrix4::identity(), 2.0)),
            Point3::new(2.0, 0.0, 0.0),
            std::f64::consts::FRAC_PI_2,
        );

        assert!(curve.start.as_point().is_some());
        assert_eq!(curve.end.as_parameter(), Some(std::f64::consts::FRAC_PI_2));
        assert!(curve.same_sense());
    }

    #[test]
    fn test_reverse_toggles_sense_not_bounds() {
        let mut curve = TrimmedCurve::new(Item::Line(Line::default()), 0.0, 1.0);
        curve.reverse();

        assert_eq!(curve.orientation_2, Some(false));
        assert_eq!(curve.start.as_parameter(), Some(0.0));
        assert_eq!(curve.end.as_parameter(), Some(1.0));

        curve.reverse();
        assert_eq!(curve.orientation_2, Some(true));
    }

    #[test]
    fn test_basis_copy_on_write() {
        let circle = Item::Circle(Circle::new(Matrix4::identity(), 1.0));
        let original = TrimmedCurve::new(circle, 0.0, 1.0);
        let mut copy = original.clone();

        if let Some(Item::Circle(circle)) = copy.basis_mut() {
            circle.radius = 5.0;
        }

        match (original.basis(), copy.basis()) {
            (Some(Item::Circle(a)), Some(Item::Circle(b))) => {
                assert_eq!(a.radius, 1.0);
                assert_eq!(b.radius, 5.0);
            }
            _ => panic!("basis should stay a circle"),
        }
    }
}
