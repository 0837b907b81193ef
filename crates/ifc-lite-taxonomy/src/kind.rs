// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Kind catalogue and compile-time kind lookups
//!
//! The catalogue is closed: consumers are expected to switch over it
//! exhaustively, so adding a kind is a breaking change. The declaration
//! order is also the precedence used by the canonical ordering.

use crate::{
    BSplineCurve, BooleanResult, Circle, Collection, Colour, Direction3, Edge, Ellipse, Extrusion,
    Face, Item, Line, Loop, Matrix4, Node, Plane, Point3, Shell, Style, TrimmedCurve,
};
use rustc_hash::FxHashMap;
use std::fmt;

macro_rules! kind_catalogue {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Discriminator of a taxonomy node
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Kind {
            $($variant,)*
        }

        impl Kind {
            /// Every kind, in catalogue order
            pub const ALL: &'static [Kind] = &[$(Kind::$variant,)*];

            /// Lower-case name, also the first token of a printed block
            pub fn name(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)*
                }
            }

            /// Parse a kind from its name
            pub fn from_name(name: &str) -> Option<Kind> {
                match name {
                    $($name => Some(Kind::$variant),)*
                    _ => None,
                }
            }
        }

        $(
            impl TypeByKind<{ Kind::$variant as usize }> for Kinds {
                type Type = $variant;
            }
        )*
    };
}

kind_catalogue! {
    Matrix4 => "matrix4",
    Point3 => "point3",
    Direction3 => "direction3",
    Line => "line",
    Circle => "circle",
    Ellipse => "ellipse",
    BSplineCurve => "bspline_curve",
    TrimmedCurve => "trimmed_curve",
    Plane => "plane",
    Edge => "edge",
    Loop => "loop",
    Face => "face",
    Shell => "shell",
    Extrusion => "extrusion",
    Node => "node",
    Collection => "collection",
    BooleanResult => "boolean_result",
    Colour => "colour",
    Style => "style",
}

impl Kind {
    /// Number of kinds in the catalogue
    pub const COUNT: usize = Kind::ALL.len();

    /// Position in the catalogue
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at a catalogue position
    pub fn from_index(index: usize) -> Option<Kind> {
        Kind::ALL.get(index).copied()
    }

    /// Kinds that own an ordered child list
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Kind::Collection
                | Kind::Loop
                | Kind::Face
                | Kind::Shell
                | Kind::Node
                | Kind::BooleanResult
        )
    }

    /// Kinds listed in the curve lookup (see [`CurveByIndex`])
    pub fn is_curve(self) -> bool {
        Curves::KINDS.contains(&self)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marker for the kind-indexed type lookup
pub struct Kinds;

impl Kinds {
    /// One past the highest kind index
    pub const MAX: usize = Kind::COUNT;
}

/// Compile-time map from a kind index to its concrete type
///
/// ```
/// use ifc_lite_taxonomy::{Kind, Kinds, TypeByKind, Circle};
///
/// type T = <Kinds as TypeByKind<{ Kind::Circle as usize }>>::Type;
/// let c: T = Circle::default();
/// assert_eq!(c.radius, 0.0);
/// ```
pub trait TypeByKind<const N: usize> {
    type Type: crate::Concrete;
}

/// Marker for the curve lookup
pub struct Curves;

impl Curves {
    /// Curve-like kinds, in lookup order
    pub const KINDS: [Kind; 6] = [
        Kind::Line,
        Kind::Circle,
        Kind::Ellipse,
        Kind::BSplineCurve,
        Kind::Loop,
        Kind::Edge,
    ];

    /// One past the highest curve index
    pub const MAX: usize = Self::KINDS.len();
}

/// Compile-time map from a curve index to its concrete type
pub trait CurveByIndex<const N: usize> {
    type Type: crate::Concrete;
}

impl CurveByIndex<0> for Curves {
    type Type = Line;
}

impl CurveByIndex<1> for Curves {
    type Type = Circle;
}

impl CurveByIndex<2> for Curves {
    type Type = Ellipse;
}

impl CurveByIndex<3> for Curves {
    type Type = BSplineCurve;
}

impl CurveByIndex<4> for Curves {
    type Type = Loop;
}

impl CurveByIndex<5> for Curves {
    type Type = Edge;
}

/// Count the nodes of a tree by kind
///
/// Visits owned children, node representations, basis references and the
/// profile face of sweeps. Embedded values (transforms, styles, sweep
/// directions) are not counted.
pub fn census(root: &Item) -> FxHashMap<Kind, usize> {
    let mut counts = FxHashMap::default();
    count_item(root, &mut counts);
    counts
}

fn count_item(item: &Item, counts: &mut FxHashMap<Kind, usize>) {
    *counts.entry(item.kind()).or_insert(0) += 1;

    match item {
        Item::TrimmedCurve(c) => {
            if let Some(basis) = c.basis() {
                count_item(basis, counts);
            }
        }
        Item::Edge(e) => {
            if let Some(basis) = e.basis() {
                count_item(basis, counts);
            }
        }
        Item::Extrusion(e) => count_face(&e.basis, counts),
        Item::Face(f) => {
            if let Some(basis) = f.basis() {
                count_item(basis, counts);
            }
        }
        Item::Node(n) => {
            for rep in n.representations.values() {
                count_item(rep, counts);
            }
        }
        _ => {}
    }

    for child in item.children() {
        count_item(child, counts);
    }
}

fn count_face(face: &Face, counts: &mut FxHashMap<Kind, usize>) {
    *counts.entry(Kind::Face).or_insert(0) += 1;
    if let Some(basis) = face.basis() {
        count_item(basis, counts);
    }
    for child in &face.children {
        count_item(child, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Concrete, Matrix4};

    #[test]
    fn test_catalogue_roundtrip() {
        for (i, kind) in Kind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(Kind::from_index(i), Some(*kind));
            assert_eq!(Kind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(Kind::from_index(Kinds::MAX), None);
    }

    #[test]
    fn test_type_by_kind() {
        assert_eq!(
            <<Kinds as TypeByKind<{ Kind::Shell as usize }>>::Type as Concrete>::KIND,
            Kind::Shell
        );
        assert_eq!(
            <<Kinds as TypeByKind<{ Kind::Style as usize }>>::Type as Concrete>::KIND,
            Kind::Style
        );
    }

    #[test]
    fn test_curve_lookup() {
        assert_eq!(Curves::MAX, 6);
        assert_eq!(<<Curves as CurveByIndex<4>>::Type as Concrete>::KIND, Kind::Loop);
        assert_eq!(<<Curves as CurveByIndex<5>>::Type as Concrete>::KIND, Kind::Edge);
        assert!(Kind::Ellipse.is_curve());
        assert!(!Kind::TrimmedCurve.is_curve());
    }

    #[test]
    fn test_census() {
        let profile = Face::new(vec![Item::Loop(Loop::new(vec![Item::Edge(Edge::segment(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ))]))]);
        let solid = Extrusion::new(
            Matrix4::identity(),
            profile,
            Direction3::new(0.0, 0.0, 1.0),
            3.0,
        );
        let root = Item::Collection(Collection::with_children(vec![Item::Extrusion(solid)]));

        let counts = census(&root);
        assert_eq!(counts.get(&Kind::Collection), Some(&1));
        assert_eq!(counts.get(&Kind::Extrusion), Some(&1));
        assert_eq!(counts.get(&Kind::Face), Some(&1));
        assert_eq!(counts.get(&Kind::Loop), Some(&1));
        assert_eq!(counts.get(&Kind::Edge), Some(&1));
        assert_eq!(counts.get(&Kind::Line), Some(&1));
        assert_eq!(counts.get(&Kind::Direction3), None);
    }
}
