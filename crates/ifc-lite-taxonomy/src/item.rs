// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closed taxonomy item type
//!
//! [`Item`] is a sum type over the fixed kind catalogue. Consumers switch
//! over it (or over [`Item::kind`]) instead of inspecting types at runtime.
//! `Clone` is a deep copy: owned children are copied recursively and basis
//! handles are copy-on-write, so a clone never observes mutations of its
//! source.

use crate::{
    BSplineCurve, BooleanResult, Circle, Collection, Colour, Direction3, Edge, Ellipse, Error,
    Extrusion, Face, GeomItem, Kind, Line, Loop, Matrix4, Node, Plane, Point3, Provenance,
    Result, Shell, Style, TrimmedCurve,
};

/// Any taxonomy node
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Item {
    Matrix4(Matrix4),
    Point3(Point3),
    Direction3(Direction3),
    Line(Line),
    Circle(Circle),
    Ellipse(Ellipse),
    #[cfg_attr(feature = "serde", serde(rename = "bspline_curve"))]
    BSplineCurve(BSplineCurve),
    TrimmedCurve(TrimmedCurve),
    Plane(Plane),
    Edge(Edge),
    Loop(Loop),
    Face(Face),
    Shell(Shell),
    Extrusion(Extrusion),
    Node(Node),
    Collection(Collection),
    BooleanResult(BooleanResult),
    Colour(Colour),
    Style(Style),
}

/// Typed access to one concrete variant of [`Item`]
pub trait Concrete: Sized + Into<Item> {
    /// Kind of every value of this type
    const KIND: Kind;

    /// Borrow the concrete value if `item` has this kind
    fn from_item(item: &Item) -> Option<&Self>;

    /// Mutably borrow the concrete value if `item` has this kind
    fn from_item_mut(item: &mut Item) -> Option<&mut Self>;
}

macro_rules! concrete_items {
    ($($variant:ident),* $(,)?) => {
        impl Item {
            /// Immutable kind tag of this node
            pub fn kind(&self) -> Kind {
                match self {
                    $(Item::$variant(_) => Kind::$variant,)*
                }
            }
        }

        $(
            impl Concrete for $variant {
                const KIND: Kind = Kind::$variant;

                fn from_item(item: &Item) -> Option<&Self> {
                    match item {
                        Item::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn from_item_mut(item: &mut Item) -> Option<&mut Self> {
                    match item {
                        Item::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Item {
                fn from(value: $variant) -> Self {
                    Item::$variant(value)
                }
            }

            impl TryFrom<Item> for $variant {
                type Error = Item;

                fn try_from(item: Item) -> std::result::Result<Self, Item> {
                    match item {
                        Item::$variant(v) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

concrete_items!(
    Matrix4,
    Point3,
    Direction3,
    Line,
    Circle,
    Ellipse,
    BSplineCurve,
    TrimmedCurve,
    Plane,
    Edge,
    Loop,
    Face,
    Shell,
    Extrusion,
    Node,
    Collection,
    BooleanResult,
    Colour,
    Style,
);

impl Item {
    /// Borrow as a concrete type
    pub fn downcast_ref<T: Concrete>(&self) -> Option<&T> {
        T::from_item(self)
    }

    /// Mutably borrow as a concrete type
    pub fn downcast_mut<T: Concrete>(&mut self) -> Option<&mut T> {
        T::from_item_mut(self)
    }

    /// Shared geometric state, for every kind that has one
    pub fn geom(&self) -> Option<&GeomItem> {
        match self {
            Item::Line(c) => Some(&c.geom),
            Item::Circle(c) => Some(&c.geom),
            Item::Ellipse(c) => Some(&c.geom),
            Item::BSplineCurve(c) => Some(&c.geom),
            Item::TrimmedCurve(c) => Some(&c.geom),
            Item::Edge(c) => Some(&c.geom),
            Item::Plane(p) => Some(&p.geom),
            Item::Extrusion(e) => Some(&e.geom),
            other => other.as_collection().map(|c| &c.geom),
        }
    }

    /// Mutable shared geometric state
    pub fn geom_mut(&mut self) -> Option<&mut GeomItem> {
        match self {
            Item::Line(c) => Some(&mut c.geom),
            Item::Circle(c) => Some(&mut c.geom),
            Item::Ellipse(c) => Some(&mut c.geom),
            Item::BSplineCurve(c) => Some(&mut c.geom),
            Item::TrimmedCurve(c) => Some(&mut c.geom),
            Item::Edge(c) => Some(&mut c.geom),
            Item::Plane(p) => Some(&mut p.geom),
            Item::Extrusion(e) => Some(&mut e.geom),
            other => other.as_collection_mut().map(|c| &mut c.geom),
        }
    }

    /// Provenance handle, if the producer attached one
    pub fn instance(&self) -> Option<&Provenance> {
        match self {
            Item::Matrix4(m) => m.instance.as_ref(),
            Item::Point3(p) => p.instance.as_ref(),
            Item::Direction3(d) => d.instance.as_ref(),
            Item::Colour(c) => c.instance.as_ref(),
            Item::Style(s) => s.instance.as_ref(),
            other => other.geom().and_then(|g| g.instance.as_ref()),
        }
    }

    /// Attach or replace the provenance handle
    pub fn set_instance(&mut self, instance: Option<Provenance>) {
        match self {
            Item::Matrix4(m) => m.instance = instance,
            Item::Point3(p) => p.instance = instance,
            Item::Direction3(d) => d.instance = instance,
            Item::Colour(c) => c.instance = instance,
            Item::Style(s) => s.instance = instance,
            other => {
                if let Some(geom) = other.geom_mut() {
                    geom.instance = instance;
                }
            }
        }
    }

    /// Collection part of aggregate kinds
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Item::Collection(c) => Some(c),
            Item::Loop(l) => Some(&l.collection),
            Item::Face(f) => Some(&f.collection),
            Item::Shell(s) => Some(&s.collection),
            Item::Node(n) => Some(&n.collection),
            Item::BooleanResult(b) => Some(&b.collection),
            _ => None,
        }
    }

    /// Mutable collection part of aggregate kinds
    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Item::Collection(c) => Some(c),
            Item::Loop(l) => Some(&mut l.collection),
            Item::Face(f) => Some(&mut f.collection),
            Item::Shell(s) => Some(&mut s.collection),
            Item::Node(n) => Some(&mut n.collection),
            Item::BooleanResult(b) => Some(&mut b.collection),
            _ => None,
        }
    }

    /// Owned children in order; empty for non-aggregates
    pub fn children(&self) -> &[Item] {
        self.as_collection()
            .map(|c| c.children.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to the child list of an aggregate
    pub fn children_mut(&mut self) -> Option<&mut Vec<Item>> {
        self.as_collection_mut().map(|c| &mut c.children)
    }

    /// Check whether this node owns a child list
    pub fn is_aggregate(&self) -> bool {
        self.kind().is_aggregate()
    }

    /// Check whether [`Item::reverse`] would succeed on this subtree
    pub fn can_reverse(&self) -> bool {
        self.irreversible_kind().is_none()
    }

    /// First kind in this subtree (depth-first) without reversal semantics
    fn irreversible_kind(&self) -> Option<Kind> {
        match self {
            Item::TrimmedCurve(_) | Item::Edge(_) => None,
            other => match other.as_collection() {
                Some(c) => c.children.iter().find_map(Item::irreversible_kind),
                None => Some(other.kind()),
            },
        }
    }

    /// Flip topological orientation
    ///
    /// Aggregates reverse their child order and then reverse each child.
    /// Trimmed curves and edges toggle their `orientation_2` sense. Any
    /// other kind, anywhere in the subtree, fails with a topology error;
    /// the subtree is checked first so a failed call changes nothing.
    pub fn reverse(&mut self) -> Result<()> {
        if let Some(kind) = self.irreversible_kind() {
            log::debug!("refusing to reverse {}: subtree contains {}", self.kind(), kind);
            return Err(Error::not_reversible(kind));
        }

        self.reverse_unchecked();
        Ok(())
    }

    pub(crate) fn reverse_unchecked(&mut self) {
        match self {
            Item::TrimmedCurve(c) => c.reverse(),
            Item::Edge(e) => e.reverse(),
            other => {
                if let Some(c) = other.as_collection_mut() {
                    c.reverse_unchecked();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BooleanOp, SourceEntity};

    fn edge(t0: f64, t1: f64) -> Item {
        Item::Edge(Edge::new(Item::Line(Line::default()), t0, t1))
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Item::from(Line::default()).kind(), Kind::Line);
        assert_eq!(Item::from(Edge::default()).kind(), Kind::Edge);
        assert_eq!(Item::from(TrimmedCurve::default()).kind(), Kind::TrimmedCurve);
        assert_eq!(Item::from(Style::new()).kind(), Kind::Style);
    }

    #[test]
    fn test_try_from_returns_item_on_mismatch() {
        let item = Item::Circle(Circle::new(Matrix4::identity(), 3.0));
        let back = Line::try_from(item).unwrap_err();
        let circle = Circle::try_from(back).unwrap();
        assert_eq!(circle.radius, 3.0);
    }

    #[test]
    fn test_reverse_loop() {
        let mut item = Item::Loop(Loop::new(vec![edge(0.0, 1.0), edge(1.0, 2.0)]));
        item.reverse().unwrap();

        let children = item.children();
        let first = children[0].downcast_ref::<Edge>().unwrap();
        assert_eq!(first.start.as_parameter(), Some(1.0));
        assert_eq!(first.orientation_2, Some(false));
        assert_eq!(children[1].downcast_ref::<Edge>().unwrap().orientation_2, Some(false));
    }

    #[test]
    fn test_reverse_circle_fails() {
        let mut item = Item::Circle(Circle::new(Matrix4::identity(), 1.0));
        let err = item.reverse().unwrap_err();
        assert_eq!(err.kind(), Kind::Circle);
    }

    #[test]
    fn test_reverse_is_atomic() {
        let mut item = Item::Collection(Collection::with_children(vec![
            edge(0.0, 1.0),
            Item::Line(Line::default()),
        ]));
        assert!(item.reverse().is_err());

        assert_eq!(item.children()[0].kind(), Kind::Edge);
        assert_eq!(
            item.children()[0].downcast_ref::<Edge>().unwrap().orientation_2,
            Some(true)
        );
    }

    #[test]
    fn test_boolean_result_reverses_operands() {
        let mut item = Item::BooleanResult(BooleanResult::new(
            BooleanOp::Union,
            Collection::new(),
            Shell::new(vec![]),
        ));
        item.reverse().unwrap();
        assert_eq!(item.children()[0].kind(), Kind::Shell);
    }

    #[test]
    fn test_instance_roundtrip() {
        let mut item = Item::Face(Face::default());
        assert!(item.instance().is_none());

        item.set_instance(Some(SourceEntity::new(7, "IFCFACE").into()));
        assert_eq!(item.instance().map(|p| p.describe()), Some("#7=IFCFACE".to_string()));
    }
}
