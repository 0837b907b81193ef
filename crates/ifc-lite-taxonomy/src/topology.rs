// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregate and topology nodes
//!
//! Every aggregate exclusively owns its children; dropping a node drops
//! the whole subtree. Refinements of [`Collection`] dereference to it, so
//! `shell.children` and `face.push(..)` work directly.

use crate::{Concrete, Direction3, GeomItem, Item, Kind, Matrix4};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Ordered list of owned child items with a local transform
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Collection {
    pub geom: GeomItem,
    pub children: Vec<Item>,
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection owning `children`, in order
    pub fn with_children(children: Vec<Item>) -> Self {
        Self {
            geom: GeomItem::default(),
            children,
        }
    }

    /// Append a child
    pub fn push(&mut self, child: impl Into<Item>) {
        self.children.push(child.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children of one concrete type, in order; other kinds are skipped
    pub fn children_as<T: Concrete>(&self) -> Vec<&T> {
        self.children.iter().filter_map(T::from_item).collect()
    }

    /// Children with the given kind, in order
    pub fn children_of_kind(&self, kind: Kind) -> impl Iterator<Item = &Item> {
        self.children.iter().filter(move |c| c.kind() == kind)
    }

    /// Reverse child order, then reverse every child exactly once
    ///
    /// Callers must have checked reversibility of all children; see
    /// [`Item::reverse`].
    pub(crate) fn reverse_unchecked(&mut self) {
        self.children.reverse();
        for child in &mut self.children {
            child.reverse_unchecked();
        }
    }
}

macro_rules! refines_collection {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Deref for $ty {
                type Target = Collection;

                fn deref(&self) -> &Collection {
                    &self.collection
                }
            }

            impl DerefMut for $ty {
                fn deref_mut(&mut self) -> &mut Collection {
                    &mut self.collection
                }
            }
        )*
    };
}

refines_collection!(Loop, Face, Shell, Node, BooleanResult);

/// Face boundary: an ordered cycle of edges
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Loop {
    pub collection: Collection,
    pub external: Option<bool>,
    pub closed: Option<bool>,
}

impl Loop {
    /// Create a loop from its edges, in traversal order
    pub fn new(edges: Vec<Item>) -> Self {
        Self {
            collection: Collection::with_children(edges),
            ..Self::default()
        }
    }

    /// Mark as the outer boundary of its face
    pub fn external(mut self) -> Self {
        self.external = Some(true);
        self
    }
}

/// Bounded face: a basis surface plus loops stored as children
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Face {
    pub collection: Collection,
    /// Shared, read-only handle to the basis surface (absent means planar)
    pub basis: Option<Arc<Item>>,
}

impl Face {
    /// Create a face bounded by `loops`
    pub fn new(loops: Vec<Item>) -> Self {
        Self {
            collection: Collection::with_children(loops),
            basis: None,
        }
    }

    /// Set the basis surface
    pub fn with_basis(mut self, basis: Item) -> Self {
        self.basis = Some(Arc::new(basis));
        self
    }

    /// Borrow the basis surface
    pub fn basis(&self) -> Option<&Item> {
        self.basis.as_deref()
    }

    /// Mutable basis access; detaches from other holders first
    pub fn basis_mut(&mut self) -> Option<&mut Item> {
        self.basis.as_mut().map(Arc::make_mut)
    }

    /// Loops marked as the outer boundary
    pub fn outer_loops(&self) -> impl Iterator<Item = &Loop> {
        self.children
            .iter()
            .filter_map(Loop::from_item)
            .filter(|l| l.external == Some(true))
    }
}

/// Connected set of faces
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shell {
    pub collection: Collection,
    pub closed: Option<bool>,
}

impl Shell {
    pub fn new(faces: Vec<Item>) -> Self {
        Self {
            collection: Collection::with_children(faces),
            closed: None,
        }
    }

    /// Create a shell known to bound a volume
    pub fn closed(faces: Vec<Item>) -> Self {
        Self {
            collection: Collection::with_children(faces),
            closed: Some(true),
        }
    }
}

/// One semantic entity with alternate named representations
///
/// Keys are representation context names (e.g. `Body`, `Box`), unique per
/// node. Iteration is sorted by name.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub collection: Collection,
    pub representations: BTreeMap<String, Item>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named representation, returning the previous one
    pub fn insert_representation(
        &mut self,
        name: impl Into<String>,
        item: impl Into<Item>,
    ) -> Option<Item> {
        self.representations.insert(name.into(), item.into())
    }

    /// Look up a representation by context name
    pub fn representation(&self, name: &str) -> Option<&Item> {
        self.representations.get(name)
    }
}

/// CSG operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BooleanOp {
    Union,
    /// Left minus right; not commutative
    Subtraction,
    Intersection,
}

impl BooleanOp {
    pub fn name(self) -> &'static str {
        match self {
            BooleanOp::Union => "union",
            BooleanOp::Subtraction => "subtraction",
            BooleanOp::Intersection => "intersection",
        }
    }

    pub fn is_commutative(self) -> bool {
        !matches!(self, BooleanOp::Subtraction)
    }
}

/// Binary CSG node; children are `[left, right]`
///
/// The operand count is not validated; producers are expected to supply
/// exactly two.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BooleanResult {
    pub collection: Collection,
    pub operation: BooleanOp,
}

impl BooleanResult {
    /// Combine two operands, left first
    pub fn new(operation: BooleanOp, left: impl Into<Item>, right: impl Into<Item>) -> Self {
        Self {
            collection: Collection::with_children(vec![left.into(), right.into()]),
            operation,
        }
    }

    pub fn left(&self) -> Option<&Item> {
        self.children.first()
    }

    pub fn right(&self) -> Option<&Item> {
        self.children.get(1)
    }
}

/// Profile face swept through space
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sweep {
    pub geom: GeomItem,
    /// Owned profile
    pub basis: Face,
}

impl Sweep {
    pub fn new(matrix: Matrix4, basis: Face) -> Self {
        Self {
            geom: GeomItem::with_matrix(matrix),
            basis,
        }
    }
}

/// Linear sweep of a profile face
///
/// `depth` is expected to be positive; zero-depth extrusions are degenerate
/// and not rejected here.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Extrusion {
    pub sweep: Sweep,
    pub direction: Direction3,
    pub depth: f64,
}

impl Extrusion {
    pub fn new(matrix: Matrix4, basis: Face, direction: Direction3, depth: f64) -> Self {
        Self {
            sweep: Sweep::new(matrix, basis),
            direction,
            depth,
        }
    }
}

impl Deref for Extrusion {
    type Target = Sweep;

    fn deref(&self) -> &Sweep {
        &self.sweep
    }
}

impl DerefMut for Extrusion {
    fn deref_mut(&mut self) -> &mut Sweep {
        &mut self.sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Circle, Edge, Line, Point3};

    fn square_loop() -> Loop {
        let p = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let edges = (0..4)
            .map(|i| Item::Edge(Edge::segment(p[i].clone(), p[(i + 1) % 4].clone())))
            .collect();
        Loop::new(edges).external()
    }

    #[test]
    fn test_children_as_filters_by_kind() {
        let mut collection = Collection::new();
        collection.push(Line::default());
        collection.push(Circle::new(Matrix4::identity(), 1.0));
        collection.push(Line::default());

        assert_eq!(collection.children_as::<Line>().len(), 2);
        assert_eq!(collection.children_as::<Circle>().len(), 1);
        assert_eq!(collection.children_of_kind(Kind::Ellipse).count(), 0);
    }

    #[test]
    fn test_face_outer_loops() {
        let face = Face::new(vec![Item::Loop(square_loop()), Item::Loop(Loop::new(vec![]))]);
        assert_eq!(face.len(), 2);
        assert_eq!(face.outer_loops().count(), 1);
    }

    #[test]
    fn test_boolean_operands_in_order() {
        let result = BooleanResult::new(
            BooleanOp::Subtraction,
            Item::Shell(Shell::closed(vec![])),
            Item::Collection(Collection::new()),
        );
        assert_eq!(result.left().map(Item::kind), Some(Kind::Shell));
        assert_eq!(result.right().map(Item::kind), Some(Kind::Collection));
        assert!(!result.operation.is_commutative());
    }

    #[test]
    fn test_node_representations_unique() {
        let mut node = Node::new();
        assert!(node.insert_representation("Body", Collection::new()).is_none());
        assert!(node.insert_representation("Body", Shell::new(vec![])).is_some());
        assert_eq!(node.representations.len(), 1);
        assert_eq!(node.representation("Body").map(Item::kind), Some(Kind::Shell));
    }
}
