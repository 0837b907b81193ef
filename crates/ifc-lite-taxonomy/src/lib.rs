// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Lite Geometry Taxonomy
//!
//! Kernel-independent intermediate representation for IFC geometry. A
//! schema-specific producer builds a taxonomy tree bottom-up (leaves, curves,
//! topology, collections), attaching a provenance handle to each node. The
//! tree is then cloned, reversed, printed, canonicalised, or handed whole to
//! a solid-modeling kernel.
//!
//! ## Overview
//!
//! - **Leaves**: [`Matrix4`] (with an [`AffineTag`] hint), [`Point3`],
//!   [`Direction3`], [`Colour`], [`Style`]
//! - **Curves**: [`Line`], [`Circle`], [`Ellipse`], [`BSplineCurve`],
//!   [`TrimmedCurve`], [`Edge`]
//! - **Topology**: [`Collection`], [`Loop`], [`Face`], [`Shell`], [`Node`],
//!   [`BooleanResult`], [`Extrusion`]
//! - **Registry**: [`Kind`], [`TypeByKind`], [`CurveByIndex`], [`census`]
//! - **Ordering**: [`less`], [`CanonicalKey`], [`Canonicalizer`]
//!
//! All nodes live in the closed [`Item`] sum type. Children are owned
//! exclusively by their parent; there is no sharing and no cycles, except
//! for read-only basis handles which are copy-on-write.
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_lite_taxonomy::{
//!     BooleanOp, BooleanResult, Direction3, Edge, Extrusion, Face, Item, Loop, Matrix4, Point3,
//! };
//!
//! let corners = [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
//! let edges = (0..4)
//!     .map(|i| {
//!         let (x0, y0) = corners[i];
//!         let (x1, y1) = corners[(i + 1) % 4];
//!         Item::Edge(Edge::segment(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 0.0)))
//!     })
//!     .collect();
//! let profile = Face::new(vec![Item::Loop(Loop::new(edges).external())]);
//!
//! let up = Direction3::new(0.0, 0.0, 1.0);
//! let wall = Extrusion::new(Matrix4::identity(), profile.clone(), up.clone(), 3.0);
//! let opening = Extrusion::new(Matrix4::identity(), profile, up, 1.0);
//!
//! let solid = Item::BooleanResult(BooleanResult::new(BooleanOp::Subtraction, wall, opening));
//! assert!(solid.to_string().starts_with("boolean_result subtraction"));
//! ```

pub mod curve;
pub mod error;
pub mod geom;
pub mod item;
pub mod kind;
pub mod ordering;
pub mod primitives;
pub mod print;
pub mod provenance;
pub mod style;
pub mod surface;
pub mod topology;

// Re-export nalgebra types for convenience
pub use nalgebra::Vector3;

// Re-export main types
pub use curve::{BSplineCurve, Circle, Edge, Ellipse, Line, TrimBound, TrimmedCurve};
pub use error::{Error, Result};
pub use geom::GeomItem;
pub use item::{Concrete, Item};
pub use kind::{census, CurveByIndex, Curves, Kind, Kinds, TypeByKind};
pub use ordering::{
    dedup_canonical, less, sort_canonical, CanonicalItem, CanonicalKey, Canonicalizer,
};
pub use primitives::{AffineTag, Direction3, Matrix4, Point3};
pub use print::PrintOptions;
pub use provenance::{Provenance, SourceEntity, SourceInstance};
pub use style::{Colour, Style};
pub use surface::Plane;
pub use topology::{BooleanOp, BooleanResult, Collection, Extrusion, Face, Loop, Node, Shell, Sweep};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_items_are_send_sync() {
        assert_send_sync::<Item>();
        assert_send_sync::<Canonicalizer>();
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Collection::new();
        original.push(Circle::new(Matrix4::identity(), 1.0));
        let original = Item::Collection(original);

        let mut copy = original.clone();
        if let Some(c) = copy.as_collection_mut() {
            if let Some(circle) = c.children[0].downcast_mut::<Circle>() {
                circle.radius = 9.0;
            }
        }

        assert_eq!(
            original.children()[0].downcast_ref::<Circle>().map(|c| c.radius),
            Some(1.0)
        );
        assert!(less(&original, &copy));
    }
}
