// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Canonical total order over taxonomy items
//!
//! Items compare first by kind (catalogue order), then by their own fields.
//! Floats compare with `f64::total_cmp` after folding `-0.0` into `0.0`,
//! child sequences lexicographically with the shorter sequence first on a
//! shared prefix. Provenance is never
//! compared, so structurally identical subtrees from different schema
//! entities are equivalent. This is the value-based equality to use for
//! deduplication; `PartialEq` on [`Style`] is identity-based.

use crate::{
    BooleanResult, Collection, Colour, Direction3, Extrusion, Face, GeomItem, Item, Loop,
    Matrix4, Node, Point3, Shell, Style, TrimBound, TrimmedCurve,
};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Strict weak ordering over items
pub fn less(a: &Item, b: &Item) -> bool {
    a.canonical_cmp(b) == Ordering::Less
}

impl Item {
    /// Total canonical comparison
    pub fn canonical_cmp(&self, other: &Item) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| match (self, other) {
                (Item::Matrix4(a), Item::Matrix4(b)) => cmp_matrix(a, b),
                (Item::Point3(a), Item::Point3(b)) => cmp_point(a, b),
                (Item::Direction3(a), Item::Direction3(b)) => cmp_direction(a, b),
                (Item::Colour(a), Item::Colour(b)) => cmp_colour(a, b),
                (Item::Style(a), Item::Style(b)) => cmp_style(a, b),
                (Item::Line(a), Item::Line(b)) => cmp_geom(&a.geom, &b.geom),
                (Item::Circle(a), Item::Circle(b)) => {
                    cmp_f64(&a.radius, &b.radius).then_with(|| cmp_geom(&a.geom, &b.geom))
                }
                (Item::Ellipse(a), Item::Ellipse(b)) => cmp_f64(&a.radius, &b.radius)
                    .then_with(|| cmp_f64(&a.radius2, &b.radius2))
                    .then_with(|| cmp_geom(&a.geom, &b.geom)),
                (Item::BSplineCurve(a), Item::BSplineCurve(b)) => cmp_geom(&a.geom, &b.geom),
                (Item::Plane(a), Item::Plane(b)) => cmp_geom(&a.geom, &b.geom),
                (Item::TrimmedCurve(a), Item::TrimmedCurve(b)) => cmp_trimmed(a, b),
                (Item::Edge(a), Item::Edge(b)) => cmp_trimmed(a, b),
                (Item::Collection(a), Item::Collection(b)) => cmp_collection(a, b),
                (Item::Loop(a), Item::Loop(b)) => cmp_loop(a, b),
                (Item::Face(a), Item::Face(b)) => cmp_face(a, b),
                (Item::Shell(a), Item::Shell(b)) => cmp_shell(a, b),
                (Item::Node(a), Item::Node(b)) => cmp_node(a, b),
                (Item::BooleanResult(a), Item::BooleanResult(b)) => cmp_boolean(a, b),
                (Item::Extrusion(a), Item::Extrusion(b)) => cmp_extrusion(a, b),
                // kinds already differ
                _ => Ordering::Equal,
            })
    }

    /// Structural equivalence under the canonical order
    pub fn canonical_eq(&self, other: &Item) -> bool {
        self.canonical_cmp(other) == Ordering::Equal
    }
}

// Signed zeros compare equal; NaN still gets a fixed place.
fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

fn cmp_floats(a: &[f64], b: &[f64]) -> Ordering {
    cmp_seq(a, b, cmp_f64)
}

fn cmp_seq<T>(a: &[T], b: &[T], mut f: impl FnMut(&T, &T) -> Ordering) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match f(x, y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

fn cmp_option<T>(a: &Option<T>, b: &Option<T>, f: impl FnOnce(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => f(a, b),
    }
}

fn cmp_matrix(a: &Matrix4, b: &Matrix4) -> Ordering {
    cmp_floats(a.components().as_slice(), b.components().as_slice()).then(a.tag.cmp(&b.tag))
}

fn cmp_point(a: &Point3, b: &Point3) -> Ordering {
    cmp_floats(a.components.as_slice(), b.components.as_slice())
}

fn cmp_direction(a: &Direction3, b: &Direction3) -> Ordering {
    cmp_floats(a.components.as_slice(), b.components.as_slice())
}

fn cmp_colour(a: &Colour, b: &Colour) -> Ordering {
    cmp_floats(a.components.as_slice(), b.components.as_slice())
}

fn cmp_style(a: &Style, b: &Style) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| cmp_option(&a.diffuse, &b.diffuse, cmp_colour))
        .then_with(|| cmp_option(&a.specular, &b.specular, cmp_colour))
        .then_with(|| cmp_option(&a.specularity, &b.specularity, cmp_f64))
        .then_with(|| cmp_option(&a.transparency, &b.transparency, cmp_f64))
}

fn cmp_geom(a: &GeomItem, b: &GeomItem) -> Ordering {
    cmp_matrix(&a.matrix, &b.matrix)
        .then(a.orientation.cmp(&b.orientation))
        .then_with(|| cmp_style(&a.surface_style, &b.surface_style))
}

fn cmp_bound(a: &TrimBound, b: &TrimBound) -> Ordering {
    match (a, b) {
        (TrimBound::Point(a), TrimBound::Point(b)) => cmp_point(a, b),
        (TrimBound::Point(_), TrimBound::Parameter(_)) => Ordering::Less,
        (TrimBound::Parameter(_), TrimBound::Point(_)) => Ordering::Greater,
        (TrimBound::Parameter(a), TrimBound::Parameter(b)) => cmp_f64(a, b),
    }
}

fn cmp_basis(a: &Option<Arc<Item>>, b: &Option<Arc<Item>>) -> Ordering {
    cmp_option(a, b, |x, y| x.canonical_cmp(y))
}

fn cmp_trimmed(a: &TrimmedCurve, b: &TrimmedCurve) -> Ordering {
    cmp_bound(&a.start, &b.start)
        .then_with(|| cmp_bound(&a.end, &b.end))
        .then(a.orientation_2.cmp(&b.orientation_2))
        .then_with(|| cmp_basis(&a.basis, &b.basis))
        .then_with(|| cmp_geom(&a.geom, &b.geom))
}

fn cmp_collection(a: &Collection, b: &Collection) -> Ordering {
    cmp_geom(&a.geom, &b.geom)
        .then_with(|| cmp_seq(&a.children, &b.children, |x, y| x.canonical_cmp(y)))
}

fn cmp_loop(a: &Loop, b: &Loop) -> Ordering {
    a.external
        .cmp(&b.external)
        .then(a.closed.cmp(&b.closed))
        .then_with(|| cmp_collection(a, b))
}

fn cmp_face(a: &Face, b: &Face) -> Ordering {
    cmp_basis(&a.basis, &b.basis).then_with(|| cmp_collection(a, b))
}

fn cmp_shell(a: &Shell, b: &Shell) -> Ordering {
    a.closed.cmp(&b.closed).then_with(|| cmp_collection(a, b))
}

fn cmp_node(a: &Node, b: &Node) -> Ordering {
    cmp_collection(a, b).then_with(|| {
        let left: Vec<_> = a.representations.iter().collect();
        let right: Vec<_> = b.representations.iter().collect();
        cmp_seq(&left, &right, |(ka, va), (kb, vb)| {
            ka.cmp(kb).then_with(|| va.canonical_cmp(vb))
        })
    })
}

fn cmp_boolean(a: &BooleanResult, b: &BooleanResult) -> Ordering {
    a.operation
        .cmp(&b.operation)
        .then_with(|| cmp_collection(a, b))
}

fn cmp_extrusion(a: &Extrusion, b: &Extrusion) -> Ordering {
    cmp_f64(&a.depth, &b.depth)
        .then_with(|| cmp_direction(&a.direction, &b.direction))
        .then_with(|| cmp_geom(&a.geom, &b.geom))
        .then_with(|| cmp_face(&a.basis, &b.basis))
}

/// Item wrapper ordered by [`Item::canonical_cmp`]
///
/// Works over anything that borrows an item (`&Item`, `Item`, `Arc<Item>`),
/// so it can key ordered maps and sets directly.
#[derive(Clone, Debug)]
pub struct CanonicalKey<T: Borrow<Item> = Item>(pub T);

impl<T: Borrow<Item>> CanonicalKey<T> {
    pub fn item(&self) -> &Item {
        self.0.borrow()
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Anything that exposes an item for canonical lookup
///
/// Lets ordered collections of [`CanonicalKey`] be queried with a plain
/// `&Item`, without wrapping or cloning it first.
pub trait CanonicalItem {
    fn canonical_item(&self) -> &Item;
}

impl CanonicalItem for Item {
    fn canonical_item(&self) -> &Item {
        self
    }
}

impl<T: Borrow<Item>> CanonicalItem for CanonicalKey<T> {
    fn canonical_item(&self) -> &Item {
        self.item()
    }
}

impl PartialEq for dyn CanonicalItem + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_item().canonical_eq(other.canonical_item())
    }
}

impl Eq for dyn CanonicalItem + '_ {}

impl PartialOrd for dyn CanonicalItem + '_ {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for dyn CanonicalItem + '_ {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_item().canonical_cmp(other.canonical_item())
    }
}

impl<'a, T: Borrow<Item> + 'a> Borrow<dyn CanonicalItem + 'a> for CanonicalKey<T> {
    fn borrow(&self) -> &(dyn CanonicalItem + 'a) {
        self
    }
}

impl<T: Borrow<Item>> PartialEq for CanonicalKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.item().canonical_eq(other.item())
    }
}

impl<T: Borrow<Item>> Eq for CanonicalKey<T> {}

impl<T: Borrow<Item>> PartialOrd for CanonicalKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Borrow<Item>> Ord for CanonicalKey<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item().canonical_cmp(other.item())
    }
}

/// Sort items into canonical order
pub fn sort_canonical(items: &mut [Item]) {
    items.sort_by(Item::canonical_cmp);
}

/// Sort items canonically and drop structural duplicates
pub fn dedup_canonical(items: &mut Vec<Item>) {
    sort_canonical(items);
    items.dedup_by(|a, b| a.canonical_eq(b));
}

/// Interns structurally identical subtrees into shared handles
///
/// The returned handles are read-only; mutating one through
/// `Arc::make_mut` detaches it from the pool.
#[derive(Debug, Default)]
pub struct Canonicalizer {
    pool: BTreeSet<CanonicalKey<Arc<Item>>>,
    hits: usize,
}

impl Canonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical handle for `item`, adding it if unseen
    pub fn intern(&mut self, item: Item) -> Arc<Item> {
        if let Some(existing) = self.pool.get(&item as &dyn CanonicalItem) {
            self.hits += 1;
            log::trace!("canonical hit for {}", item.kind());
            return Arc::clone(&existing.0);
        }

        let handle = Arc::new(item);
        self.pool.insert(CanonicalKey(Arc::clone(&handle)));
        handle
    }

    /// Check whether an equivalent subtree was already interned
    pub fn contains(&self, item: &Item) -> bool {
        self.pool.contains(item as &dyn CanonicalItem)
    }

    /// Number of distinct subtrees
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Number of interned items that matched an existing subtree
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Drop all interned subtrees
    pub fn clear(&mut self) {
        self.pool.clear();
        self.hits = 0;
    }
}
