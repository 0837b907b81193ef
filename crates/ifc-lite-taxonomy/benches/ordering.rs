// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ifc_lite_taxonomy::{
    Canonicalizer, Collection, Direction3, Edge, Extrusion, Face, Item, Loop, Matrix4, Point3,
};

fn polygon_extrusion(sides: usize, depth: f64) -> Item {
    let points: Vec<Point3> = (0..sides)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (sides as f64);
            Point3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    let edges = (0..sides)
        .map(|i| Item::Edge(Edge::segment(points[i].clone(), points[(i + 1) % sides].clone())))
        .collect();
    let profile = Face::new(vec![Item::Loop(Loop::new(edges).external())]);

    Item::Extrusion(Extrusion::new(
        Matrix4::identity(),
        profile,
        Direction3::new(0.0, 0.0, 1.0),
        depth,
    ))
}

fn building(count: usize) -> Item {
    let children = (0..count)
        .map(|i| polygon_extrusion(8 + i % 4, 3.0))
        .collect();
    Item::Collection(Collection::with_children(children))
}

fn bench_clone(c: &mut Criterion) {
    let tree = building(200);
    c.bench_function("clone_200_extrusions", |b| b.iter(|| black_box(tree.clone())));
}

fn bench_canonical_cmp(c: &mut Criterion) {
    let a = building(200);
    let b = a.clone();
    c.bench_function("canonical_cmp_equal_trees", |bench| {
        bench.iter(|| black_box(a.canonical_cmp(&b)))
    });
}

fn bench_canonicalizer(c: &mut Criterion) {
    let items: Vec<Item> = (0..500).map(|i| polygon_extrusion(8 + i % 4, 3.0)).collect();
    c.bench_function("intern_500_extrusions", |b| {
        b.iter(|| {
            let mut pool = Canonicalizer::new();
            for item in &items {
                black_box(pool.intern(item.clone()));
            }
            pool.len()
        })
    });
}

criterion_group!(benches, bench_clone, bench_canonical_cmp, bench_canonicalizer);
criterion_main!(benches);
