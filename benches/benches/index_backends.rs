// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_index::{Aabb2D, Backend, Entry, FlatVec, Grid, Index, PackedRTree};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const WORLD: f64 = 10_000.0;

/// Short, mostly horizontal segments scattered over the world, the shape of
/// a track dataset's bounding boxes.
fn gen_segment_entries(count: usize) -> Vec<Entry<usize>> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|key| {
            let x = rng.next_f64() * WORLD;
            let y = rng.next_f64() * WORLD;
            let dx = 2.0 + rng.next_f64() * 20.0;
            let dy = (rng.next_f64() - 0.5) * 6.0;
            Entry {
                aabb: Aabb2D::from_corners((x, y), (x + dx, y + dy)),
                key,
            }
        })
        .collect()
}

/// Pointer-sized query windows.
fn gen_query_windows(count: usize, half: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * WORLD;
            let y = rng.next_f64() * WORLD;
            Aabb2D::new(x - half, y - half, x + half, y + half)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    fn bench<B: Backend<f64>>(b: &mut criterion::Bencher<'_>, entries: &[Entry<usize>]) {
        b.iter(|| {
            let index: Index<usize, f64, B> = Index::build(entries.iter().copied());
            black_box(index)
        });
    }

    let mut group = c.benchmark_group("index_build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let entries = gen_segment_entries(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench::<FlatVec<f64>>(b, &entries);
        });
        group.bench_function(BenchmarkId::new("PackedRTree", n), |b| {
            bench::<PackedRTree<f64>>(b, &entries);
        });
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            bench::<Grid>(b, &entries);
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    fn bench<B: Backend<f64>>(
        b: &mut criterion::Bencher<'_>,
        entries: &[Entry<usize>],
        windows: &[Aabb2D<f64>],
    ) {
        let index: Index<usize, f64, B> = Index::build(entries.iter().copied());
        b.iter(|| {
            let mut total = 0usize;
            for w in windows {
                index.visit_rect(*w, |_| total += 1);
            }
            total
        });
    }

    let windows = gen_query_windows(1_000, 5.0);
    let mut group = c.benchmark_group("index_query_pointer_window");
    for &n in &[1_000usize, 10_000, 100_000] {
        let entries = gen_segment_entries(n);
        group.throughput(Throughput::Elements(windows.len() as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench::<FlatVec<f64>>(b, &entries, &windows);
        });
        group.bench_function(BenchmarkId::new("PackedRTree", n), |b| {
            bench::<PackedRTree<f64>>(b, &entries, &windows);
        });
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            bench::<Grid>(b, &entries, &windows);
        });
    }
    group.finish();
}

fn bench_query_sorted(c: &mut Criterion) {
    let entries = gen_segment_entries(100_000);
    let index: Index<usize> = Index::build(entries);
    let windows = gen_query_windows(1_000, 50.0);
    c.bench_function("index_query_build_order_100k", |b| {
        b.iter(|| {
            windows
                .iter()
                .map(|w| index.query(*w).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_build, bench_query, bench_query_sorted);
criterion_main!(benches);
