// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::num::NonZeroUsize;
use std::sync::Arc;

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_batch::{BatchPolicy, BatchRenderer, DrawItems, partition};
use understory_index::Index;
use understory_precise_hit::HitParams;
use understory_surface::{Domain, Segment, hit_test};

fn gen_segments(tracks: usize, per_track: usize) -> Vec<Segment> {
    let mut out = Vec::with_capacity(tracks * per_track);
    for t in 0..tracks {
        let y0 = (t * 37 % 1_000) as f64;
        let mut x = (t * 101 % 500) as f64;
        for i in 0..per_track {
            let y = y0 + (i % 7) as f64;
            out.push(Segment::new((x, y), (x + 4.0, y + 1.0), i as f64));
            x += 4.0;
        }
    }
    out
}

/// Sink that only counts, so the numbers show scheduling overhead.
#[derive(Default)]
struct Count(usize);

impl DrawItems<Segment> for Count {
    fn clear(&mut self) {}
    fn draw(&mut self, seg: &Segment) {
        self.0 += usize::from(seg.value >= 0.0);
    }
}

fn bench_hit_test(c: &mut Criterion) {
    let segments = gen_segments(500, 200);
    let index: Index<usize> = Index::build(segments.iter().enumerate().map(|(i, s)| s.entry(i)));
    let domain = Domain {
        x: 0.0..1_300.0,
        y: 0.0..1_010.0,
    };
    let mappings = domain.base(Size::new(1_300.0, 1_010.0));
    let params = HitParams::default();
    let pointers: Vec<Point> = (0..256)
        .map(|i| Point::new(f64::from(i) * 5.0, f64::from(i * 7 % 1_000)))
        .collect();

    c.bench_function("hit_test_100k_segments", |b| {
        b.iter(|| {
            pointers
                .iter()
                .map(|p| hit_test(&index, &segments, &mappings, *p, &params).len())
                .sum::<usize>()
        });
    });
}

fn bench_batches(c: &mut Criterion) {
    let items: Arc<[Segment]> = gen_segments(500, 200).into();
    let mut group = c.benchmark_group("render_pass");
    for &size in &[100usize, 1_000, 10_000] {
        let size = NonZeroUsize::new(size).unwrap();
        group.bench_function(BenchmarkId::new("partition", size), |b| {
            let policy = BatchPolicy::FixedSize(size);
            b.iter(|| partition(black_box(items.len()), policy).map(Iterator::count));
        });
        group.bench_function(BenchmarkId::new("fixed_size_pass", size), |b| {
            b.iter_batched(
                || BatchRenderer::new(BatchPolicy::FixedSize(size)),
                |mut renderer| {
                    renderer.start(Arc::clone(&items));
                    let mut sink = Count::default();
                    renderer.run_to_completion(&mut sink);
                    sink.0
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test, bench_batches);
criterion_main!(benches);
