//! Benchmarks for reading-order reconstruction and merge.
//!
//! Run with: cargo bench
//!
//! These benchmarks run on synthetic two-column detector output.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docmodel::{
    merge, order, section, Block, Coords, Label, Reconstruct, Resource, Section,
};

/// Creates a resource with every block in one scrambled section, the way
/// a layout detector hands it over.
fn create_raw_resource(page_count: usize) -> Resource {
    let mut blocks = Vec::new();

    for page in 0..page_count {
        let p = page as f64;
        for column in 0..2 {
            let x = 60.0 + column as f64 * 300.0;
            blocks.push(Block::title(
                Coords::new(p, x, 40.0, x + 250.0, 60.0),
                format!("Heading {}.{}", page, column),
            ));
            for row in 0..12 {
                let y = 80.0 + row as f64 * 50.0;
                let label = match row % 6 {
                    4 => Label::Figure,
                    5 => Label::List,
                    _ => Label::Text,
                };
                blocks.push(
                    Block::new(Coords::new(p, x + (row % 3) as f64, y, x + 250.0, y + 40.0))
                        .with_text(format!("Paragraph {} on page {}", row, page))
                        .with_label(label),
                );
            }
        }
    }

    // Deterministic shuffle so ordering has real work to do
    let len = blocks.len();
    for i in 0..len {
        blocks.swap(i, (i * 7 + 3) % len);
    }

    Resource::new()
        .with_title("Benchmark")
        .with_sections(vec![Section::with_blocks(blocks)])
}

/// Benchmark ordering at various sizes.
fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    for page_count in [1, 10, 50].iter() {
        let raw = create_raw_resource(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| order(black_box(&raw)));
        });
    }

    group.finish();
}

/// Benchmark resectioning on already ordered input.
fn bench_sectioning(c: &mut Criterion) {
    let mut group = c.benchmark_group("sectioning");

    for page_count in [1, 10, 50].iter() {
        let ordered = order(&create_raw_resource(*page_count));

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| section(black_box(&ordered)));
        });
    }

    group.finish();
}

/// Benchmark the standard pipeline over a batch.
fn bench_pipeline_batch(c: &mut Criterion) {
    let batch: Vec<Resource> = (0..16).map(|_| create_raw_resource(5)).collect();
    let pipeline = Reconstruct::standard();

    c.bench_function("pipeline_batch_16x5", |b| {
        b.iter(|| pipeline.apply_all(black_box(&batch)).unwrap());
    });
}

/// Benchmark merging many small resources.
fn bench_merge(c: &mut Criterion) {
    let parts: Vec<Resource> = (0..32).map(|_| create_raw_resource(1)).collect();

    c.bench_function("merge_32", |b| {
        b.iter(|| merge(black_box(&parts)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_ordering,
    bench_sectioning,
    bench_pipeline_batch,
    bench_merge,
);
criterion_main!(benches);
