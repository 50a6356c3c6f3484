//! Performance benchmarks for row-descriptor construction.
//!
//! Shows why the window matters: building descriptors for the visible rows
//! stays flat while building the whole page grows with page size.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stashview::models::Item;
use stashview::render::{render_visible, VisibleRange};

/// Generate a page of items cycling through the three display types.
fn generate_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let (quality, classid) = match i % 3 {
                0 => (7, 604),
                1 => (7, 603),
                _ => (4, 100),
            };
            Item {
                item_id: i as i64,
                item_quality: quality,
                item_classid: classid,
                item_name: format!("Item of Testing {}", i),
                item_image: format!("img{}", i),
                item_description: format!("A <test> item \"{}\"", i),
                account_login: "operator".to_string(),
                account_realm: (i % 5) as u8,
                char_name: format!("Char{}", i),
                ..Default::default()
            }
        })
        .collect()
}

fn bench_render_full_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_full_page");

    for size in [100, 500, 1000].iter() {
        let items = generate_items(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_items", size)),
            &items,
            |b, items| {
                let range = VisibleRange {
                    start: 0,
                    end: items.len(),
                };
                b.iter(|| {
                    let rows = render_visible(black_box(items), range, false);
                    black_box(rows)
                });
            },
        );
    }

    group.finish();
}

fn bench_render_visible_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_visible_window");

    // A 50-row viewport window over increasingly large pages
    for size in [100, 500, 1000].iter() {
        let items = generate_items(*size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_items", size)),
            &items,
            |b, items| {
                let range = VisibleRange { start: 20, end: 70 };
                b.iter(|| {
                    let rows = render_visible(black_box(items), range, false);
                    black_box(rows)
                });
            },
        );
    }

    group.finish();
}

fn bench_range_compute(c: &mut Criterion) {
    c.bench_function("visible_range_compute", |b| {
        b.iter(|| {
            let range = VisibleRange::compute(
                black_box(4000),
                black_box(1000),
                black_box(40),
                black_box(10),
            );
            black_box(range)
        });
    });
}

criterion_group!(
    benches,
    bench_render_full_page,
    bench_render_visible_window,
    bench_range_compute
);
criterion_main!(benches);
