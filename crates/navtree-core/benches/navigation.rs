//! Benchmarks for navigation tree building and lookups.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use navtree_core::build;
use serde_json::{Value, json};

/// Create a page list with nested sections of specified depth and breadth.
fn create_pages(depth: usize, breadth: usize) -> Value {
    fn create_level(prefix: &str, current_depth: usize, max_depth: usize, breadth: usize) -> Value {
        let entries: Vec<Value> = (0..breadth)
            .map(|i| {
                let path = format!("{prefix}/item-{i}");
                if current_depth < max_depth {
                    json!({
                        "name": format!("Section {i}"),
                        "pages": create_level(&path, current_depth + 1, max_depth, breadth),
                    })
                } else {
                    json!({"name": format!("Page {i}"), "path": path})
                }
            })
            .collect();
        Value::Array(entries)
    }

    create_level("", 0, depth, breadth)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (depth, breadth) in [(1, 10), (2, 10), (3, 6)] {
        let raw = create_pages(depth, breadth);
        group.bench_with_input(
            BenchmarkId::new("depth_breadth", format!("{depth}x{breadth}")),
            &raw,
            |b, raw| b.iter(|| build(raw).unwrap()),
        );
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let tree = build(&create_pages(3, 6)).unwrap();

    let mut group = c.benchmark_group("lookup");

    group.bench_function("resolve_hit", |b| {
        b.iter(|| tree.resolve("/item-3/item-2/item-5/item-1/"));
    });

    group.bench_function("resolve_miss", |b| {
        b.iter(|| tree.resolve("/nonexistent/path"));
    });

    group.bench_function("pager", |b| {
        b.iter(|| tree.pager("/item-3/item-2/item-5/item-1"));
    });

    group.bench_function("breadcrumbs", |b| {
        b.iter(|| tree.breadcrumbs("/item-5/item-5/item-5/item-5"));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
