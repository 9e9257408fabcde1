//! Benchmarks for directory-tree rendering.
//!
//! # Run Benchmarks
//!
//! ```bash
//! cargo bench --bench render_tree
//! ```

use bids_macros_filetree::{DirectoryTree, DirectoryTreeBuilder};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::{Map, Value, json};
use std::hint::black_box;

/// Dataset-shaped description: subjects x sessions x datatypes.
fn dataset(subjects: usize) -> Value {
    let mut root = Map::new();
    root.insert("dataset_description.json".to_string(), json!(""));
    root.insert("participants.tsv".to_string(), json!(""));

    for sub in 1..=subjects {
        let mut sessions = Map::new();
        for ses in 1..=2 {
            let stem = format!("sub-{sub:02}_ses-{ses:02}");

            let mut anat = Map::new();
            anat.insert(format!("{stem}_T1w.nii.gz"), json!(""));

            let mut func = Map::new();
            func.insert(format!("{stem}_task-rest_bold.nii.gz"), json!(""));
            func.insert(format!("{stem}_task-rest_bold.json"), json!(""));

            let mut session = Map::new();
            session.insert("anat".to_string(), Value::Object(anat));
            session.insert("func".to_string(), Value::Object(func));
            sessions.insert(format!("ses-{ses:02}"), Value::Object(session));
        }
        root.insert(format!("sub-{sub:02}"), Value::Object(sessions));
    }

    Value::Object(root)
}

fn bench_render_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_by_subject_count");

    for subjects in [1, 10, 50, 200] {
        let value = dataset(subjects);
        group.bench_with_input(BenchmarkId::from_parameter(subjects), &value, |b, value| {
            b.iter(|| {
                let tree = DirectoryTree::from_json(black_box(value), true).unwrap();
                black_box(tree.generate())
            });
        });
    }

    group.finish();
}

fn bench_wide_directories(c: &mut Criterion) {
    c.bench_function("render_wide_100", |b| {
        b.iter(|| {
            let mut builder = DirectoryTreeBuilder::new();
            for i in 0..100 {
                builder = builder.dir(format!("d{i}"), |d| d.file("leaf"));
            }
            black_box(builder.build(false).unwrap().generate())
        });
    });
}

criterion_group!(benches, bench_render_by_size, bench_wide_directories);
criterion_main!(benches);
