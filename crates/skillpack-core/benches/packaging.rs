//! Benchmarks for the validators and end-to-end packaging.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use skillpack_core::PackageConfig;
use skillpack_core::creation::walk;
use skillpack_core::is_unsafe_arc_name;
use skillpack_core::try_package_skill;
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a skill with `file_count` 1 KB files spread over ten directories.
fn create_skill(temp: &TempDir, file_count: usize) -> PathBuf {
    let root = temp.path().join("bench_skill");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("SKILL.md"), "---\nname: bench\n---\n").unwrap();

    let content = "x".repeat(1024);
    for i in 0..file_count {
        let dir = root.join(format!("dir_{}", i % 10));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("file_{i:05}.txt")), &content).unwrap();
    }

    root
}

fn bench_arc_name_gate(c: &mut Criterion) {
    let names = [
        "demo/SKILL.md",
        "demo/scripts/helpers/util.py",
        "demo/../../etc/passwd",
        "C:\\Windows\\System32",
        "demo/a/b/c/d/e/f/g/h/i/j/k/l/m/n/o/p.txt",
    ];

    c.bench_function("is_unsafe_arc_name", |b| {
        b.iter(|| {
            for name in &names {
                black_box(is_unsafe_arc_name(black_box(name)));
            }
        });
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for count in [10, 100, 1000] {
        let temp = TempDir::new().unwrap();
        let root = create_skill(&temp, count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &root, |b, root| {
            b.iter(|| black_box(walk(root).unwrap()));
        });
    }

    group.finish();
}

fn bench_package(c: &mut Criterion) {
    let mut group = c.benchmark_group("package");
    group.sample_size(20);

    let temp = TempDir::new().unwrap();
    let root = create_skill(&temp, 100);
    let out = temp.path().join("out");
    group.throughput(Throughput::Bytes(100 * 1024));

    for (label, config) in [
        ("stored", PackageConfig::default().with_stored()),
        ("deflate_6", PackageConfig::default()),
        ("deflate_9", PackageConfig::default().with_compression_level(9)),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| black_box(try_package_skill(&root, Some(&out), &config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_arc_name_gate, bench_walk, bench_package);
criterion_main!(benches);
