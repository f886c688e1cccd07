//! Benchmarks for file tree operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linsim_platform::SystemTime;
use linsim_vfs::FileTree;

fn stamp() -> SystemTime {
    SystemTime::date(2024, 1, 15)
}

fn populated(n_files: usize) -> (FileTree, Vec<String>) {
    let mut tree = FileTree::new(stamp());
    tree.create_dir("/", "data", "root", stamp()).unwrap();
    let paths: Vec<String> = (0..n_files).map(|i| format!("/data/file_{i}.txt")).collect();
    for path in &paths {
        tree.write_file(path, "some file content", "root", stamp()).unwrap();
    }
    (tree, paths)
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_write");

    for n_files in [100, 1_000] {
        group.bench_function(BenchmarkId::new("write", n_files), |b| {
            b.iter(|| populated(n_files));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_resolve");

    for n_files in [100, 1_000] {
        let (tree, paths) = populated(n_files);
        group.bench_function(BenchmarkId::new("resolve", n_files), |b| {
            b.iter(|| {
                for path in &paths {
                    let _ = tree.resolve(path, "/home/user");
                }
            });
        });
    }

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_list");

    for n_files in [100, 1_000] {
        let (tree, _) = populated(n_files);
        group.bench_function(BenchmarkId::new("list_children", n_files), |b| {
            b.iter(|| tree.list_children("/data").map(|it| it.count()));
        });
    }

    group.finish();
}

fn bench_copy_subtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_copy");

    for n_files in [100, 1_000] {
        let (tree, _) = populated(n_files);
        group.bench_function(BenchmarkId::new("copy_recursive", n_files), |b| {
            b.iter(|| {
                let mut t = tree.clone();
                t.copy("/data", "/backup", true, stamp()).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_mkdir_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_mkdir");

    for depth in [10, 50, 100] {
        let path: String = (0..depth).map(|i| format!("/d{i}")).collect();

        group.bench_function(BenchmarkId::new("create_dir_all", depth), |b| {
            b.iter(|| {
                let mut tree = FileTree::new(stamp());
                tree.create_dir_all(&path, "root", stamp()).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_write,
    bench_resolve,
    bench_list,
    bench_copy_subtree,
    bench_mkdir_deep
);
criterion_main!(benches);
