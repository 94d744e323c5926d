use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sbls::model::{solve, Method, SolveOptions};

fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve n=2 simple", |b| {
        b.iter(|| solve(black_box(&SolveOptions::new(2, Method::Simple))).unwrap())
    });

    c.bench_function("solve n=3 simple", |b| {
        b.iter(|| solve(black_box(&SolveOptions::new(3, Method::Simple))).unwrap())
    });

    c.bench_function("solve n=3 advanced", |b| {
        b.iter(|| solve(black_box(&SolveOptions::new(3, Method::Advanced))).unwrap())
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
