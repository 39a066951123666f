use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use detkit_determinant::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_matrix(dim: usize) -> SquareMatrix {
  let mut rng = StdRng::seed_from_u64(dim as u64);
  SquareMatrix::from_fn(dim, |_, _| rng.gen_range(-1.0..1.0))
}

fn criterion_benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("determinant");
  for dim in [4, 16, 64, 256] {
    let matrix = random_matrix(dim);
    group.bench_with_input(BenchmarkId::from_parameter(dim), &matrix, |b, m| {
      b.iter(|| black_box(m.clone()).determinant())
    });
  }
  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
