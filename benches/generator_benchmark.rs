use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use rowop_puzzle::generator::{MatrixGenerator, SourceKind};
use rowop_puzzle::{RowOperations, UpperTriangular, WIN_TOLERANCE};
use std::hint::black_box;
use std::time::Duration;

#[derive(Clone)]
pub struct PuzzleBenchConfig {
    seed: u64,
    matrix_sizes: Vec<(usize, usize)>,
    sources: Vec<SourceKind>,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for PuzzleBenchConfig {
    fn default() -> Self {
        Self {
            seed: 1_748_801_234_567,
            matrix_sizes: vec![(2, 2), (3, 3), (4, 5), (6, 6), (9, 9)],
            sources: vec![SourceKind::Sine, SourceKind::ChaCha],
            measurement_time: 5,
            sample_size: 50,
        }
    }
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &PuzzleBenchConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_generate(c: &mut Criterion) {
    let config = PuzzleBenchConfig::default();
    let mut group = configure_group(c, "Matrix_Generation", &config);

    for &(rows, cols) in config.matrix_sizes.iter() {
        for &source in config.sources.iter() {
            let generator = MatrixGenerator::builder()
                .rows(rows)
                .cols(cols)
                .seed(config.seed)
                .source(source)
                .build();

            group.bench_with_input(
                BenchmarkId::new(source.to_string(), format!("{}x{}", rows, cols)),
                &(rows, cols),
                |b, _| {
                    b.iter(|| generator.generate().unwrap());
                },
            );
        }
    }
    group.finish();
}

pub fn bench_row_operations(c: &mut Criterion) {
    let config = PuzzleBenchConfig::default();
    let mut group = configure_group(c, "Row_Operations", &config);

    for &(rows, cols) in config.matrix_sizes.iter() {
        let matrix = MatrixGenerator::builder()
            .rows(rows)
            .cols(cols)
            .seed(config.seed)
            .build()
            .generate()
            .unwrap();
        let label = format!("{}x{}", rows, cols);

        group.bench_with_input(BenchmarkId::new("subtract_rows", &label), &matrix, |b, m| {
            b.iter_batched(
                || m.clone(),
                |mut m| {
                    m.subtract_rows(0, 1, rows - 1).unwrap();
                    m
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("upper_triangular", &label), &matrix, |b, m| {
            b.iter(|| black_box(m).is_upper_triangular(WIN_TOLERANCE));
        });
    }
    group.finish();
}

criterion_group!(puzzle_benches, bench_generate, bench_row_operations);
criterion_main!(puzzle_benches);
