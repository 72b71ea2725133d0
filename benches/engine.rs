use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lifegrid::{Coord, ParallelEngine, SparseEngine, SparseGrid, TickEngine};

fn make_alive(width: i64, height: i64) -> SparseGrid {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| Coord::new(row, col)))
        .filter(|pos| (pos.row + pos.col) % 3 == 0)
        .collect()
}

fn bench_next_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_generation");
    for size in [64, 128, 256] {
        let alive = make_alive(size, size);

        group.bench_with_input(BenchmarkId::new("sparse", size), &alive, |b, alive| {
            b.iter_batched(
                || alive.deep_copy(),
                |grid| SparseEngine.next_generation(&grid),
                BatchSize::LargeInput,
            );
        });

        let parallel = ParallelEngine::default();
        group.bench_with_input(BenchmarkId::new("parallel", size), &alive, |b, alive| {
            b.iter_batched(
                || alive.deep_copy(),
                |grid| parallel.next_generation(&grid),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_next_generation);
criterion_main!(benches);
