use super::{NeighborCounts, TickEngine, count_neighbors, is_next_alive};
use crate::{Coord, SparseGrid};
use rayon::prelude::*;

/// Multi-threaded variant of the sparse engine
///
/// The alive cells are split into bands, each band builds its own neighbor
/// counts on the rayon pool and the partial counts are merged before the rule
/// is applied. Produces exactly the same boards as [`super::SparseEngine`].
#[derive(Debug, Clone, Copy)]
pub struct ParallelEngine {
    min_chunk: usize,
}

impl ParallelEngine {
    const DEFAULT_MIN_CHUNK: usize = 1024;

    /// Smallest number of alive cells handed to a single task
    pub fn with_min_chunk(min_chunk: usize) -> Self {
        Self {
            min_chunk: min_chunk.max(1),
        }
    }

    /// Whether running on the rayon pool is worth it on this host
    pub fn available() -> bool {
        rayon::current_num_threads() > 1
    }

    fn chunk_len(&self, cells: usize) -> usize {
        let per_thread = cells.div_ceil(rayon::current_num_threads().max(1));
        per_thread.max(self.min_chunk)
    }
}

impl Default for ParallelEngine {
    fn default() -> Self {
        Self::with_min_chunk(Self::DEFAULT_MIN_CHUNK)
    }
}

/// Folds the smaller map into the larger one
fn merge_counts(mut a: NeighborCounts, mut b: NeighborCounts) -> NeighborCounts {
    if a.len() < b.len() {
        std::mem::swap(&mut a, &mut b);
    }
    for (pos, neighbors) in b {
        *a.entry(pos).or_insert(0) += neighbors;
    }
    a
}

impl TickEngine for ParallelEngine {
    fn next_generation(&self, source: &SparseGrid) -> SparseGrid {
        let cells: Vec<Coord> = source.alive_cells().collect();

        let counts = cells
            .par_chunks(self.chunk_len(cells.len()))
            .map(|band| {
                let mut counts = NeighborCounts::default();
                count_neighbors(band.iter().copied(), &mut counts);
                counts
            })
            .reduce(NeighborCounts::default, merge_counts);

        let alive: Vec<Coord> = counts
            .into_par_iter()
            .filter(|&(pos, neighbors)| is_next_alive(source, pos, neighbors))
            .map(|(pos, _)| pos)
            .collect();

        let mut next = SparseGrid::with_capacity(alive.len());
        next.extend(alive);
        next
    }
}
