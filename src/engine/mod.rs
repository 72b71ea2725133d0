mod parallel;
mod rule;

pub use self::parallel::ParallelEngine;
use crate::{Coord, SparseGrid};
use metrohash::MetroBuildHasher;
use std::collections::HashMap;

/// Live neighbor count for every coordinate adjacent to at least one alive cell
pub(crate) type NeighborCounts = HashMap<Coord, u8, MetroBuildHasher>;

/// Computes the next generation of a board
///
/// Implementations must be interchangeable: for the same source every engine
/// returns the same set of alive cells.
pub trait TickEngine {
    fn next_generation(&self, source: &SparseGrid) -> SparseGrid;
}

/// Builds the neighbor counts contributed by `cells` into `counts`
pub(crate) fn count_neighbors<I>(cells: I, counts: &mut NeighborCounts)
where
    I: IntoIterator<Item = Coord>,
{
    for pos in cells {
        for neighbor in pos.neighbors() {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
    }
}

/// Whether `pos` survives or is born given its neighbor count
#[inline]
pub(crate) fn is_next_alive(source: &SparseGrid, pos: Coord, neighbors: u8) -> bool {
    rule::next_state(source.at(pos.row, pos.col), neighbors)
}

/// Reference engine: sparse neighbor counting on a single thread
///
/// Only coordinates next to an alive cell are ever visited, so the cost
/// follows the population rather than the area of the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseEngine;

impl TickEngine for SparseEngine {
    fn next_generation(&self, source: &SparseGrid) -> SparseGrid {
        let mut counts = NeighborCounts::default();
        count_neighbors(source.alive_cells(), &mut counts);

        let mut next = SparseGrid::with_capacity(source.len());
        next.extend(
            counts
                .into_iter()
                .filter(|&(pos, neighbors)| is_next_alive(source, pos, neighbors))
                .map(|(pos, _)| pos),
        );
        next
    }
}

/// Engine chosen once at startup
#[derive(Debug, Clone, Copy)]
pub enum SwitchEngine {
    Sparse(SparseEngine),
    Parallel(ParallelEngine),
}
impl SwitchEngine {
    /// Picks the parallel engine when it is available, else the reference one
    pub fn probe() -> Self {
        let engine = if ParallelEngine::available() {
            Self::Parallel(ParallelEngine::default())
        } else {
            Self::Sparse(SparseEngine)
        };
        log::debug!("selected tick engine: {}", engine.name());
        engine
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sparse(_) => "sparse",
            Self::Parallel(_) => "parallel",
        }
    }
}
impl Default for SwitchEngine {
    fn default() -> Self {
        Self::Sparse(SparseEngine)
    }
}
impl TickEngine for SwitchEngine {
    fn next_generation(&self, source: &SparseGrid) -> SparseGrid {
        match self {
            Self::Sparse(e) => e.next_generation(source),
            Self::Parallel(e) => e.next_generation(source),
        }
    }
}
