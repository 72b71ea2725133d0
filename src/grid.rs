use crate::Coord;
use metrohash::MetroBuildHasher;
use std::collections::HashSet;

/// Inclusive bounding box of the alive cells in a [`SparseGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub min_row: i64,
    pub min_col: i64,
    pub max_row: i64,
    pub max_col: i64,
}
impl Bounds {
    /// A box covering exactly one cell
    #[inline]
    fn single(pos: Coord) -> Self {
        Self {
            min_row: pos.row,
            min_col: pos.col,
            max_row: pos.row,
            max_col: pos.col,
        }
    }

    #[inline]
    fn extend(&mut self, pos: Coord) {
        self.min_row = self.min_row.min(pos.row);
        self.min_col = self.min_col.min(pos.col);
        self.max_row = self.max_row.max(pos.row);
        self.max_col = self.max_col.max(pos.col);
    }

    /// Number of columns covered (inclusive)
    ///
    /// A box spanning the whole `i64` range saturates at `u64::MAX`.
    #[inline]
    pub fn width(&self) -> u64 {
        self.max_col.abs_diff(self.min_col).saturating_add(1)
    }
    /// Number of rows covered (inclusive)
    #[inline]
    pub fn height(&self) -> u64 {
        self.max_row.abs_diff(self.min_row).saturating_add(1)
    }

    #[inline]
    pub fn top_left(&self) -> Coord {
        Coord::new(self.min_row, self.min_col)
    }
}

/// A half-open rectangle `[min_row, max_row) x [min_col, max_col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_row: i64,
    pub min_col: i64,
    pub max_row: i64,
    pub max_col: i64,
}
impl Region {
    pub fn new(top_left: Coord, bottom_right: Coord) -> Self {
        Self {
            min_row: top_left.row,
            min_col: top_left.col,
            max_row: bottom_right.row,
            max_col: bottom_right.col,
        }
    }

    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        (self.min_row..self.max_row).contains(&pos.row)
            && (self.min_col..self.max_col).contains(&pos.col)
    }
}

/// Sparse, unbounded set of alive cells
///
/// Dead cells are never stored. The bounding box is cached and maintained
/// lazily: insertions grow a valid box in place, removals only mark it stale,
/// and [`SparseGrid::bounds`] rescans the alive cells when it is stale.
#[derive(Debug, Clone, Default)]
pub struct SparseGrid {
    alive: HashSet<Coord, MetroBuildHasher>,
    bounds: Bounds,
    bounds_valid: bool,
}

impl SparseGrid {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cell at `(row, col)` is alive; every unset cell is dead
    #[inline]
    pub fn at(&self, row: i64, col: i64) -> bool {
        self.alive.contains(&Coord::new(row, col))
    }

    pub fn set(&mut self, row: i64, col: i64, alive: bool) {
        let pos = Coord::new(row, col);
        if alive {
            if self.alive.insert(pos) && self.bounds_valid {
                self.bounds.extend(pos);
            }
        } else if self.alive.remove(&pos) {
            // the box might have shrunk, recompute on the next query
            self.bounds_valid = false;
        }
    }

    /// Bounding box of every alive cell, `(0, 0, 0, 0)` when the grid is empty
    ///
    /// Takes `&mut self` because a stale cache is recomputed and stored.
    pub fn bounds(&mut self) -> Bounds {
        if !self.bounds_valid {
            self.bounds = self.scan_bounds();
            self.bounds_valid = true;
        }
        self.bounds
    }

    /// Same as [`SparseGrid::bounds`] but never touches the cache
    pub fn compute_bounds(&self) -> Bounds {
        if self.bounds_valid {
            self.bounds
        } else {
            self.scan_bounds()
        }
    }

    fn scan_bounds(&self) -> Bounds {
        let mut cells = self.alive.iter();
        let Some(&first) = cells.next() else {
            return Bounds::default();
        };
        let mut bounds = Bounds::single(first);
        for &pos in cells {
            bounds.extend(pos);
        }
        bounds
    }

    /// An independent copy, including the cached bounds state
    #[inline]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// One pass over every alive cell, in no particular order
    #[inline]
    pub fn alive_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.alive.iter().copied()
    }

    pub fn alive_cells_within(&self, region: Region) -> impl Iterator<Item = Coord> + '_ {
        self.alive_cells().filter(move |&pos| region.contains(pos))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alive.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            alive: HashSet::with_capacity_and_hasher(capacity, MetroBuildHasher::default()),
            bounds: Bounds::default(),
            bounds_valid: false,
        }
    }
}

impl PartialEq for SparseGrid {
    fn eq(&self, other: &Self) -> bool {
        self.alive == other.alive
    }
}
impl Eq for SparseGrid {}

impl Extend<Coord> for SparseGrid {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        for pos in iter {
            self.set(pos.row, pos.col, true);
        }
    }
}

impl FromIterator<Coord> for SparseGrid {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        let mut grid = Self::new();
        grid.extend(iter);
        grid
    }
}
