//! Sparse, unbounded Conway's Game of Life with RLE pattern import and export.

pub mod enc;
pub mod engine;
pub mod game;
pub mod grid;
pub mod playback;
pub mod pos;

pub use enc::{ParseError, PatternCodec, RunLengthEncoded};
pub use engine::{ParallelEngine, SparseEngine, SwitchEngine, TickEngine};
pub use game::GameState;
pub use grid::{Bounds, Region, SparseGrid};
pub use pos::Coord;
