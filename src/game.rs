use crate::{
    Coord, PatternCodec, RunLengthEncoded, SparseGrid,
    enc::ParseError,
    engine::{SparseEngine, TickEngine},
};

/// Double-buffered Game of Life board
///
/// One buffer is the current board, the other receives the next generation on
/// [`GameState::tick`] before the two swap roles. The pattern the game was
/// created from is kept so the board can be reset.
#[derive(Debug)]
pub struct GameState<E: TickEngine = SparseEngine> {
    buffers: [SparseGrid; 2],
    use_first: bool,
    generation: u64,
    initial: SparseGrid,
    engine: E,
}

impl GameState<SparseEngine> {
    pub fn new(initial: SparseGrid) -> Self {
        Self::with_engine(initial, SparseEngine)
    }
}

impl<E: TickEngine> GameState<E> {
    pub fn with_engine(initial: SparseGrid, engine: E) -> Self {
        let mut state = Self {
            buffers: [SparseGrid::new(), SparseGrid::new()],
            use_first: true,
            generation: 1,
            initial,
            engine,
        };
        state.reset();
        state
    }

    /// Index of the current buffer
    #[inline]
    fn current_idx(&self) -> usize {
        if self.use_first { 0 } else { 1 }
    }

    /// Advances the board by one generation
    pub fn tick(&mut self) {
        let src = self.current_idx();
        let next = self.engine.next_generation(&self.buffers[src]);
        self.buffers[1 - src] = next;
        self.use_first = !self.use_first;
        self.generation += 1;
    }

    pub fn tick_n(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    #[inline]
    pub fn current(&self) -> &SparseGrid {
        &self.buffers[self.current_idx()]
    }
    #[inline]
    pub fn current_mut(&mut self) -> &mut SparseGrid {
        let idx = self.current_idx();
        &mut self.buffers[idx]
    }

    /// Flips a single cell of the current board, returning its new state
    pub fn toggle(&mut self, row: i64, col: i64) -> bool {
        let board = self.current_mut();
        let alive = !board.at(row, col);
        board.set(row, col, alive);
        alive
    }

    /// Generation number of the current board, starting at 1
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[inline]
    pub fn initial(&self) -> &SparseGrid {
        &self.initial
    }

    /// Restores both buffers to the initial pattern at generation 1
    pub fn reset(&mut self) {
        self.buffers = [self.initial.deep_copy(), self.initial.deep_copy()];
        self.use_first = true;
        self.generation = 1;
    }

    /// Replaces the initial pattern and resets to it
    pub fn load(&mut self, pattern: SparseGrid) {
        self.initial = pattern;
        self.reset();
    }

    /// Loads an RLE pattern, leaving the game untouched when it does not parse
    pub fn import(&mut self, text: &str) -> Result<(), ParseError> {
        let pattern = RunLengthEncoded::default().decode(text)?;
        log::debug!("imported pattern with {} alive cells", pattern.len());
        self.load(pattern);
        Ok(())
    }

    /// The current board as RLE text
    pub fn export(&self) -> String {
        RunLengthEncoded::default().encode(self.current())
    }
}

impl Default for GameState<SparseEngine> {
    /// A game seeded with a single glider
    fn default() -> Self {
        Self::new(glider())
    }
}

/// The default seed: a glider heading towards the bottom right
pub fn glider() -> SparseGrid {
    [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]
        .into_iter()
        .map(|(row, col)| Coord::new(row, col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ParallelEngine;

    fn blinker() -> SparseGrid {
        [(2, 1), (2, 2), (2, 3)]
            .into_iter()
            .map(|(row, col)| Coord::new(row, col))
            .collect()
    }

    #[test]
    fn starts_at_generation_one_with_copies() {
        let game = GameState::new(blinker());

        assert_eq!(game.generation(), 1);
        assert_eq!(game.current(), &blinker());
        assert_eq!(game.buffers[0], game.buffers[1]);
    }

    #[test]
    fn tick_swaps_buffers_and_counts() {
        let mut game = GameState::new(blinker());
        game.tick();

        assert_eq!(game.generation(), 2);
        assert!(!game.use_first);
        assert!(game.current().at(1, 2) && game.current().at(3, 2));
        // the previous generation is still in the other buffer
        assert_eq!(game.buffers[0], blinker());

        game.tick();
        assert_eq!(game.generation(), 3);
        assert_eq!(game.current(), &blinker());
    }

    #[test]
    fn tick_overwrites_stale_destination() {
        let mut game = GameState::new(blinker());
        game.tick();
        // edit the current board, then make sure the stale buffer is fully replaced
        game.toggle(-50, -50);
        game.buffers[0].set(100, 100, true);
        game.tick();

        assert!(!game.current().at(100, 100));
        assert!(!game.current().at(-50, -50));
    }

    #[test]
    fn toggle_edits_current_board() {
        let mut game = GameState::new(SparseGrid::new());

        assert!(game.toggle(-5, -5));
        assert!(game.current().at(-5, -5));
        assert!(!game.toggle(-5, -5));
        assert!(game.current().is_empty());
        assert!(game.initial().is_empty());
    }

    #[test]
    fn reset_restores_initial_pattern() {
        let mut game: GameState = GameState::default();
        game.tick_n(7);
        game.toggle(40, 40);
        game.reset();

        assert_eq!(game.generation(), 1);
        assert_eq!(game.current(), &glider());
    }

    #[test]
    fn failed_import_keeps_state() {
        let mut game = GameState::new(blinker());
        game.tick();
        let before = game.current().deep_copy();

        assert!(game.import("not a header\n3o!").is_err());
        assert_eq!(game.generation(), 2);
        assert_eq!(game.current(), &before);
    }

    #[test]
    fn import_replaces_initial_and_resets() {
        let mut game = GameState::new(blinker());
        game.tick_n(3);
        game.import("x = 2, y = 2\n2o$2o!").expect("import block");

        assert_eq!(game.generation(), 1);
        assert_eq!(game.current().len(), 4);
        game.tick_n(5);
        game.reset();
        assert_eq!(game.current(), game.initial());
    }

    #[test]
    fn export_uses_current_board() {
        let mut game = GameState::new(blinker());
        game.tick();

        assert_eq!(game.export(), "x = 1, y = 3\no$\no$\no!\n");
    }

    #[test]
    fn engines_produce_same_history() {
        let mut sparse: GameState = GameState::default();
        let mut parallel = GameState::with_engine(glider(), ParallelEngine::with_min_chunk(1));

        for _ in 0..12 {
            sparse.tick();
            parallel.tick();
            assert_eq!(sparse.current(), parallel.current());
        }
    }
}
