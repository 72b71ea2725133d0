use std::{fmt::Display, str::FromStr, time::Duration};

use anyhow::{Result, anyhow, bail};
use lifegrid::{Coord, SparseGrid, game};

pub struct Args {
    matches: getopts::Matches,
}

impl Args {
    fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("", "serial", "always use the single-threaded engine");
        opts.optopt("o", "output", "write the final board as RLE", "FILE");
        opts.optopt("i", "input", "RLE pattern to start from", "FILE");
        opts.optopt("n", "name", "pattern name stored in the output", "NAME");
        opts.optopt("w", "width", "set fill width", "WIDTH");
        opts.optopt("h", "height", "set fill height", "HEIGHT");
        opts.optopt(
            "f",
            "fill",
            "initial fill: glider, random, alternating, all or empty",
            "TYPE",
        );
        opts.optopt(
            "s",
            "sleep",
            "the amount of time to sleep between generations",
            "MILLIS",
        );
        opts.optopt("g", "gens", "number of generations to run", "COUNT");
        opts.optopt("", "stats", "write stats csv to file", "FILE");

        let matches = opts.parse(args.iter().map(T::as_ref))?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: lifegrid [options]"));
            Ok(None)
        } else {
            Ok(Some(Self { matches }))
        }
    }
    pub fn from_env() -> Result<Option<Self>> {
        let env = std::env::args().skip(1).collect::<Vec<_>>();
        Self::new(&env)
    }

    fn opt_num<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.matches
            .opt_get(name)
            .map_err(|err| anyhow!("invalid value for --{}: {}", name, err))
    }

    pub fn serial(&self) -> bool {
        self.matches.opt_present("serial")
    }

    pub fn generations(&self) -> Result<u64> {
        Ok(self.opt_num("gens")?.unwrap_or(100))
    }
    pub fn sleep(&self) -> Result<Option<Duration>> {
        Ok(self.opt_num("sleep")?.map(Duration::from_millis))
    }

    pub fn grid_size(&self) -> Result<(i64, i64)> {
        let width = self.opt_num("width")?.unwrap_or(500);
        let height = self.opt_num("height")?.unwrap_or(500);
        if width < 0 || height < 0 {
            bail!("fill size must not be negative");
        }
        Ok((width, height))
    }
    pub fn fill_mode(&self) -> Result<FillMode> {
        let mode_str = self.matches.opt_str("fill");
        let mode_str = mode_str.as_deref().unwrap_or("glider");
        FillMode::new(mode_str).ok_or_else(|| anyhow!("unknown fill mode {:?}", mode_str))
    }

    pub fn output_file(&self) -> Option<String> {
        self.matches.opt_str("output")
    }
    pub fn input_file(&self) -> Option<String> {
        self.matches.opt_str("input")
    }
    pub fn name(&self) -> Option<String> {
        self.matches.opt_str("name")
    }

    pub fn stats_file(&self) -> Option<String> {
        self.matches.opt_str("stats")
    }
}

pub enum FillMode {
    Glider,
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "glider" => Some(Self::Glider),
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn fill_cell<R: rand::Rng>(&self, cell: Coord, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.row + cell.col) % 2 == 0,
            Self::All => true,
            Self::Glider | Self::Empty => false,
        }
    }

    /// Builds the starting board; the size is ignored by the glider seed
    pub fn create_alive(self, w: i64, h: i64) -> SparseGrid {
        match self {
            Self::Glider => return game::glider(),
            Self::Empty => return SparseGrid::new(),
            _ => {}
        }

        let mut rng = rand::rng();
        let mut alive = SparseGrid::new();
        for row in 0..h {
            for col in 0..w {
                let cell = Coord::new(row, col);
                if self.fill_cell(cell, &mut rng) {
                    alive.set(row, col, true);
                }
            }
        }
        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::new(argv).expect("parse args").expect("not help")
    }

    fn sorted(grid: &SparseGrid) -> Vec<Coord> {
        let mut cells: Vec<_> = grid.alive_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert!(matches!(args.fill_mode(), Ok(FillMode::Alternating)));
    }

    #[test]
    fn fill_mode_defaults_to_glider() {
        assert!(matches!(args(&[]).fill_mode(), Ok(FillMode::Glider)));
    }

    #[test]
    fn unknown_fill_mode_is_an_error() {
        assert!(args(&["--fill", "checkers"]).fill_mode().is_err());
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(args(&["--gens", "many"]).generations().is_err());
        assert!(args(&["--width=-3"]).grid_size().is_err());
    }

    #[test]
    fn numeric_options_parse() {
        let args = args(&["-g", "42", "-s", "10", "-w", "3", "-h", "2", "--serial"]);

        assert_eq!(args.generations().ok(), Some(42));
        assert_eq!(args.sleep().ok(), Some(Some(Duration::from_millis(10))));
        assert_eq!(args.grid_size().ok(), Some((3, 2)));
        assert!(args.serial());
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).expect("parse help").is_none());
    }

    #[test]
    fn create_alive_all_fills_grid() {
        let alive = FillMode::All.create_alive(3, 2);

        let expected = vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(0, 2),
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(1, 2),
        ];
        assert_eq!(sorted(&alive), expected);
    }

    #[test]
    fn create_alive_empty_is_empty() {
        let alive = FillMode::Empty.create_alive(5, 4);

        assert!(alive.is_empty());
    }

    #[test]
    fn create_alive_alternating_uses_parity() {
        let alive = FillMode::Alternating.create_alive(3, 3);

        let expected = vec![
            Coord::new(0, 0),
            Coord::new(0, 2),
            Coord::new(1, 1),
            Coord::new(2, 0),
            Coord::new(2, 2),
        ];
        assert_eq!(sorted(&alive), expected);
    }

    #[test]
    fn create_alive_random_is_within_bounds() {
        let (w, h) = (4, 3);
        let alive = FillMode::Random.create_alive(w, h);

        assert!(
            alive
                .alive_cells()
                .all(|p| p.col >= 0 && p.row >= 0 && p.col < w && p.row < h)
        );
    }

    #[test]
    fn create_alive_glider_ignores_size() {
        assert_eq!(FillMode::Glider.create_alive(1, 1), game::glider());
    }
}
