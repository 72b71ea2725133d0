use crate::{Coord, SparseGrid};
use regex::Regex;
use std::{io, sync::OnceLock};
use thiserror::Error;

/// Failure to turn RLE text into a grid
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid RLE header: {0:?}")]
    InvalidHeader(String),
    #[error("missing RLE header")]
    MissingHeader,
    #[error("invalid RLE body: {0}")]
    InvalidBody(String),
}

/// Failure to load an RLE pattern from a byte stream
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("could not read pattern: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub trait PatternCodec {
    fn encode(&self, grid: &SparseGrid) -> String;
    fn decode(&self, value: &str) -> Result<SparseGrid, ParseError>;
}

/// Accumulates `<count><tag>` runs, merging consecutive equal tags
struct RunEncoder {
    sequence: String,
    run: u64,
    tag: char,
}
impl RunEncoder {
    fn new() -> Self {
        Self {
            sequence: String::new(),
            run: 0,
            tag: 'b',
        }
    }

    fn push(&mut self, tag: char) {
        if self.run > 0 && self.tag != tag {
            self.flush();
        }
        self.tag = tag;
        self.run += 1;
    }

    fn flush(&mut self) {
        match self.run {
            0 => {}
            1 => self.sequence.push(self.tag),
            n => self.sequence.push_str(&format!("{}{}", n, self.tag)),
        }
        self.run = 0;
    }

    fn end_row(&mut self, last: bool) {
        self.flush();
        if !last {
            self.sequence.push_str("$\n");
        }
    }

    fn end(mut self) -> String {
        self.flush();
        self.sequence.push_str("!\n");
        self.sequence
    }
}

/// The Game of Life RLE pattern format
///
/// Export always anchors the bounding box of the alive cells at `(0, 0)`,
/// which is also where import places the top-left of a pattern.
#[derive(Debug, Clone, Default)]
pub struct RunLengthEncoded {
    name: Option<String>,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    fn header_re() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)").expect("valid header pattern")
        })
    }
    /// Parses `x = <cols>, y = <rows>` into `(cols, rows)`
    fn decode_header(line: &str) -> Result<(u64, u64), ParseError> {
        let invalid = || ParseError::InvalidHeader(line.to_owned());
        let caps = Self::header_re().captures(line).ok_or_else(invalid)?;
        let cols = caps[1].parse::<u64>().map_err(|_| invalid())?;
        let rows = caps[2].parse::<u64>().map_err(|_| invalid())?;
        if cols == 0 || rows == 0 {
            return Err(ParseError::MissingHeader);
        }
        Ok((cols, rows))
    }

    /// Moves `from` forward by `run` steps along one axis
    fn advance(from: i64, run: u64) -> Result<i64, ParseError> {
        i64::try_from(run)
            .ok()
            .and_then(|run| from.checked_add(run))
            .ok_or_else(|| ParseError::InvalidBody(format!("run of {} leaves the board", run)))
    }

    /// Walks the run tokens of a pattern body
    ///
    /// A count of 0 or no count at all means a single step. Characters other
    /// than digits and `b`, `o`, `$`, `!` are skipped and leave a pending
    /// count in place. At most `max_alive` cells are created.
    fn decode_cells(body: &str, max_alive: u64) -> Result<SparseGrid, ParseError> {
        let mut grid = SparseGrid::new();
        let mut cursor = Coord::zero();
        let mut alive: u64 = 0;
        let mut count: u64 = 0;
        for ch in body.chars() {
            if let Some(digit) = ch.to_digit(10) {
                count = count
                    .checked_mul(10)
                    .and_then(|count| count.checked_add(u64::from(digit)))
                    .ok_or_else(|| ParseError::InvalidBody("run count overflows".to_owned()))?;
                continue;
            }

            let run = count.max(1);
            match ch {
                '!' => break,
                'o' => {
                    alive = alive.saturating_add(run);
                    if alive > max_alive {
                        return Err(ParseError::InvalidBody(format!(
                            "more than {} alive cells",
                            max_alive
                        )));
                    }
                    let end = Self::advance(cursor.col, run)?;
                    for col in cursor.col..end {
                        grid.set(cursor.row, col, true);
                    }
                    cursor.col = end;
                }
                'b' => cursor.col = Self::advance(cursor.col, run)?,
                '$' => {
                    cursor.col = 0;
                    cursor.row = Self::advance(cursor.row, run)?;
                }
                _ => continue,
            }
            count = 0;
        }
        Ok(grid)
    }

    fn encode_header(&self, cols: u64, rows: u64) -> String {
        let mut header = String::new();
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        header.push_str(&format!("x = {}, y = {}\n", cols, rows));
        header
    }
}

impl PatternCodec for RunLengthEncoded {
    fn encode(&self, grid: &SparseGrid) -> String {
        let bounds = grid.compute_bounds();
        let origin = bounds.top_left();

        let mut seq = RunEncoder::new();
        for row in 0..bounds.height() {
            for col in 0..bounds.width() {
                let pos = origin + Coord::new(row as i64, col as i64);
                seq.push(if grid.at(pos.row, pos.col) { 'o' } else { 'b' });
            }
            seq.end_row(row + 1 == bounds.height());
        }

        format!(
            "{}{}",
            self.encode_header(bounds.width(), bounds.height()),
            seq.end()
        )
    }

    fn decode(&self, value: &str) -> Result<SparseGrid, ParseError> {
        let mut lines = value
            .lines()
            .map(str::trim)
            .filter(|line| !(line.is_empty() || line.starts_with('#') || line.starts_with('+')));

        let header = lines.next().ok_or(ParseError::MissingHeader)?;
        let (cols, rows) = Self::decode_header(header)?;
        log::debug!("decoding RLE pattern of {}x{}", cols, rows);

        let body = lines.collect::<String>();
        Self::decode_cells(&body, cols.saturating_mul(rows))
    }
}

/// Reads an RLE pattern from any byte stream
pub fn read_rle<R: io::Read>(mut reader: R) -> Result<SparseGrid, ReadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(RunLengthEncoded::default().decode(&text)?)
}
