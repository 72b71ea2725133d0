use lifegrid::SparseGrid;
use std::{
    io::{self, Write},
    time::Instant,
};

/// Population snapshot of a single generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    generation: u64,
    alive: usize,
    width: u64,
    height: u64,
}
impl Sample {
    fn of(generation: u64, grid: &SparseGrid) -> Self {
        let bounds = grid.compute_bounds();
        Self {
            generation,
            alive: grid.len(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

pub trait Recorder {
    type Str: AsRef<str>;

    fn record(&mut self, generation: u64, grid: &SparseGrid);

    fn has_report(&self) -> bool;
    fn report(&mut self) -> Self::Str;
}

pub struct SimpleRecord {
    last_sample: Sample,
    gens_in_report: usize,
    last_report: Instant,
}
impl SimpleRecord {
    pub fn new(generation: u64, grid: &SparseGrid) -> Self {
        Self {
            last_sample: Sample::of(generation, grid),
            gens_in_report: 0,
            last_report: Instant::now(),
        }
    }
}
impl Recorder for SimpleRecord {
    type Str = String;

    fn record(&mut self, generation: u64, grid: &SparseGrid) {
        self.gens_in_report += 1;
        self.last_sample = Sample::of(generation, grid);
    }

    fn has_report(&self) -> bool {
        self.last_report.elapsed().as_millis() >= 500
    }
    fn report(&mut self) -> Self::Str {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        // reset stats for next report
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        let sample = self.last_sample;
        format!(
            "{:.02}gen/s gen:{}, alive:{}, bounds:{}x{}",
            gens_per_sec, sample.generation, sample.alive, sample.width, sample.height
        )
    }
}

pub struct CsvRecord {
    inner: SimpleRecord,
    data: Vec<(u128, Sample)>,
    last: Instant,
}
impl CsvRecord {
    pub fn new(generation: u64, grid: &SparseGrid) -> Self {
        Self {
            inner: SimpleRecord::new(generation, grid),
            data: Vec::new(),
            last: Instant::now(),
        }
    }

    pub fn write_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"gen,delta_t,alive,width,height\n")?;
        for (delta, sample) in &self.data {
            writeln!(
                out,
                "{},{},{},{},{}",
                sample.generation, delta, sample.alive, sample.width, sample.height
            )?;
        }
        out.flush()
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(io::BufWriter::new(file))
    }
}
impl Recorder for CsvRecord {
    type Str = <SimpleRecord as Recorder>::Str;

    fn record(&mut self, generation: u64, grid: &SparseGrid) {
        let delta = self.last.elapsed().as_micros();
        self.last = Instant::now();

        self.data.push((delta, Sample::of(generation, grid)));
        self.inner.record(generation, grid);
    }

    fn has_report(&self) -> bool {
        self.inner.has_report()
    }
    fn report(&mut self) -> Self::Str {
        self.inner.report()
    }
}

pub enum SwitchRecorder {
    Csv(CsvRecord),
    Simple(SimpleRecord),
}
impl SwitchRecorder {
    pub fn new(generation: u64, grid: &SparseGrid, csv: bool) -> Self {
        if csv {
            Self::Csv(CsvRecord::new(generation, grid))
        } else {
            Self::Simple(SimpleRecord::new(generation, grid))
        }
    }
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        match self {
            Self::Csv(r) => r.save(path),
            Self::Simple(_) => Err(io::Error::other(
                "statistics were not recorded, enable csv recording first",
            )),
        }
    }
}
impl Recorder for SwitchRecorder {
    type Str = String;

    fn record(&mut self, generation: u64, grid: &SparseGrid) {
        match self {
            Self::Csv(r) => r.record(generation, grid),
            Self::Simple(r) => r.record(generation, grid),
        }
    }
    fn has_report(&self) -> bool {
        match self {
            Self::Csv(r) => r.has_report(),
            Self::Simple(r) => r.has_report(),
        }
    }
    fn report(&mut self) -> Self::Str {
        match self {
            Self::Csv(r) => r.report(),
            Self::Simple(r) => r.report(),
        }
    }
}
