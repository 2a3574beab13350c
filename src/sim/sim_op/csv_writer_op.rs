use crate::sim::Simulation;
use crate::sim::sim_op::{SimOp, SimOpHandle};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// CSV Writer Operator
///
/// Appends one row per simulated year to a CSV file:
/// - year: simulated year
/// - ela_m: ELA in force for that year
/// - length_m: glacier length after the step
/// - relaxation_fraction: `1 - length / initial length`
///
/// Write failures are reported on stderr and counted; they never abort the run.
pub struct CsvWriterOp {
    pub file_path: PathBuf,
    header_written: bool,
    failed_writes: usize,
}

impl CsvWriterOp {
    /// The file is created, or truncated, when the run starts.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            header_written: false,
            failed_writes: 0,
        }
    }

    pub fn handle(file_path: impl Into<PathBuf>) -> SimOpHandle {
        SimOpHandle::new(Box::new(Self::new(file_path)))
    }

    pub fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    fn write_header(&mut self) -> Result<(), std::io::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.file_path)?;

        writeln!(file, "year,ela_m,length_m,relaxation_fraction")?;
        self.header_written = true;
        Ok(())
    }

    fn write_row(&self, sim: &Simulation) -> Result<(), std::io::Error> {
        let state = sim.state();
        let (Some(year), Some(length)) = (state.last_year(), state.last_length()) else {
            return Ok(());
        };
        let ela = state.ela_history()[year as usize];

        let mut file = OpenOptions::new().append(true).open(&self.file_path)?;
        writeln!(
            file,
            "{},{:.1},{:.3},{:.6}",
            year,
            ela,
            length,
            sim.detector().relaxation_fraction(length)
        )?;
        Ok(())
    }
}

impl SimOp for CsvWriterOp {
    fn name(&self) -> &str {
        "CsvWriterOp"
    }

    fn init_sim(&mut self, _sim: &Simulation) {
        if let Err(e) = self.write_header() {
            self.failed_writes += 1;
            eprintln!("Warning: Failed to write CSV header to {}: {}", self.file_path.display(), e);
        }
    }

    fn update_sim(&mut self, sim: &Simulation) {
        if !self.header_written {
            return;
        }
        if let Err(e) = self.write_row(sim) {
            self.failed_writes += 1;
            eprintln!("Warning: Failed to write CSV data to {}: {}", self.file_path.display(), e);
        }
    }
}
