mod csv_writer_op;
mod progress_reporter_op;

pub use csv_writer_op::CsvWriterOp;
pub use progress_reporter_op::ProgressReporterOp;

use crate::sim::Simulation;

/// Observer hooked into the evolution loop.
///
/// Operators read the simulation after each step; the glacier itself is only
/// ever advanced by the driver.
pub trait SimOp {
    /// The name of this operator (for identification and lookup)
    fn name(&self) -> &str;

    /// Called once before the first step
    fn init_sim(&mut self, _sim: &Simulation) {}

    /// Called after every successful step
    fn update_sim(&mut self, _sim: &Simulation) {}

    /// Called once when the run ends, including runs aborted by an error
    fn after_sim(&mut self, _sim: &Simulation) {}
}

pub struct SimOpHandle {
    pub op: Box<dyn SimOp>,
}

impl SimOpHandle {
    pub fn new(op: Box<dyn SimOp>) -> Self {
        SimOpHandle { op }
    }
}
