pub mod basins;
pub mod config;
pub mod constants;
pub mod ela_schedule;
pub mod error;
pub mod glacier;
pub mod math_utils;
pub mod sim;
pub mod sweep;

pub use ela_schedule::ElaSchedule;
pub use error::GlacierError;
pub use glacier::{Glacier, GlacierConfig, IsostaticConvention, PhysicalConstants};
pub use sim::{SimProps, Simulation, SteadyStateRecord};
