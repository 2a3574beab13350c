pub mod sim_op;
pub mod steady_state;
mod simulation;

pub use simulation::{EvolutionState, SimProps, Simulation};
pub use steady_state::{SteadyStateDetector, SteadyStateRecord};
