//! JSON run configuration.
//!
//! ```json
//! {
//!   "name": "valley",
//!   "glacier": { "length": 22000.0, "max_bed_height": 3900.0, "slope": 0.1 },
//!   "schedule": [[0, 2900.0], [10, 3100.0], [90, 3500.0]],
//!   "horizon_year": 500
//! }
//! ```
//!
//! `constants`, `delta_time`, `threshold` and `debug` are optional.

use crate::constants::{DEFAULT_DELTA_TIME_YEARS, E_FOLDING_THRESHOLD};
use crate::ela_schedule::ElaSchedule;
use crate::error::GlacierError;
use crate::glacier::{Glacier, GlacierConfig, PhysicalConstants};
use crate::sim::sim_op::SimOpHandle;
use crate::sim::{SimProps, Simulation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_name() -> String {
    "glacier".to_string()
}

fn default_delta_time() -> f64 {
    DEFAULT_DELTA_TIME_YEARS
}

fn default_threshold() -> f64 {
    E_FOLDING_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub constants: PhysicalConstants,
    pub glacier: GlacierConfig,
    pub schedule: ElaSchedule,
    pub horizon_year: u32,
    #[serde(default = "default_delta_time")]
    pub delta_time: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub debug: bool,
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<Self, GlacierError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GlacierError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| GlacierError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, GlacierError> {
        serde_json::to_string_pretty(self).map_err(GlacierError::from)
    }

    pub fn validate(&self) -> Result<(), GlacierError> {
        self.constants.validate()?;
        self.glacier.validate()?;
        if !(self.delta_time.is_finite() && self.delta_time > 0.0) {
            return Err(GlacierError::InvalidConfig(format!(
                "delta_time must be positive, got {}",
                self.delta_time
            )));
        }
        Ok(())
    }

    pub fn glacier(&self) -> Result<Glacier, GlacierError> {
        Glacier::new(self.glacier.clone(), self.constants)
    }

    /// A ready-to-run simulation with the given operators attached.
    pub fn into_simulation(self, ops: Vec<SimOpHandle>) -> Result<Simulation, GlacierError> {
        let glacier = self.glacier()?;
        Simulation::new(SimProps {
            name: self.name,
            glacier,
            schedule: self.schedule,
            horizon_year: self.horizon_year,
            delta_time: self.delta_time,
            threshold: self.threshold,
            ops,
            debug: self.debug,
        })
    }
}
