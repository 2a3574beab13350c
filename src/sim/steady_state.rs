//! First-crossing detector for the relaxation of glacier length.
//!
//! The detector compares each new length with the length at the start of the
//! run. Once the fractional loss `1 - L / L0` exceeds the threshold, the year
//! and length are latched and never overwritten. It does not check that the
//! trajectory is monotone, so an oscillating run can latch on an
//! intermediate crossing.

use crate::constants::E_FOLDING_THRESHOLD;
use crate::error::GlacierError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateRecord {
    pub year: u32,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateDetector {
    initial_length: f64,
    threshold: f64,
    record: Option<SteadyStateRecord>,
}

impl SteadyStateDetector {
    pub fn new(initial_length: f64, threshold: f64) -> Result<Self, GlacierError> {
        if !threshold.is_finite() {
            return Err(GlacierError::InvalidConfig(format!(
                "steady-state threshold must be finite, got {}",
                threshold
            )));
        }
        Ok(Self {
            initial_length,
            threshold,
            record: None,
        })
    }

    /// Detector latching once the glacier has lost `1/e` of its initial length.
    pub fn e_folding(initial_length: f64) -> Self {
        Self {
            initial_length,
            threshold: E_FOLDING_THRESHOLD,
            record: None,
        }
    }

    pub fn initial_length(&self) -> f64 {
        self.initial_length
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `1 - length / initial_length`; zero for a run that started without ice.
    pub fn relaxation_fraction(&self, length: f64) -> f64 {
        if self.initial_length > 0.0 {
            1.0 - length / self.initial_length
        } else {
            0.0
        }
    }

    /// Feed one sample. Returns the record only on the step that latches it.
    pub fn observe(&mut self, year: u32, length: f64) -> Option<SteadyStateRecord> {
        if self.record.is_some() {
            return None;
        }
        if self.relaxation_fraction(length) > self.threshold {
            let record = SteadyStateRecord { year, length };
            self.record = Some(record);
            return Some(record);
        }
        None
    }

    pub fn found(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<SteadyStateRecord> {
        self.record
    }
}
