//! Piecewise-constant ELA forcing.
//!
//! The value in force at year `t` is the one attached to the latest start
//! year `<= t`; the last value is held for the rest of the run.

use crate::error::GlacierError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElaStep {
    pub start_year: u32,
    pub ela: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(u32, f64)>", into = "Vec<(u32, f64)>")]
pub struct ElaSchedule {
    steps: Vec<ElaStep>,
}

impl ElaSchedule {
    /// Build from `(start_year, ela)` pairs with strictly increasing start years.
    pub fn new(pairs: Vec<(u32, f64)>) -> Result<Self, GlacierError> {
        if pairs.is_empty() {
            return Err(GlacierError::InvalidSchedule("schedule is empty".to_string()));
        }
        if let Some((year, ela)) = pairs.iter().find(|(_, ela)| !ela.is_finite()) {
            return Err(GlacierError::InvalidSchedule(format!(
                "ELA at year {} is not finite ({})",
                year, ela
            )));
        }
        if let Some(pair) = pairs.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(GlacierError::InvalidSchedule(format!(
                "start years must increase strictly, got {} then {}",
                pair[0].0, pair[1].0
            )));
        }
        let steps = pairs
            .into_iter()
            .map(|(start_year, ela)| ElaStep { start_year, ela })
            .collect();
        Ok(Self { steps })
    }

    /// A single ELA held from year 0.
    pub fn constant(ela: f64) -> Result<Self, GlacierError> {
        Self::new(vec![(0, ela)])
    }

    /// One value per `interval` years starting at year 0.
    pub fn periodic(values: &[f64], interval: u32) -> Result<Self, GlacierError> {
        if interval == 0 {
            return Err(GlacierError::InvalidSchedule("interval must be > 0".to_string()));
        }
        let pairs = values
            .iter()
            .enumerate()
            .map(|(i, &ela)| (i as u32 * interval, ela))
            .collect();
        Self::new(pairs)
    }

    pub fn steps(&self) -> &[ElaStep] {
        &self.steps
    }

    /// ELA in force at `year`, or `None` before the first start year.
    pub fn ela_at(&self, year: u32) -> Option<f64> {
        let idx = self.steps.partition_point(|step| step.start_year <= year);
        idx.checked_sub(1).map(|i| self.steps[i].ela)
    }

    /// ELA held once the last checkpoint has passed.
    pub fn final_ela(&self) -> f64 {
        self.steps[self.steps.len() - 1].ela
    }

    pub fn last_change_year(&self) -> u32 {
        self.steps[self.steps.len() - 1].start_year
    }
}

impl TryFrom<Vec<(u32, f64)>> for ElaSchedule {
    type Error = GlacierError;

    fn try_from(pairs: Vec<(u32, f64)>) -> Result<Self, Self::Error> {
        Self::new(pairs)
    }
}

impl From<ElaSchedule> for Vec<(u32, f64)> {
    fn from(schedule: ElaSchedule) -> Self {
        schedule
            .steps
            .into_iter()
            .map(|step| (step.start_year, step.ela))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECADES: [f64; 10] = [
        2900.0, 3100.0, 2800.0, 2700.0, 3000.0, 2800.0, 3400.0, 3300.0, 3200.0, 3500.0,
    ];

    #[test]
    fn decadal_checkpoints() {
        let schedule = ElaSchedule::periodic(&DECADES, 10).unwrap();
        assert_eq!(schedule.ela_at(0), Some(2900.0));
        assert_eq!(schedule.ela_at(9), Some(2900.0));
        assert_eq!(schedule.ela_at(10), Some(3100.0));
        assert_eq!(schedule.ela_at(89), Some(3200.0));
        assert_eq!(schedule.ela_at(90), Some(3500.0));
        assert_eq!(schedule.ela_at(500), Some(3500.0));
        assert_eq!(schedule.last_change_year(), 90);
        assert_eq!(schedule.final_ela(), 3500.0);
    }

    #[test]
    fn nothing_in_force_before_first_start() {
        let schedule = ElaSchedule::new(vec![(5, 3000.0), (20, 3100.0)]).unwrap();
        assert_eq!(schedule.ela_at(4), None);
        assert_eq!(schedule.ela_at(5), Some(3000.0));
    }

    #[test]
    fn rejects_bad_schedules() {
        assert!(ElaSchedule::new(vec![]).is_err());
        assert!(ElaSchedule::new(vec![(0, 3000.0), (0, 3100.0)]).is_err());
        assert!(ElaSchedule::new(vec![(10, 3000.0), (5, 3100.0)]).is_err());
        assert!(ElaSchedule::new(vec![(0, f64::NAN)]).is_err());
        assert!(ElaSchedule::periodic(&DECADES, 0).is_err());
    }

    #[test]
    fn deserializes_from_pairs() {
        let schedule: ElaSchedule = serde_json::from_str("[[0, 2900.0], [10, 3500.0]]").unwrap();
        assert_eq!(schedule.ela_at(15), Some(3500.0));
        let bad: Result<ElaSchedule, _> = serde_json::from_str("[[10, 2900.0], [0, 3500.0]]");
        assert!(bad.is_err());
    }
}
