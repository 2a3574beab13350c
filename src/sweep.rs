//! Parameter sweeps over independent glacier instances.
//!
//! Every sweep point builds its own [`Glacier`] from the base configuration,
//! so no point can observe a mutation made for another.

use crate::error::GlacierError;
use crate::glacier::{CrossSection, Glacier};
use serde::{Deserialize, Serialize};

/// One labelled curve of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl SweepSeries {
    fn collect<F>(label: String, xs: &[f64], mut f: F) -> Result<Self, GlacierError>
    where
        F: FnMut(f64) -> Result<f64, GlacierError>,
    {
        let points = xs
            .iter()
            .map(|&x| f(x).map(|y| (x, y)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { label, points })
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.0).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.1).collect()
    }
}

/// Cross-section of an isostatically loaded glacier for one mantle density.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityProfile {
    pub mantle_density: f64,
    pub section: CrossSection,
}

fn label(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

pub fn mantle_density_sweep(
    base: &Glacier,
    densities: &[f64],
    resolution: f64,
) -> Result<Vec<DensityProfile>, GlacierError> {
    densities
        .iter()
        .map(|&density| {
            let config = base
                .config()
                .clone()
                .with_isostatic(true)
                .with_mantle_density(density);
            let glacier = base.with_config(config)?;
            Ok(DensityProfile {
                mantle_density: density,
                section: glacier.profile(resolution)?,
            })
        })
        .collect()
}

/// Linear equilibrium length against ELA, one series per slope.
pub fn equilibrium_length_by_ela(
    base: &Glacier,
    slopes: &[f64],
    elas: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    slopes
        .iter()
        .map(|&slope| {
            let glacier = base.with_config(base.config().clone().with_slope(slope))?;
            SweepSeries::collect(label(slope), elas, |ela| {
                glacier.linear_equilibrium_length(ela, None)
            })
        })
        .collect()
}

/// Linear equilibrium length against slope, one series per ELA.
pub fn equilibrium_length_by_slope(
    base: &Glacier,
    elas: &[f64],
    slopes: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    elas.iter()
        .map(|&ela| {
            SweepSeries::collect(label(ela), slopes, |slope| {
                base.with_config(base.config().clone().with_slope(slope))?
                    .linear_equilibrium_length(ela, None)
            })
        })
        .collect()
}

/// `-(2 / s) dE` against ELA change, one series per slope.
pub fn length_change_by_ela_change(
    slopes: &[f64],
    ela_changes: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    slopes
        .iter()
        .map(|&slope| {
            SweepSeries::collect(label(slope), ela_changes, |change| {
                Glacier::length_change(change, slope)
            })
        })
        .collect()
}

/// `-(2 / s) dE` against slope, one series per ELA change.
pub fn length_change_by_slope(
    ela_changes: &[f64],
    slopes: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    ela_changes
        .iter()
        .map(|&change| {
            SweepSeries::collect(label(change), slopes, |slope| {
                Glacier::length_change(change, slope)
            })
        })
        .collect()
}

/// Fractional length change at a fixed ELA, one series per slope.
pub fn fractional_change_by_ela_change(
    base: &Glacier,
    ela: f64,
    slopes: &[f64],
    ela_changes: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    slopes
        .iter()
        .map(|&slope| {
            SweepSeries::collect(label(slope), ela_changes, |change| {
                base.fractional_length_change(ela, change, slope)
            })
        })
        .collect()
}

/// Fractional length change for a fixed ELA shift, one series per ELA.
pub fn fractional_change_by_slope(
    base: &Glacier,
    ela_change: f64,
    elas: &[f64],
    slopes: &[f64],
) -> Result<Vec<SweepSeries>, GlacierError> {
    elas.iter()
        .map(|&ela| {
            SweepSeries::collect(label(ela), slopes, |slope| {
                base.fractional_length_change(ela, ela_change, slope)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glacier::GlacierConfig;
    use crate::math_utils::arange;
    use approx::assert_relative_eq;
    use more_asserts::{assert_gt, assert_lt};

    fn alpine() -> Glacier {
        Glacier::with_defaults(GlacierConfig::new(0.0, 5500.0, 0.0)).unwrap()
    }

    #[test]
    fn density_sweep_leaves_base_untouched() {
        let base = Glacier::with_defaults(GlacierConfig::new(100_000.0, 0.0, 0.0)).unwrap();
        let profiles = mantle_density_sweep(&base, &[3410.0, 3350.0, 3270.0], 1000.0).unwrap();
        assert_eq!(profiles.len(), 3);
        assert!(!base.config().isostatic);
        assert_gt!(
            profiles[0].section.max_surface_height(),
            profiles[2].section.max_surface_height()
        );
        for profile in &profiles {
            assert_lt!(profile.section.min_bed_depth(), 0.0);
        }
    }

    #[test]
    fn steeper_beds_give_shorter_glaciers() {
        let slopes = arange(0.05, 0.30, 0.05);
        let elas = arange(4000.0, 5100.0, 100.0);
        let series = equilibrium_length_by_ela(&alpine(), &slopes, &elas).unwrap();
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].label, "0.05");
        for pair in series.windows(2) {
            assert_gt!(pair[0].points[0].1, pair[1].points[0].1);
        }
        // raising the ELA shortens the glacier
        let ys = series[0].ys();
        assert!(ys.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn by_slope_is_the_transpose_of_by_ela() {
        let slopes = [0.1, 0.2];
        let elas = [4000.0, 4500.0];
        let by_ela = equilibrium_length_by_ela(&alpine(), &slopes, &elas).unwrap();
        let by_slope = equilibrium_length_by_slope(&alpine(), &elas, &slopes).unwrap();
        for (i, _) in slopes.iter().enumerate() {
            for (j, _) in elas.iter().enumerate() {
                assert_relative_eq!(by_ela[i].points[j].1, by_slope[j].points[i].1);
            }
        }
    }

    #[test]
    fn length_change_sweeps() {
        let changes = arange(100.0, 510.0, 100.0);
        let by_change = length_change_by_ela_change(&[0.1], &changes).unwrap();
        assert_eq!(by_change[0].xs(), changes);
        assert_relative_eq!(by_change[0].points[0].1, -2000.0);
        let by_slope = length_change_by_slope(&[250.0], &[0.05, 0.25]).unwrap();
        assert_relative_eq!(by_slope[0].points[1].1, -2000.0);
    }

    #[test]
    fn fractional_sweeps() {
        let base = alpine();
        let by_change = fractional_change_by_ela_change(&base, 4500.0, &[0.1], &[250.0]).unwrap();
        let by_slope = fractional_change_by_slope(&base, 250.0, &[4500.0], &[0.1]).unwrap();
        assert_relative_eq!(by_change[0].points[0].1, by_slope[0].points[0].1);
        assert_lt!(by_change[0].points[0].1, 0.0);
    }

    #[test]
    fn zero_slope_point_aborts_the_sweep() {
        assert!(length_change_by_slope(&[100.0], &[0.1, 0.0]).is_err());
    }
}
