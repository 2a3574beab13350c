//! Bedrock depression under an ice load.
//!
//! The depression ratio is `rho_ice / (rho_ice - rho_mantle)`. For realistic
//! densities (mantle heavier than ice) it is negative, so a depth computed
//! with it is an elevation below the unloaded bed.

use crate::error::{GlacierError, nonzero};
use serde::{Deserialize, Serialize};

/// How the isostatic load factor `1 + ratio` enters the surface-height radicand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsostaticConvention {
    /// radicand * (1 + ratio)
    #[default]
    Amplified,
    /// radicand / (1 + ratio)
    Attenuated,
}

impl IsostaticConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            IsostaticConvention::Amplified => "amplified",
            IsostaticConvention::Attenuated => "attenuated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "amplified" => Some(IsostaticConvention::Amplified),
            "attenuated" => Some(IsostaticConvention::Attenuated),
            _ => None,
        }
    }

    /// Apply the load factor `1 + ratio` to an uncorrected radicand.
    pub fn apply(&self, radicand: f64, ratio: f64) -> Result<f64, GlacierError> {
        let load_factor = 1.0 + ratio;
        match self {
            IsostaticConvention::Amplified => Ok(radicand * load_factor),
            IsostaticConvention::Attenuated => {
                let load_factor = nonzero(load_factor, "surface_height", "isostatic load factor")?;
                Ok(radicand / load_factor)
            }
        }
    }
}

/// `rho_ice / (rho_ice - rho_mantle)`; singular when the densities match.
pub fn isostatic_ratio(ice_density: f64, mantle_density: f64) -> Result<f64, GlacierError> {
    if ice_density == mantle_density {
        return Err(GlacierError::SingularConfiguration {
            relation: "isostatic_ratio",
            reason: format!(
                "mantle density equals ice density ({} kg/m3)",
                mantle_density
            ),
        });
    }
    Ok(ice_density / (ice_density - mantle_density))
}

/// Signed bedrock displacement under a surface value `y`.
pub fn bed_depth(y: f64, ratio: f64) -> f64 {
    y * ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ratio_is_negative_for_heavy_mantle() {
        let ratio = isostatic_ratio(920.0, 3200.0).unwrap();
        assert_abs_diff_eq!(ratio, -0.403_508_771_9, epsilon = 1e-9);
        // depression points down
        assert!(bed_depth(500.0, ratio) < 0.0);
    }

    #[test]
    fn equal_densities_are_singular() {
        let err = isostatic_ratio(920.0, 920.0).unwrap_err();
        assert!(matches!(
            err,
            GlacierError::SingularConfiguration { relation: "isostatic_ratio", .. }
        ));
    }

    #[test]
    fn conventions_are_reciprocal() {
        let ratio = isostatic_ratio(920.0, 3300.0).unwrap();
        let amplified = IsostaticConvention::Amplified.apply(1000.0, ratio).unwrap();
        let attenuated = IsostaticConvention::Attenuated.apply(1000.0, ratio).unwrap();
        assert_abs_diff_eq!(amplified * attenuated, 1000.0 * 1000.0, epsilon = 1e-6);
        assert!(amplified < 1000.0);
        assert!(attenuated > 1000.0);
    }

    #[test]
    fn attenuated_zero_load_factor_is_singular() {
        // ratio of -1 happens when the mantle is twice as dense as ice
        let ratio = isostatic_ratio(920.0, 1840.0).unwrap();
        assert_abs_diff_eq!(ratio, -1.0);
        assert!(IsostaticConvention::Attenuated.apply(10.0, ratio).is_err());
        assert_eq!(IsostaticConvention::Amplified.apply(10.0, ratio), Ok(0.0));
    }

    #[test]
    fn convention_names_round_trip() {
        for convention in [IsostaticConvention::Amplified, IsostaticConvention::Attenuated] {
            assert_eq!(IsostaticConvention::from_str(convention.as_str()), Some(convention));
        }
        assert_eq!(IsostaticConvention::from_str("inverted"), None);
    }
}
