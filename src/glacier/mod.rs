//! Longitudinal geometry of a valley glacier on a linearly sloped bed.
//!
//! [`Glacier`] pairs a [`GlacierConfig`] (geometry and densities) with the
//! run-wide [`PhysicalConstants`] and exposes the equilibrium relations as
//! pure functions returning `Result`. The only mutation is [`Glacier::advance`],
//! which moves the terminus by one forward step.

pub mod isostasy;
pub mod profile;

pub use isostasy::IsostaticConvention;
pub use profile::{CrossSection, ProfileSample};

use crate::constants::{
    ALPHA_M_HALF, BALANCE_RATE_PER_YEAR, GRAVITY_MS2, ICE_DENSITY_KGM3, MANTLE_DENSITY_KGM3, NU,
    SHEAR_STRESS_PA,
};
use crate::error::{GlacierError, nonzero};
use serde::{Deserialize, Serialize};

/// Process-wide constants, fixed for the life of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    pub ice_density_kg_m3: f64,
    pub gravity_m_s2: f64,
    pub shear_stress_pa: f64,
    pub alpha: f64,
    pub nu: f64,
    pub balance_rate: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            ice_density_kg_m3: ICE_DENSITY_KGM3,
            gravity_m_s2: GRAVITY_MS2,
            shear_stress_pa: SHEAR_STRESS_PA,
            alpha: ALPHA_M_HALF,
            nu: NU,
            balance_rate: BALANCE_RATE_PER_YEAR,
        }
    }
}

impl PhysicalConstants {
    /// `2 tau / (rho g)`, the plastic-profile constant (meters).
    pub fn ice_constant(&self) -> f64 {
        2.0 * self.shear_stress_pa / (self.ice_density_kg_m3 * self.gravity_m_s2)
    }

    pub fn validate(&self) -> Result<(), GlacierError> {
        let fields = [
            ("ice_density_kg_m3", self.ice_density_kg_m3),
            ("gravity_m_s2", self.gravity_m_s2),
            ("shear_stress_pa", self.shear_stress_pa),
            ("alpha", self.alpha),
            ("balance_rate", self.balance_rate),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(GlacierError::InvalidConfig(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        if !self.nu.is_finite() {
            return Err(GlacierError::InvalidConfig(format!("nu must be finite, got {}", self.nu)));
        }
        Ok(())
    }
}

fn default_mantle_density() -> f64 {
    MANTLE_DENSITY_KGM3
}

/// Geometry and density configuration of one glacier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlacierConfig {
    /// Along-flow length, meters
    pub length: f64,
    /// Bed elevation at the head, meters
    pub max_bed_height: f64,
    pub slope: f64,
    #[serde(default = "default_mantle_density")]
    pub mantle_density: f64,
    #[serde(default)]
    pub isostatic: bool,
    #[serde(default)]
    pub convention: IsostaticConvention,
}

impl Default for GlacierConfig {
    fn default() -> Self {
        Self {
            length: 0.0,
            max_bed_height: 0.0,
            slope: 0.0,
            mantle_density: MANTLE_DENSITY_KGM3,
            isostatic: false,
            convention: IsostaticConvention::Amplified,
        }
    }
}

impl GlacierConfig {
    pub fn new(length: f64, max_bed_height: f64, slope: f64) -> Self {
        Self {
            length,
            max_bed_height,
            slope,
            ..Self::default()
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn with_max_bed_height(mut self, max_bed_height: f64) -> Self {
        self.max_bed_height = max_bed_height;
        self
    }

    pub fn with_slope(mut self, slope: f64) -> Self {
        self.slope = slope;
        self
    }

    pub fn with_mantle_density(mut self, mantle_density: f64) -> Self {
        self.mantle_density = mantle_density;
        self
    }

    pub fn with_isostatic(mut self, isostatic: bool) -> Self {
        self.isostatic = isostatic;
        self
    }

    pub fn with_convention(mut self, convention: IsostaticConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Half the length; the profile is mirrored about this point.
    pub fn midpoint(&self) -> f64 {
        self.length / 2.0
    }

    pub fn validate(&self) -> Result<(), GlacierError> {
        if !(self.length.is_finite() && self.length >= 0.0) {
            return Err(GlacierError::InvalidConfig(format!(
                "length must be finite and >= 0, got {}",
                self.length
            )));
        }
        if !self.max_bed_height.is_finite() || !self.slope.is_finite() {
            return Err(GlacierError::InvalidConfig(
                "max_bed_height and slope must be finite".to_string(),
            ));
        }
        if !(self.mantle_density.is_finite() && self.mantle_density > 0.0) {
            return Err(GlacierError::InvalidConfig(format!(
                "mantle_density must be positive, got {}",
                self.mantle_density
            )));
        }
        Ok(())
    }
}

/// A glacier configuration bound to its physical constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Glacier {
    config: GlacierConfig,
    constants: PhysicalConstants,
}

impl Glacier {
    pub fn new(config: GlacierConfig, constants: PhysicalConstants) -> Result<Self, GlacierError> {
        constants.validate()?;
        config.validate()?;
        Ok(Self { config, constants })
    }

    /// Glacier with the default constants.
    pub fn with_defaults(config: GlacierConfig) -> Result<Self, GlacierError> {
        Self::new(config, PhysicalConstants::default())
    }

    /// A new, independently owned glacier sharing these constants.
    pub fn with_config(&self, config: GlacierConfig) -> Result<Self, GlacierError> {
        Self::new(config, self.constants)
    }

    pub fn config(&self) -> &GlacierConfig {
        &self.config
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn length(&self) -> f64 {
        self.config.length
    }

    pub fn midpoint(&self) -> f64 {
        self.config.midpoint()
    }

    pub fn slope(&self) -> f64 {
        self.config.slope
    }

    fn slope_divisor(&self, relation: &'static str) -> Result<f64, GlacierError> {
        nonzero(self.config.slope, relation, "slope")
    }

    fn coupling(&self, relation: &'static str) -> Result<f64, GlacierError> {
        nonzero(1.0 + self.constants.nu * self.config.slope, relation, "1 + nu * slope")
    }

    // --- isostasy ---

    pub fn isostatic_ratio(&self) -> Result<f64, GlacierError> {
        isostasy::isostatic_ratio(self.constants.ice_density_kg_m3, self.config.mantle_density)
    }

    /// Ice-surface height at along-flow position `x`, symmetric about the midpoint.
    pub fn surface_height(&self, x: f64) -> Result<f64, GlacierError> {
        let x = x.min(self.config.length - x);
        let mut radicand = self.constants.ice_constant() * x;

        if self.config.isostatic {
            radicand = self.config.convention.apply(radicand, self.isostatic_ratio()?)?;
        }

        if radicand < 0.0 || radicand.is_nan() {
            return Err(GlacierError::NonPhysical {
                relation: "surface_height",
                radicand,
            });
        }
        Ok(radicand.sqrt())
    }

    /// Bedrock depression under a column whose surface value is `y`.
    pub fn bed_depth(&self, y: f64) -> Result<f64, GlacierError> {
        Ok(isostasy::bed_depth(y, self.isostatic_ratio()?))
    }

    // --- thickness ---

    /// Mean thickness from shear-stress balance alone.
    pub fn static_mean_thickness(&self) -> Result<f64, GlacierError> {
        let slope = self.slope_divisor("static_mean_thickness")?;
        Ok(self.constants.shear_stress_pa
            / (self.constants.ice_density_kg_m3 * self.constants.gravity_m_s2 * slope))
    }

    /// Mean thickness with the slope/flow coupling, `alpha sqrt(L) / (1 + nu s)`.
    pub fn mean_thickness(&self) -> Result<f64, GlacierError> {
        let coupling = self.coupling("mean_thickness")?;
        Ok(self.constants.alpha * self.config.length.sqrt() / coupling)
    }

    // --- ELA ---

    /// ELA for which the current length is the linear equilibrium length.
    pub fn ela_from_length(&self) -> Result<f64, GlacierError> {
        Ok(self.static_mean_thickness()? + self.config.max_bed_height
            - self.config.length * self.config.slope / 2.0)
    }

    /// ELA above which no positive equilibrium length exists.
    pub fn critical_ela(&self) -> Result<f64, GlacierError> {
        let slope = self.slope_divisor("critical_ela")?;
        let coupling = self.coupling("critical_ela")?;
        Ok(self.constants.alpha.powi(2) / (2.0 * slope * coupling.powi(2))
            + self.config.max_bed_height)
    }

    // --- length ---

    /// Steady length under the linear thickness assumption:
    /// `(2 / s) (H + b0 - E)` with `H` the static mean thickness unless overridden.
    pub fn linear_equilibrium_length(
        &self,
        ela_elevation: f64,
        thickness: Option<f64>,
    ) -> Result<f64, GlacierError> {
        let slope = self.slope_divisor("linear_equilibrium_length")?;
        let thickness = match thickness {
            Some(t) => t,
            None => self.static_mean_thickness()?,
        };
        Ok((2.0 / slope) * (thickness + self.config.max_bed_height - ela_elevation))
    }

    /// First-order length response to an ELA shift: `-(2 / s) dE`.
    pub fn length_change(ela_change: f64, slope: f64) -> Result<f64, GlacierError> {
        let slope = nonzero(slope, "length_change", "slope")?;
        Ok(-(2.0 / slope) * ela_change)
    }

    /// Length response relative to the equilibrium length at `ela_elevation`.
    pub fn fractional_length_change(
        &self,
        ela_elevation: f64,
        ela_change: f64,
        slope: f64,
    ) -> Result<f64, GlacierError> {
        let slope = nonzero(slope, "fractional_length_change", "slope")?;
        let static_thickness = self.constants.shear_stress_pa
            / (self.constants.ice_density_kg_m3 * self.constants.gravity_m_s2 * slope);
        let denominator = nonzero(
            static_thickness + self.config.max_bed_height - ela_elevation,
            "fractional_length_change",
            "equilibrium height above the ELA",
        )?;
        Ok(-ela_change / denominator)
    }

    /// Length at which the mass balance vanishes for `ela`.
    ///
    /// Positive root of `-s L / 2 + alpha sqrt(L) / (1 + nu s) + b0 - E = 0`.
    pub fn steady_state_length(&self, ela: f64) -> Result<f64, GlacierError> {
        let slope = self.slope_divisor("steady_state_length")?;
        let k = self.constants.alpha / self.coupling("steady_state_length")?;
        let discriminant = k * k + 2.0 * slope * (self.config.max_bed_height - ela);
        if discriminant < 0.0 {
            return Err(GlacierError::SingularConfiguration {
                relation: "steady_state_length",
                reason: format!("ELA {} lies above the critical ELA", ela),
            });
        }
        let root = (k + discriminant.sqrt()) / slope;
        if root <= 0.0 {
            return Err(GlacierError::SingularConfiguration {
                relation: "steady_state_length",
                reason: format!("no positive equilibrium length for ELA {}", ela),
            });
        }
        Ok(root * root)
    }

    // --- mass balance and evolution ---

    /// Net annual balance integrated over the length; positive drives advance.
    pub fn mass_balance(&self, ela: f64) -> Result<f64, GlacierError> {
        let beta = self.constants.balance_rate;
        let length = self.config.length;
        Ok(-0.5 * beta * self.config.slope * length.powi(2)
            + beta * length * (self.mean_thickness()? + self.config.max_bed_height - ela))
    }

    /// Length after one explicit forward step of `delta_time` years under `ela`.
    ///
    /// A step that overshoots past zero leaves a vanished glacier (length 0),
    /// which the next step rejects.
    pub fn length_over_time(&self, delta_time: f64, ela: f64) -> Result<f64, GlacierError> {
        let length = self.config.length;
        if !(length.is_finite() && length > 0.0) {
            return Err(GlacierError::DegenerateState { length });
        }
        let coupling = self.coupling("length_over_time")?;
        let rate = (2.0 / 3.0) * coupling / self.constants.alpha
            * self.mass_balance(ela)?
            * length.powf(-0.5);
        let next = length + rate * delta_time;
        if !next.is_finite() {
            return Err(GlacierError::DegenerateState { length: next });
        }
        Ok(next.max(0.0))
    }

    /// Step the glacier in place and return its new length.
    pub fn advance(&mut self, delta_time: f64, ela: f64) -> Result<f64, GlacierError> {
        let next = self.length_over_time(delta_time, ela)?;
        self.config.length = next;
        Ok(next)
    }
}
