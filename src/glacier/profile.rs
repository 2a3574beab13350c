use super::Glacier;
use crate::error::GlacierError;
use serde::{Deserialize, Serialize};

/// One point of a sampled cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub x: f64,
    pub surface_height: f64,
    /// Signed; zero when the bed is not isostatically loaded
    pub bed_depth: f64,
}

/// Surface and bed sampled from terminus to terminus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub samples: Vec<ProfileSample>,
}

impl CrossSection {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_surface_height(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.surface_height)
            .fold(0.0, f64::max)
    }

    /// Deepest (most negative) bed point.
    pub fn min_bed_depth(&self) -> f64 {
        self.samples.iter().map(|s| s.bed_depth).fold(0.0, f64::min)
    }

    /// Surface peak plus the magnitude of the deepest bed point.
    pub fn max_thickness(&self) -> f64 {
        self.max_surface_height() + self.min_bed_depth().abs()
    }
}

impl Glacier {
    /// Sample the profile every `resolution` meters, both termini included.
    pub fn profile(&self, resolution: f64) -> Result<CrossSection, GlacierError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(GlacierError::InvalidConfig(format!(
                "profile resolution must be positive, got {}",
                resolution
            )));
        }
        let length = self.length();
        let count = (length / resolution).floor() as usize;
        let mut positions: Vec<f64> = (0..=count).map(|i| i as f64 * resolution).collect();
        if positions.last().is_some_and(|&x| x < length) {
            positions.push(length);
        }

        let ratio = if self.config().isostatic {
            Some(self.isostatic_ratio()?)
        } else {
            None
        };

        let samples = positions
            .into_iter()
            .map(|x| {
                let surface_height = self.surface_height(x)?;
                let bed_depth = ratio.map_or(0.0, |r| super::isostasy::bed_depth(surface_height, r));
                Ok(ProfileSample {
                    x,
                    surface_height,
                    bed_depth,
                })
            })
            .collect::<Result<Vec<_>, GlacierError>>()?;

        Ok(CrossSection { samples })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glacier::GlacierConfig;
    use approx::assert_abs_diff_eq;

    #[test]
    fn samples_include_both_termini() {
        let glacier = Glacier::with_defaults(GlacierConfig::new(1050.0, 0.0, 0.1)).unwrap();
        let section = glacier.profile(100.0).unwrap();
        assert_eq!(section.len(), 12);
        assert_eq!(section.samples[0].x, 0.0);
        assert_eq!(section.samples[11].x, 1050.0);
        assert_eq!(section.samples[11].surface_height, 0.0);
    }

    #[test]
    fn unloaded_bed_stays_flat() {
        let glacier = Glacier::with_defaults(GlacierConfig::new(100_000.0, 0.0, 0.0)).unwrap();
        let section = glacier.profile(100.0).unwrap();
        assert_eq!(section.len(), 1001);
        assert_eq!(section.min_bed_depth(), 0.0);
        assert_abs_diff_eq!(section.max_thickness(), 737.209_780, epsilon = 1e-5);
    }

    #[test]
    fn heavier_mantle_depresses_the_bed_less() {
        let stats = |density: f64| {
            let glacier = Glacier::with_defaults(
                GlacierConfig::new(100_000.0, 0.0, 0.0)
                    .with_isostatic(true)
                    .with_mantle_density(density),
            )
            .unwrap();
            let section = glacier.profile(100.0).unwrap();
            (section.max_surface_height(), section.min_bed_depth())
        };
        let (light_top, light_bed) = stats(3270.0);
        let (heavy_top, heavy_bed) = stats(3410.0);
        assert_abs_diff_eq!(heavy_top, 585.384_530, epsilon = 1e-5);
        assert_abs_diff_eq!(heavy_bed, -216.286_653, epsilon = 1e-5);
        assert!(heavy_top > light_top);
        assert!(heavy_bed > light_bed);
    }

    #[test]
    fn rejects_zero_resolution() {
        let glacier = Glacier::with_defaults(GlacierConfig::new(1000.0, 0.0, 0.1)).unwrap();
        assert!(glacier.profile(0.0).is_err());
    }
}
