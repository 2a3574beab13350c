// src/basins.rs - Greenland drainage basins treated as uniform-width glaciers

use crate::error::{GlacierError, nonzero};
use crate::glacier::{Glacier, GlacierConfig, PhysicalConstants};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BasinSector {
    North,
    East,
    South,
    West,
}

impl BasinSector {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasinSector::North => "North",
            BasinSector::East => "East",
            BasinSector::South => "South",
            BasinSector::West => "West",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "North" | "north" => Some(BasinSector::North),
            "East" | "east" => Some(BasinSector::East),
            "South" | "south" => Some(BasinSector::South),
            "West" | "west" => Some(BasinSector::West),
            _ => None,
        }
    }
}

/// Measured basin geometry (meters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basin {
    pub sector: BasinSector,
    pub bed_height: f64,
    pub mean_ice_thickness: f64,
    pub max_surface: f64,
    pub min_surface: f64,
    pub length_of_segment: f64,
}

pub static GREENLAND_BASINS: Lazy<BTreeMap<BasinSector, Basin>> = Lazy::new(|| {
    use BasinSector::*;
    let mut m = BTreeMap::new();

    m.insert(North, Basin {
        sector: North,
        bed_height: 1392.0,
        mean_ice_thickness: 1417.0,
        max_surface: 2914.0,
        min_surface: 736.0,
        length_of_segment: 820_000.0,
    });

    m.insert(East, Basin {
        sector: East,
        bed_height: 2527.0,
        mean_ice_thickness: 1557.0,
        max_surface: 3233.0,
        min_surface: 955.0,
        length_of_segment: 380_000.0,
    });

    m.insert(South, Basin {
        sector: South,
        bed_height: 2906.0,
        mean_ice_thickness: 1974.0,
        max_surface: 3173.0,
        min_surface: 214.0,
        length_of_segment: 1_150_000.0,
    });

    m.insert(West, Basin {
        sector: West,
        bed_height: 1127.0,
        mean_ice_thickness: 2101.0,
        max_surface: 3041.0,
        min_surface: 0.0,
        length_of_segment: 380_000.0,
    });

    m
});

pub fn get_basin(sector: BasinSector) -> Option<&'static Basin> {
    GREENLAND_BASINS.get(&sector)
}

/// Mean surface gradient over a segment.
pub fn surface_slope(min_surface: f64, max_surface: f64, length: f64) -> Result<f64, GlacierError> {
    let length = nonzero(length, "surface_slope", "segment length")?;
    Ok((max_surface - min_surface) / length)
}

/// Equilibrium quantities of one basin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasinReport {
    pub sector: BasinSector,
    pub slope: f64,
    pub max_surface: f64,
    pub ela_from_length: f64,
    pub critical_ela: f64,
    pub measured_length: f64,
    /// Using the measured mean thickness in place of the static one
    pub linear_equilibrium_length: f64,
    pub measured_thickness: f64,
    pub mean_thickness: f64,
    pub static_thickness: f64,
}

impl Basin {
    pub fn glacier(&self, constants: PhysicalConstants) -> Result<Glacier, GlacierError> {
        let slope = surface_slope(self.min_surface, self.max_surface, self.length_of_segment)?;
        Glacier::new(
            GlacierConfig::new(self.length_of_segment, self.bed_height, slope),
            constants,
        )
    }
}

pub fn evaluate_basin(basin: &Basin, constants: PhysicalConstants) -> Result<BasinReport, GlacierError> {
    let glacier = basin.glacier(constants)?;
    let ela_from_length = glacier.ela_from_length()?;

    Ok(BasinReport {
        sector: basin.sector,
        slope: glacier.slope(),
        max_surface: basin.max_surface,
        ela_from_length,
        critical_ela: glacier.critical_ela()?,
        measured_length: basin.length_of_segment,
        linear_equilibrium_length: glacier
            .linear_equilibrium_length(ela_from_length, Some(basin.mean_ice_thickness))?,
        measured_thickness: basin.mean_ice_thickness,
        mean_thickness: glacier.mean_thickness()?,
        static_thickness: glacier.static_mean_thickness()?,
    })
}

/// Reports for every basin in the table, in sector order.
pub fn evaluate_all(constants: PhysicalConstants) -> Result<Vec<BasinReport>, GlacierError> {
    GREENLAND_BASINS
        .values()
        .map(|basin| evaluate_basin(basin, constants))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn table_has_four_sectors_in_order() {
        let sectors: Vec<_> = GREENLAND_BASINS.keys().copied().collect();
        assert_eq!(
            sectors,
            vec![BasinSector::North, BasinSector::East, BasinSector::South, BasinSector::West]
        );
        assert_eq!(get_basin(BasinSector::West).unwrap().min_surface, 0.0);
    }

    #[test]
    fn slope_from_surface_span() {
        assert_abs_diff_eq!(surface_slope(736.0, 2914.0, 820_000.0).unwrap(), 0.002_656_097, epsilon = 1e-9);
        assert!(surface_slope(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn north_basin_report() {
        let basin = get_basin(BasinSector::North).unwrap();
        let report = evaluate_basin(basin, PhysicalConstants::default()).unwrap();
        let slope = 2178.0 / 820_000.0;
        let static_thickness = 0.5e5 / (920.0 * 10.0 * slope);
        assert_relative_eq!(report.static_thickness, static_thickness, max_relative = 1e-12);
        assert_relative_eq!(
            report.ela_from_length,
            static_thickness + 1392.0 - 820_000.0 * slope / 2.0,
            max_relative = 1e-12
        );
        // measured thickness differs from the static one, so the lengths differ
        assert!(report.linear_equilibrium_length != report.measured_length);
    }

    #[test]
    fn every_basin_evaluates() {
        let reports = evaluate_all(PhysicalConstants::default()).unwrap();
        assert_eq!(reports.len(), 4);
        for report in reports {
            assert!(report.critical_ela > report.ela_from_length);
            assert!(report.mean_thickness > 0.0);
        }
    }

    #[test]
    fn sector_names_round_trip() {
        for sector in GREENLAND_BASINS.keys() {
            assert_eq!(BasinSector::from_str(sector.as_str()), Some(*sector));
        }
    }
}
