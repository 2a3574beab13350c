use std::fmt;

/// Failures raised by the glacier relations and the evolution driver.
///
/// Every variant is a local, deterministic failure: retrying the same call
/// with the same configuration yields the same error.
#[derive(Debug, Clone, PartialEq)]
pub enum GlacierError {
    /// A relation would divide by zero (zero slope, equal densities, ...)
    SingularConfiguration {
        relation: &'static str,
        reason: String,
    },
    /// The relation has no real result (negative radicand)
    NonPhysical { relation: &'static str, radicand: f64 },
    /// Length is zero, negative or non-finite where the integrator needs a live glacier
    DegenerateState { length: f64 },
    InvalidSchedule(String),
    InvalidConfig(String),
    Io(String),
}

impl fmt::Display for GlacierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlacierError::SingularConfiguration { relation, reason } => {
                write!(f, "singular configuration in {}: {}", relation, reason)
            }
            GlacierError::NonPhysical { relation, radicand } => write!(
                f,
                "non-physical configuration in {}: negative radicand {:.6e}",
                relation, radicand
            ),
            GlacierError::DegenerateState { length } => {
                write!(f, "degenerate state: cannot evolve a glacier of length {}", length)
            }
            GlacierError::InvalidSchedule(e) => write!(f, "invalid ELA schedule: {}", e),
            GlacierError::InvalidConfig(e) => write!(f, "invalid configuration: {}", e),
            GlacierError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for GlacierError {}

impl From<std::io::Error> for GlacierError {
    fn from(e: std::io::Error) -> Self {
        GlacierError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GlacierError {
    fn from(e: serde_json::Error) -> Self {
        GlacierError::InvalidConfig(format!("failed to parse JSON: {}", e))
    }
}

/// Guard a divisor used by `relation`.
pub(crate) fn nonzero(value: f64, relation: &'static str, what: &str) -> Result<f64, GlacierError> {
    if value == 0.0 || !value.is_finite() {
        Err(GlacierError::SingularConfiguration {
            relation,
            reason: format!("{} is {}", what, value),
        })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_relation() {
        let err = GlacierError::SingularConfiguration {
            relation: "static_mean_thickness",
            reason: "slope is 0".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("static_mean_thickness"));
        assert!(text.contains("slope is 0"));
    }

    #[test]
    fn nonzero_rejects_zero_and_infinite() {
        assert!(nonzero(0.0, "test", "slope").is_err());
        assert!(nonzero(f64::INFINITY, "test", "slope").is_err());
        assert!(nonzero(f64::NAN, "test", "slope").is_err());
        assert_eq!(nonzero(0.1, "test", "slope"), Ok(0.1));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: GlacierError = io.into();
        assert!(matches!(err, GlacierError::Io(ref m) if m.contains("missing.json")));
    }
}
