use std::fmt;

/// Errors surfaced by the grid core to the UI layer.
#[derive(Clone, Debug, PartialEq)]
pub enum GridError {
    /// A configuration value is out of range (non-positive cell size,
    /// page dimension, density, negative margin, malformed color).
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// Stored configuration text could not be read back.
    Persist(String),
}

impl GridError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GridError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidConfig { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
            GridError::Persist(msg) => write!(f, "stored configuration unreadable: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Require a finite value strictly greater than zero.
pub(crate) fn positive(field: &'static str, v: f64) -> Result<f64, GridError> {
    if !v.is_finite() {
        Err(GridError::invalid(field, format!("{v} is not a finite number")))
    } else if v <= 0.0 {
        Err(GridError::invalid(field, format!("{v} must be greater than zero")))
    } else {
        Ok(v)
    }
}

/// Require a finite value greater than or equal to zero.
pub(crate) fn non_negative(field: &'static str, v: f64) -> Result<f64, GridError> {
    if !v.is_finite() {
        Err(GridError::invalid(field, format!("{v} is not a finite number")))
    } else if v < 0.0 {
        Err(GridError::invalid(field, format!("{v} must not be negative")))
    } else {
        Ok(v)
    }
}
