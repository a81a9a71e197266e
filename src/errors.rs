use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Numeric overflow at t = {time:.4} s: {quantity} is not finite")]
    NumericOverflow { time: f64, quantity: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub(crate) fn domain(message: impl Into<String>) -> Self {
        SimulationError::DomainError(message.into())
    }
}

/// Fails with a `DomainError` unless `value` is strictly positive and finite.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::domain(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::domain(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}

pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::domain(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}
