use thiserror::Error;

/// Validation failures when building a model or its initial condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Model dimension must be positive.")]
    ZeroDimension,

    #[error("Forcing must be finite, got {0}.")]
    NonFiniteForcing(f64),

    #[error("Initial condition dimension mismatch. Expected {expected}, got {got}.")]
    InitialConditionLength { expected: usize, got: usize },

    #[error("Invalid initial condition distribution (mean = {mean}, std_dev = {std_dev}).")]
    InvalidDistribution { mean: f64, std_dev: f64 },
}
