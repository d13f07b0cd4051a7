//! Error type shared by the walker, the hull sampler and the generators.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    /// Parameters rejected at the boundary (`num_points < 1`, `grid_size < 1`,
    /// `step_size <= 0`, ...).
    InvalidParams { reason: String },
    /// No admissible continuation was found within the retry budget.
    ConstraintUnsatisfiable { reason: String },
    /// A sampler produced something that is not a usable polygon
    /// (e.g. a hull of collinear points).
    DegenerateSample { reason: String },
}

impl PathError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsatisfiable(reason: impl Into<String>) -> Self {
        Self::ConstraintUnsatisfiable {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSample {
            reason: reason.into(),
        }
    }

    /// True for failures a caller may retry with another seed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidParams { .. })
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid path params: {reason}"),
            Self::ConstraintUnsatisfiable { reason } => {
                write!(f, "constraints unsatisfiable: {reason}")
            }
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_retry_classification() {
        let e = PathError::invalid("grid_size must be >= 1");
        assert_eq!(e.to_string(), "invalid path params: grid_size must be >= 1");
        assert!(!e.is_retryable());
        assert!(PathError::unsatisfiable("stuck").is_retryable());
        assert!(PathError::degenerate("flat hull").is_retryable());
    }
}
