use thiserror::Error;

/// Error type for schedule construction and evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid step {0}: step must be non-negative")]
    InvalidStep(i64),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised while loading or saving a schedule configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config rejected: {0}")]
    Invalid(#[from] ScheduleError),
}
