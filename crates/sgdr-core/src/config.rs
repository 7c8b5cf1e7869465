use crate::error::{ConfigError, ScheduleResult};
use crate::params::SgdrParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable schedule configuration, as stored in a JSON file.
///
/// Unlike [`SgdrParams`] this is not validated on construction; call
/// [`SgdrConfig::validate`] before building a schedule from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdrConfig {
    pub learning_rate: f64,
    pub initial_period_steps: u64,
    #[serde(default = "default_t_mul")]
    pub t_mul: f64,
    #[serde(default = "default_m_mul")]
    pub m_mul: f64,
}

fn default_t_mul() -> f64 {
    SgdrParams::DEFAULT_T_MUL
}

fn default_m_mul() -> f64 {
    SgdrParams::DEFAULT_M_MUL
}

impl SgdrConfig {
    pub fn new(learning_rate: f64, initial_period_steps: u64) -> Self {
        SgdrConfig {
            learning_rate,
            initial_period_steps,
            t_mul: default_t_mul(),
            m_mul: default_m_mul(),
        }
    }

    /// Configuration whose first period is given in epochs.
    ///
    /// initial_period_steps = period_epochs * steps_per_epoch
    pub fn from_epochs(learning_rate: f64, period_epochs: u64, steps_per_epoch: u64, t_mul: f64) -> Self {
        SgdrConfig {
            t_mul,
            ..SgdrConfig::new(learning_rate, period_epochs.saturating_mul(steps_per_epoch))
        }
    }

    pub fn with_t_mul(mut self, t_mul: f64) -> Self {
        self.t_mul = t_mul;
        self
    }

    pub fn with_m_mul(mut self, m_mul: f64) -> Self {
        self.m_mul = m_mul;
        self
    }

    pub fn validate(&self) -> ScheduleResult<SgdrParams> {
        SgdrParams::with_all(self.learning_rate, self.initial_period_steps, self.t_mul, self.m_mul)
    }
}

impl From<SgdrParams> for SgdrConfig {
    fn from(p: SgdrParams) -> Self {
        SgdrConfig {
            learning_rate: p.learning_rate(),
            initial_period_steps: p.initial_period_steps(),
            t_mul: p.t_mul(),
            m_mul: p.m_mul(),
        }
    }
}

/// Save a configuration to a JSON file.
pub fn save_config(config: &SgdrConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

/// Load a configuration from a JSON file and validate it.
pub fn load_config(path: impl AsRef<Path>) -> Result<SgdrParams, ConfigError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let config: SgdrConfig = serde_json::from_str(&json)?;
    let params = config.validate()?;
    tracing::debug!(
        path = %path.display(),
        learning_rate = params.learning_rate(),
        initial_period_steps = params.initial_period_steps(),
        t_mul = params.t_mul(),
        m_mul = params.m_mul(),
        "loaded sgdr config"
    );
    Ok(params)
}
