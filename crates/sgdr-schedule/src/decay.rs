//! Closed-form SGDR decay.
//!
//! lr(step) = learning_rate * m_mul^k * 0.5 * (1 + cos(π * f))
//!
//! where `k` is the restart cycle containing `step` and `f` the
//! normalized position inside it. At `f = 0` the rate is the cycle's
//! peak; it falls towards 0 as `f` approaches 1, then jumps back up at
//! the next restart.

use std::f64::consts::PI;
use std::ops::Range;

use rayon::prelude::*;
use sgdr_core::{ScheduleError, ScheduleResult, SgdrConfig, SgdrParams};

use crate::cycle::{self, RestartCycle};

/// Stateless SGDR schedule: maps a step to a learning rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdrDecay {
    params: SgdrParams,
}

impl SgdrDecay {
    pub fn new(params: SgdrParams) -> Self {
        tracing::debug!(
            learning_rate = params.learning_rate(),
            initial_period_steps = params.initial_period_steps(),
            t_mul = params.t_mul(),
            m_mul = params.m_mul(),
            "sgdr schedule"
        );
        SgdrDecay { params }
    }

    pub fn from_config(config: &SgdrConfig) -> ScheduleResult<Self> {
        Ok(SgdrDecay::new(config.validate()?))
    }

    pub fn params(&self) -> &SgdrParams {
        &self.params
    }

    /// Restart cycle containing `step`.
    pub fn cycle(&self, step: u64) -> RestartCycle {
        cycle::locate(step, self.params.initial_period_steps(), self.params.t_mul())
    }

    /// First step of restart `restart`.
    pub fn restart_start(&self, restart: u64) -> f64 {
        cycle::restart_start(restart, self.params.initial_period_steps(), self.params.t_mul())
    }

    /// Peak learning rate of restart `restart`: `learning_rate * m_mul^restart`.
    pub fn peak(&self, restart: u64) -> f64 {
        let m_mul = self.params.m_mul();
        let factor = if m_mul == 1.0 {
            1.0
        } else {
            match i32::try_from(restart) {
                Ok(k) => m_mul.powi(k),
                Err(_) => m_mul.powf(restart as f64),
            }
        };
        self.params.learning_rate() * factor
    }

    /// Learning rate at `step`.
    pub fn rate(&self, step: u64) -> f64 {
        self.rate_in(&self.cycle(step))
    }

    /// Learning rate at an already located position.
    pub fn rate_in(&self, cycle: &RestartCycle) -> f64 {
        let cosine = 0.5 * (1.0 + (PI * cycle.fraction()).cos());
        self.peak(cycle.index) * cosine
    }

    pub fn rates(&self, steps: Range<u64>) -> Vec<f64> {
        steps.map(|step| self.rate(step)).collect()
    }

    /// Same as [`SgdrDecay::rates`], evaluated on the rayon pool.
    pub fn par_rates(&self, steps: Range<u64>) -> Vec<f64> {
        steps.into_par_iter().map(|step| self.rate(step)).collect()
    }
}

/// SGDR learning rate at `global_step`.
///
/// Validates every argument on each call. A negative `global_step` is
/// rejected with [`ScheduleError::InvalidStep`], bad schedule parameters
/// with [`ScheduleError::InvalidParameter`]. Pass `m_mul = 1.0` to keep
/// every restart at the full `learning_rate`.
pub fn sgdr_decay(
    learning_rate: f64,
    global_step: i64,
    initial_period_steps: i64,
    t_mul: f64,
    m_mul: f64,
) -> ScheduleResult<f64> {
    let params = SgdrParams::from_signed(learning_rate, initial_period_steps, t_mul, m_mul)?;
    let step = u64::try_from(global_step).map_err(|_| ScheduleError::InvalidStep(global_step))?;
    Ok(SgdrDecay { params }.rate(step))
}
