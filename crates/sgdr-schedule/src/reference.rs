//! Epoch-driven SGDR simulation, as in the training script that
//! accompanied the SGDR paper (Loshchilov & Hutter, 2017).
//!
//! It keeps a running phase `tt` instead of computing the phase from the
//! step, and restarts only at epoch boundaries. [`SgdrDecay`] must agree
//! with it whenever the restart period is a whole number of epochs.
//!
//! [`SgdrDecay`]: crate::decay::SgdrDecay

use std::f64::consts::{FRAC_PI_2, PI};

use sgdr_core::{ScheduleError, ScheduleResult};

/// Iterator over the per-step learning rates of the simulation.
#[derive(Debug, Clone)]
pub struct ReferenceSchedule {
    learning_rate: f64,
    iters_per_epoch: u64,
    t_mul: u64,
    /// Current period length, in epochs.
    t_e: u64,
    /// Epoch at which the next restart happens.
    te_next: u64,
    epoch: u64,
    iter: u64,
    tt: f64,
    current_lr: f64,
}

impl ReferenceSchedule {
    pub fn new(
        learning_rate: f64,
        period_epochs: u64,
        t_mul: u64,
        iters_per_epoch: u64,
    ) -> ScheduleResult<Self> {
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(ScheduleError::InvalidParameter {
                name: "learning_rate",
                value: learning_rate,
                reason: "must be finite and > 0",
            });
        }
        if period_epochs == 0 {
            return Err(ScheduleError::InvalidParameter {
                name: "period_epochs",
                value: 0.0,
                reason: "must be a positive number of epochs",
            });
        }
        if t_mul == 0 {
            return Err(ScheduleError::InvalidParameter {
                name: "t_mul",
                value: 0.0,
                reason: "must be finite and >= 1",
            });
        }
        if iters_per_epoch == 0 {
            return Err(ScheduleError::InvalidParameter {
                name: "iters_per_epoch",
                value: 0.0,
                reason: "must be a positive number of steps",
            });
        }

        Ok(ReferenceSchedule {
            learning_rate,
            iters_per_epoch,
            t_mul,
            t_e: period_epochs,
            te_next: period_epochs,
            epoch: 0,
            iter: 0,
            tt: 0.0,
            current_lr: learning_rate,
        })
    }
}

impl Iterator for ReferenceSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let lr = self.current_lr;

        // Advance the phase by π / (steps in the current period), wrapping at π.
        let dt = 2.0 * PI / (2.0 * self.t_e as f64);
        self.tt += dt / self.iters_per_epoch as f64;
        if self.tt >= PI {
            self.tt -= PI;
        }
        self.current_lr = self.learning_rate * (1.0 + (FRAC_PI_2 + self.tt).sin()) / 2.0;

        self.iter += 1;
        if self.iter == self.iters_per_epoch {
            self.iter = 0;
            self.epoch += 1;
            if self.epoch == self.te_next {
                self.current_lr = self.learning_rate;
                self.tt = 0.0;
                self.t_e = self.t_e.saturating_mul(self.t_mul);
                self.te_next = self.te_next.saturating_add(self.t_e);
                tracing::trace!(epoch = self.epoch, next_restart = self.te_next, "reference restart");
            }
        }

        Some(lr)
    }
}
