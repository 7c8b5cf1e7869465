//! Learning rate scheduler driven by a step counter.
//!
//! Call `step()` once per optimizer update and read `get_lr()` before
//! the next one. The rate itself comes from the stateless [`SgdrDecay`];
//! only the counter lives here.

use sgdr_core::SgdrParams;

use crate::decay::SgdrDecay;

/// Warm-restart cosine annealing (SGDR) with a step counter.
pub struct SgdrLR {
    pub schedule: SgdrDecay,
    pub current_step: u64,
}

impl SgdrLR {
    pub fn new(params: SgdrParams) -> Self {
        SgdrLR { schedule: SgdrDecay::new(params), current_step: 0 }
    }

    pub fn step(&mut self) {
        let before = self.restart_index();
        self.current_step += 1;
        let after = self.restart_index();
        if after != before {
            tracing::debug!(
                step = self.current_step,
                restart = after,
                peak_lr = self.schedule.peak(after),
                "warm restart"
            );
        }
    }

    pub fn get_lr(&self) -> f64 {
        self.schedule.rate(self.current_step)
    }

    pub fn restart_index(&self) -> u64 {
        self.schedule.cycle(self.current_step).index
    }

    pub fn reset(&mut self) { self.current_step = 0; }
}

impl Iterator for SgdrLR {
    type Item = f64;

    /// Yields the current rate, then advances one step.
    fn next(&mut self) -> Option<f64> {
        let lr = self.get_lr();
        self.step();
        Some(lr)
    }
}
