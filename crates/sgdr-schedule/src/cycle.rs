/// Where a step falls inside the warm-restart cycles.
///
/// Cycle `k` has length `period * t_mul^k` and starts at the sum of the
/// lengths of cycles `0..k`. With a non-integer `t_mul` these boundaries
/// are fractional, so `start`, `length` and `position` are kept as `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartCycle {
    /// 0-based restart index.
    pub index: u64,
    /// First step of the cycle.
    pub start: f64,
    pub length: f64,
    /// Offset of the step from `start`, always in `[0, length)`.
    pub position: f64,
}

impl RestartCycle {
    /// Normalized phase within the cycle, in `[0, 1)`.
    pub fn fraction(&self) -> f64 {
        self.position / self.length
    }
}

/// Find the restart cycle containing `step` in constant time.
///
/// `period` must be non-zero and `t_mul >= 1`; callers get this from
/// validated `SgdrParams`.
pub fn locate(step: u64, period: u64, t_mul: f64) -> RestartCycle {
    if t_mul == 1.0 {
        let index = step / period;
        return RestartCycle {
            index,
            start: (index * period) as f64,
            length: period as f64,
            position: (step % period) as f64,
        };
    }

    // Invert start(k) = period * (t_mul^k - 1) / (t_mul - 1), then settle
    // rounding against the boundaries themselves.
    let step = step as f64;
    let growth = t_mul - 1.0;
    let estimate = ((step / period as f64) * growth).ln_1p() / growth.ln_1p();
    let mut index = estimate.floor().max(0.0) as u64;
    while index > 0 && geometric_start(index, period, t_mul) > step {
        index -= 1;
    }
    while geometric_start(index.saturating_add(1), period, t_mul) <= step {
        index += 1;
    }

    let start = geometric_start(index, period, t_mul);
    let next = geometric_start(index.saturating_add(1), period, t_mul);
    RestartCycle {
        index,
        start,
        length: next - start,
        position: step - start,
    }
}

/// First step of restart `restart`, i.e. the cumulative length of all
/// earlier cycles.
pub fn restart_start(restart: u64, period: u64, t_mul: f64) -> f64 {
    if t_mul == 1.0 {
        return restart as f64 * period as f64;
    }
    geometric_start(restart, period, t_mul)
}

// period * (t_mul^k - 1) / (t_mul - 1). Integer powers keep whole-number
// multipliers exact; multipliers close to 1 go through exp_m1/ln_1p to
// avoid cancellation in t_mul^k - 1.
fn geometric_start(restart: u64, period: u64, t_mul: f64) -> f64 {
    let growth = t_mul - 1.0;
    let powered = if growth < 0.5 {
        (restart as f64 * growth.ln_1p()).exp_m1()
    } else {
        match i32::try_from(restart) {
            Ok(k) => t_mul.powi(k) - 1.0,
            Err(_) => t_mul.powf(restart as f64) - 1.0,
        }
    };
    period as f64 * powered / growth
}
