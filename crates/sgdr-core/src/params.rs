use crate::error::{ScheduleError, ScheduleResult};

/// Validated parameters of an SGDR schedule.
///
/// Fields are private so that every instance has passed validation:
/// `learning_rate > 0`, `initial_period_steps > 0`, `t_mul >= 1`
/// and `m_mul` in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdrParams {
    learning_rate: f64,
    initial_period_steps: u64,
    t_mul: f64,
    m_mul: f64,
}

impl SgdrParams {
    pub const DEFAULT_T_MUL: f64 = 2.0;
    pub const DEFAULT_M_MUL: f64 = 1.0;

    /// Parameters with no decay of the restart peaks (`m_mul = 1`).
    pub fn new(learning_rate: f64, initial_period_steps: u64, t_mul: f64) -> ScheduleResult<Self> {
        Self::with_all(learning_rate, initial_period_steps, t_mul, Self::DEFAULT_M_MUL)
    }

    pub fn with_all(
        learning_rate: f64,
        initial_period_steps: u64,
        t_mul: f64,
        m_mul: f64,
    ) -> ScheduleResult<Self> {
        check_learning_rate(learning_rate)?;
        if initial_period_steps == 0 {
            return Err(ScheduleError::InvalidParameter {
                name: "initial_period_steps",
                value: 0.0,
                reason: "must be a positive number of steps",
            });
        }
        check_t_mul(t_mul)?;
        check_m_mul(m_mul)?;

        Ok(SgdrParams {
            learning_rate,
            initial_period_steps,
            t_mul,
            m_mul,
        })
    }

    /// Validate parameters given as signed integers, as a training loop
    /// driven by `i64` step counters would pass them.
    pub fn from_signed(
        learning_rate: f64,
        initial_period_steps: i64,
        t_mul: f64,
        m_mul: f64,
    ) -> ScheduleResult<Self> {
        let period = u64::try_from(initial_period_steps).map_err(|_| ScheduleError::InvalidParameter {
            name: "initial_period_steps",
            value: initial_period_steps as f64,
            reason: "must be a positive number of steps",
        })?;
        Self::with_all(learning_rate, period, t_mul, m_mul)
    }

    /// Replace the restart-peak multiplier.
    pub fn with_m_mul(self, m_mul: f64) -> ScheduleResult<Self> {
        check_m_mul(m_mul)?;
        Ok(SgdrParams { m_mul, ..self })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn initial_period_steps(&self) -> u64 {
        self.initial_period_steps
    }

    pub fn t_mul(&self) -> f64 {
        self.t_mul
    }

    pub fn m_mul(&self) -> f64 {
        self.m_mul
    }
}

fn check_learning_rate(learning_rate: f64) -> ScheduleResult<()> {
    if learning_rate > 0.0 && learning_rate.is_finite() {
        Ok(())
    } else {
        Err(ScheduleError::InvalidParameter {
            name: "learning_rate",
            value: learning_rate,
            reason: "must be finite and > 0",
        })
    }
}

fn check_t_mul(t_mul: f64) -> ScheduleResult<()> {
    if t_mul >= 1.0 && t_mul.is_finite() {
        Ok(())
    } else {
        Err(ScheduleError::InvalidParameter {
            name: "t_mul",
            value: t_mul,
            reason: "must be finite and >= 1",
        })
    }
}

fn check_m_mul(m_mul: f64) -> ScheduleResult<()> {
    if m_mul > 0.0 && m_mul <= 1.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidParameter {
            name: "m_mul",
            value: m_mul,
            reason: "must be in (0, 1]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let p = SgdrParams::new(0.1, 10, 3.0).unwrap();
        assert_eq!(p.learning_rate(), 0.1);
        assert_eq!(p.initial_period_steps(), 10);
        assert_eq!(p.t_mul(), 3.0);
        assert_eq!(p.m_mul(), 1.0);

        let p = p.with_m_mul(0.9).unwrap();
        assert_eq!(p.m_mul(), 0.9);
    }

    #[test]
    fn test_rejects_bad_learning_rate() {
        for lr in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = SgdrParams::new(lr, 10, 2.0).unwrap_err();
            assert!(matches!(
                err,
                ScheduleError::InvalidParameter { name: "learning_rate", .. }
            ));
        }
    }

    #[test]
    fn test_rejects_bad_period() {
        let err = SgdrParams::new(0.1, 0, 2.0).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidParameter { name: "initial_period_steps", .. }
        ));
        let err = SgdrParams::from_signed(0.1, -5, 2.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidParameter { name: "initial_period_steps", .. }
        ));
    }

    #[test]
    fn test_rejects_bad_multipliers() {
        for t_mul in [0.5, 0.0, f64::NAN, f64::INFINITY] {
            let err = SgdrParams::new(0.1, 10, t_mul).unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidParameter { name: "t_mul", .. }));
        }
        for m_mul in [0.0, -0.1, 1.01, f64::NAN] {
            let err = SgdrParams::with_all(0.1, 10, 2.0, m_mul).unwrap_err();
            assert!(matches!(err, ScheduleError::InvalidParameter { name: "m_mul", .. }));
        }
    }
}
