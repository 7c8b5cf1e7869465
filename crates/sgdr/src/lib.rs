//! # SGDR
//!
//! Learning rate schedule with warm restarts, written in pure Rust.
//!
//! ## Modules
//!
//! - **core** — Parameters, validation errors, JSON configuration
//! - **schedule** — Closed-form decay, restart-cycle lookup, step scheduler, reference simulation
//!
//! ```
//! use sgdr::{sgdr_decay, SgdrDecay, SgdrParams};
//!
//! let lr = sgdr_decay(0.1, 10, 10, 3.0, 0.9).unwrap();
//! assert!((lr - 0.09).abs() < 1e-12);
//!
//! let schedule = SgdrDecay::new(SgdrParams::new(0.2, 1000, 1.0).unwrap());
//! assert!((schedule.rate(500) - 0.1).abs() < 1e-12);
//! ```

/// Parameters, errors and configuration.
pub use sgdr_core as core;

/// Learning rate schedules.
pub use sgdr_schedule as schedule;

pub use sgdr_core::{ScheduleError, ScheduleResult, SgdrConfig, SgdrParams};
pub use sgdr_schedule::{sgdr_decay, ReferenceSchedule, RestartCycle, SgdrDecay, SgdrLR};
