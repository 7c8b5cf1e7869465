//! SGDR: stochastic gradient descent with warm restarts.
//!
//! - **decay** — closed-form schedule: `SgdrDecay` and the `sgdr_decay` function
//! - **cycle** — restart-cycle lookup for a step
//! - **scheduler** — `SgdrLR`, a step-counting wrapper for training loops
//! - **reference** — epoch-driven simulation the closed form is checked against

pub mod cycle;
pub mod decay;
pub mod reference;
pub mod scheduler;

pub use cycle::RestartCycle;
pub use decay::{sgdr_decay, SgdrDecay};
pub use reference::ReferenceSchedule;
pub use scheduler::SgdrLR;
