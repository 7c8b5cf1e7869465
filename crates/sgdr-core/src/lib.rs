pub mod config;
pub mod error;
pub mod params;

pub use config::{load_config, save_config, SgdrConfig};
pub use error::{ConfigError, ScheduleError, ScheduleResult};
pub use params::SgdrParams;
