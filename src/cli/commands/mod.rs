//! CLI command implementations.

mod ask;
mod config;
mod serve;
mod stats;
mod upload;

pub use ask::run_ask;
pub use config::run_config;
pub use serve::run_serve;
pub use stats::run_stats;
pub use upload::run_upload;
