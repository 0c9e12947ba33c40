//! CLI command handlers, one file per subcommand.

mod config;
mod get;
mod probe;
mod range;

pub use config::run_config;
pub use get::{run_get, GetArgs};
#[cfg(test)]
pub use get::default_output;
pub use probe::run_probe;
pub use range::run_range;
