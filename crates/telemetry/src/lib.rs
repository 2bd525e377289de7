//! Logging for the CTR benchmark report.

pub mod stage;
pub mod tracing_setup;

pub use stage::*;
pub use tracing_setup::*;
