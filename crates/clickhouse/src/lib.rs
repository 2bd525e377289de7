//! ClickHouse warehouse adapter for the CTR benchmark report.

pub mod client;
pub mod config;
pub mod health;
pub mod query;
pub mod schema;

pub use client::*;
pub use config::*;
pub use query::*;
