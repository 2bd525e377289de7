//! Core types and computation for the CTR benchmark report.

pub mod annotate;
pub mod benchmark;
pub mod error;
pub mod filter;
pub mod params;
pub mod records;
pub mod source;

pub use annotate::*;
pub use benchmark::*;
pub use error::{Error, Result, WarehouseErrorCode};
pub use params::*;
pub use records::*;
pub use source::*;
