#![forbid(unsafe_code)]
//! enrollnet-core library.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library failures, each mapping to an
//!   [`error::ErrorCode`]; `anyhow::Result` for config plumbing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod lock;
pub mod model;
pub mod store;

pub use model::{
    CachedCentrality, CentralityResult, ExcludedCourses, NetworkStatsSummary, NodeCentrality,
    StudentRecord,
};
