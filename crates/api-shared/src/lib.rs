//! # API Shared
//!
//! Shared response types and services for the TDR REST API.
//!
//! Contains:
//! - `HealthService` and `HealthRes` for liveness checks
//! - `ErrorRes`, the JSON error body every failing endpoint returns
//!
//! Used by the `tdr-run` server and the CLI for common response shapes.

pub mod health;
pub mod response;

pub use health::{HealthRes, HealthService};
pub use response::ErrorRes;
