//! # TDR Core
//!
//! Orchestration for the Tender Document Review (TDR) workflow.
//!
//! This crate sequences the three model-mediated transformations —
//! extraction, assessment, comparative analysis — and owns the project
//! state they accumulate into:
//! - Upload validation (presence, `application/pdf`, size cap)
//! - The stage functions (validate → stage blob → model call → cleanup)
//! - [`ProjectService`]: the state machine exposing only transition
//!   operations, never raw field mutation
//! - The durable JSON project store with a versioned envelope
//!
//! **No API concerns**: HTTP routing, multipart parsing and status-code
//! mapping belong in the `tdr-run` binary; the actual model and blob-store
//! clients live in `tdr-model` and `tdr-staging` and are injected here
//! behind their boundary traits.

pub mod config;
pub mod error;
pub mod project;
pub mod stages;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use project::ProjectService;
pub use stages::Upload;
