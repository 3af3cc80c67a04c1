//! # TDR Types
//!
//! Shared data model for the Tender Document Review (TDR) system.
//!
//! Contains:
//! - Validated text primitives (`NonEmptyText`)
//! - The domain records that flow between the workflow stages
//!   (`Rfp`, `Bid`, `Analysis`, `Project`)
//!
//! **No behaviour**: orchestration, validation of uploads, and model calls
//! belong in `tdr-core`, `tdr-staging`, and `tdr-model`. This crate only
//! defines the shapes those crates exchange and persist.

mod domain;
mod text;

pub use domain::{
    Analysis, AssessedRequirement, Bid, CompanyQuestions, Project, Requirement, Rfp,
};
pub use text::{NonEmptyText, TextError};
