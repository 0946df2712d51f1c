//! # RECITAL Common Library
//!
//! Shared code for the RECITAL classroom recording service:
//! - Error taxonomy
//! - Configuration loading
//! - Student and recording models
//! - Roster loading and lookup
//! - Upload naming and filename token rules
//! - Week bucketing and submission reconciliation

pub mod config;
pub mod error;
pub mod model;
pub mod naming;
pub mod reconcile;
pub mod roster;
pub mod week;

pub use error::{Error, Result};
pub use model::{Recording, Student};
