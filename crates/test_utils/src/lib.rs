//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim adjudication test suite.
//!
//! # Modules
//!
//! - `fixtures`: Sample bill texts and claim submissions
//! - `builders`: Builder patterns for submissions and adjudicators
//! - `assertions`: Custom assertion helpers for decisions and resolutions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
