//! Rule-based extraction of diagnosis and expense from bill text
//!
//! These are the cheapest, most trusted stage of the extraction cascade.
//! Both extractors read from a shared, immutable [`ExtractionPatterns`].

pub mod diagnosis;
pub mod expense;
pub mod patterns;

pub use diagnosis::extract_diagnosis;
pub use expense::extract_expense;
pub use patterns::{ExtractionPatterns, TotalGroup};
