//! Core Kernel - Foundational types shared by the claim adjudication crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Amount normalization with precise decimal arithmetic
//! - The table of currencies recognized on bills
//! - Port error types for pluggable collaborators

pub mod money;
pub mod ports;

pub use money::{normalize_amount, Currency, RawAmount};
pub use ports::{DomainPort, PortError};
