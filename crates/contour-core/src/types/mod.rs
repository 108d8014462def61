//! Shared types used across Contour crates.

pub mod collections;
pub mod finding;

pub use finding::{Finding, Severity};
