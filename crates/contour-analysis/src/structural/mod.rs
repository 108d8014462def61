//! Structural extraction: API contracts and schema inventory.

pub mod contracts;
pub mod schema;
