//! Contract tracking: route mounts, endpoints, client calls, drift.

pub mod diff;
pub mod extractors;
pub mod mounts;
pub mod normalize;
pub mod types;

pub use diff::{diff_contracts, ContractSet, EndpointKey};
pub use mounts::MountResolver;
pub use types::*;
