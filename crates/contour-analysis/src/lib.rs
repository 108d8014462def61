//! contour-analysis: static API-contract verification for multi-service web apps.
//!
//! The pipeline runs strictly in order, each stage returning an owned artifact:
//! - Index: cached, read-only access to repository sources
//! - Mounts: `app.use(base, router)` wiring resolved to router modules
//! - Endpoints: `router.<verb>(path)` definitions joined to their mount base
//! - Services / Schema: sibling inventories feeding the component map
//! - Client calls: `api.<verb>(path)` call sites in the frontend client
//! - Contract diff: bounded set difference between the two sides

pub mod index;
pub mod pipeline;
pub mod reporters;
pub mod structural;

pub use index::SourceIndex;
pub use pipeline::{run_audit, AuditReport, ComponentMap};
