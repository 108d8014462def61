//! Analysis pipeline: typed stages, the component map, and the orchestrator.

pub mod component_map;
pub mod orchestrator;
pub mod stage;
pub mod stages;

pub use component_map::ComponentMap;
pub use orchestrator::{run_audit, AuditReport};
pub use stage::{
    run_stage, Stage, StageContext, StageId, StageLedger, StageReport, StageStatus, PIPELINE,
};
