/// Stage Layer
///
/// Static stage catalog shared by every project, and the mutable per-project
/// stage instances with their status transition rule.

// Stage definitions and per-project-type sequences
pub mod catalog;

// Per-project stage state and status updates
pub mod instance;

pub use catalog::{ProjectType, StageCatalog, StageDefinition};
pub use instance::{StageInstance, StageStatus};
