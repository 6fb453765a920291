/// Project management module
///
/// Handles the project aggregate, the in-memory repository that owns every user
/// and project, and the demo fixtures loaded at startup.

pub mod repository;
pub mod seed;
pub mod types;

pub use repository::WorkflowRepository;
pub use types::Project;
