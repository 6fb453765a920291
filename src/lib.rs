/// Lift4M: lift installation and service workflow platform
///
/// This library tracks lift projects through a fixed sequence of stages, with
/// role-based visibility and update rights for administrators, customers,
/// manufacturers and maintenance providers.

// Core configuration and setup
pub mod config;

// Error taxonomy shared by every layer
pub mod error;

// Stage catalog and per-project stage state
pub mod stage;

// Users, roles and the authorization policy
pub mod access;

// Project aggregate, in-memory repository and demo fixtures
pub mod project;

// Policy-checked operations for the presentation layer
pub mod workflow;

// HTTP API layer - JSON endpoints for the web front end
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use access::{Role, User};
pub use error::WorkflowError;
pub use project::{Project, WorkflowRepository};
pub use server::start_server;
pub use stage::{ProjectType, StageCatalog, StageDefinition, StageInstance, StageStatus};
pub use workflow::WorkflowService;
