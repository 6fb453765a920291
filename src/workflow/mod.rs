/// Workflow Layer
///
/// Ties the repository to the authorization policy. Presentation code talks to
/// `WorkflowService` and never mutates the repository directly.

// Policy-checked operations over the repository
pub mod service;

pub use service::WorkflowService;
