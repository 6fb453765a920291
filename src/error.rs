/// Error taxonomy for the lift workflow core
///
/// Every failure is a deterministic lookup or authorization decision; nothing here
/// is transient or worth retrying. The presentation layer decides how each variant
/// is shown to the user.

use crate::access::policy::Action;
use crate::stage::catalog::ProjectType;
use thiserror::Error;

/// Errors surfaced by the workflow core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// No user registered under this id
    #[error("User not found: {0}")]
    UserNotFound(u64),

    /// No project registered under this id
    #[error("Project not found: {0}")]
    ProjectNotFound(u64),

    /// Stage id is not part of the catalog
    #[error("Stage definition not found: {0}")]
    StageDefinitionNotFound(u32),

    /// Project type has no registered stage sequence
    #[error("No stage sequence registered for project type: {0}")]
    SequenceNotFound(ProjectType),

    /// Authorization policy refused the action
    #[error("Access denied: user {user_id} may not {action} project {project_id}")]
    AccessDenied {
        user_id: u64,
        project_id: u64,
        action: Action,
    },

    /// Status string outside the four recognized values
    #[error("Invalid stage status: '{0}'")]
    InvalidStatus(String),
}

impl WorkflowError {
    /// True for the NotFound family (users, projects, catalog entries)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkflowError::UserNotFound(_)
                | WorkflowError::ProjectNotFound(_)
                | WorkflowError::StageDefinitionNotFound(_)
                | WorkflowError::SequenceNotFound(_)
        )
    }
}
