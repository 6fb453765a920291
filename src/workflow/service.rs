/// Guarded workflow operations
///
/// The entry point a presentation layer drives. Each call resolves the acting
/// user and project, runs the authorization policy, and only then touches the
/// repository.

use crate::access::{
    policy::{self, Action},
    user::User,
};
use crate::error::WorkflowError;
use crate::project::{repository::WorkflowRepository, types::Project};
use crate::stage::StageStatus;

/// Repository plus the policy checks in front of it
#[derive(Debug, Clone, Default)]
pub struct WorkflowService {
    repository: WorkflowRepository,
}

impl WorkflowService {
    pub fn new(repository: WorkflowRepository) -> Self {
        Self { repository }
    }

    /// Read-only access to the underlying repository
    pub fn repository(&self) -> &WorkflowRepository {
        &self.repository
    }

    pub fn users(&self) -> Vec<&User> {
        self.repository.users()
    }

    pub fn user(&self, user_id: u64) -> Option<&User> {
        self.repository.user(user_id)
    }

    pub fn project(&self, project_id: u64) -> Option<&Project> {
        self.repository.project(project_id)
    }

    fn require_user(&self, user_id: u64) -> Result<&User, WorkflowError> {
        self.repository
            .user(user_id)
            .ok_or(WorkflowError::UserNotFound(user_id))
    }

    fn require_project(&self, project_id: u64) -> Result<&Project, WorkflowError> {
        self.repository
            .project(project_id)
            .ok_or(WorkflowError::ProjectNotFound(project_id))
    }

    /// Projects visible to the user, for their dashboard
    pub fn dashboard(&self, user_id: u64) -> Result<Vec<&Project>, WorkflowError> {
        let user = self.require_user(user_id)?;
        let projects = self.repository.projects_visible_to(user);
        tracing::debug!("Dashboard for user {} ({}): {} projects", user.id, user.role, projects.len());
        Ok(projects)
    }

    /// A single project, if the user may view it
    pub fn view_project(&self, user_id: u64, project_id: u64) -> Result<&Project, WorkflowError> {
        let user = self.require_user(user_id)?;
        let project = self.require_project(project_id)?;
        policy::authorize(user, project, Action::View)?;
        Ok(project)
    }

    /// Change one stage's status on behalf of `user_id`
    ///
    /// `Ok(false)` means the caller was allowed but the stage index was out of range,
    /// so nothing changed.
    pub fn update_stage_status(
        &mut self,
        user_id: u64,
        project_id: u64,
        stage_index: i64,
        status: StageStatus,
        note: Option<&str>,
    ) -> Result<bool, WorkflowError> {
        {
            let user = self.require_user(user_id)?;
            let project = self.require_project(project_id)?;
            policy::authorize(user, project, Action::UpdateStage)?;
        }
        Ok(self
            .repository
            .update_stage_status(project_id, stage_index, status, note))
    }

    /// Assign a manufacturer on behalf of `user_id` (admins only)
    ///
    /// An unknown project id is accepted and changes nothing.
    pub fn assign_manufacturer(
        &mut self,
        user_id: u64,
        project_id: u64,
        manufacturer_id: u64,
    ) -> Result<(), WorkflowError> {
        self.require_assigner(user_id, project_id, Action::AssignManufacturer)?;
        self.repository.assign_manufacturer(project_id, manufacturer_id);
        Ok(())
    }

    /// Assign a maintenance provider on behalf of `user_id` (admins only)
    pub fn assign_maintenance_provider(
        &mut self,
        user_id: u64,
        project_id: u64,
        provider_id: u64,
    ) -> Result<(), WorkflowError> {
        self.require_assigner(user_id, project_id, Action::AssignMaintenanceProvider)?;
        self.repository.assign_maintenance_provider(project_id, provider_id);
        Ok(())
    }

    // Assignment rights depend on the role alone, so the project need not exist.
    fn require_assigner(&self, user_id: u64, project_id: u64, action: Action) -> Result<(), WorkflowError> {
        let user = self.require_user(user_id)?;
        match self.repository.project(project_id) {
            Some(project) => policy::authorize(user, project, action),
            None if policy::can_assign(user) => Ok(()),
            None => Err(WorkflowError::AccessDenied {
                user_id,
                project_id,
                action,
            }),
        }
    }
}
