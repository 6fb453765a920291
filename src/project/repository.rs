/// In-memory repository of users and projects
///
/// Holds the whole platform state for the lifetime of the process. Nothing is
/// persisted. Callers that share a repository across tasks wrap it in a single
/// lock; see `server::create_app`.

use crate::access::user::{Role, User};
use crate::project::types::Project;
use crate::stage::{StageCatalog, StageStatus};
use std::collections::BTreeMap;

/// Owner of every `User` and `Project`
///
/// Maps are keyed by id and iterate in id order, so role-filtered listings are
/// stable between calls.
#[derive(Debug, Clone, Default)]
pub struct WorkflowRepository {
    /// Stage catalog used to provision new projects
    catalog: StageCatalog,
    /// Key: user id
    users: BTreeMap<u64, User>,
    /// Key: project id
    projects: BTreeMap<u64, Project>,
}

impl WorkflowRepository {
    /// Empty repository provisioning projects from `catalog`
    pub fn new(catalog: StageCatalog) -> Self {
        Self {
            catalog,
            users: BTreeMap::new(),
            projects: BTreeMap::new(),
        }
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Register a user, replacing any user with the same id
    pub fn insert_user(&mut self, user: User) {
        tracing::debug!("Registering user {} '{}' ({})", user.id, user.name, user.role);
        self.users.insert(user.id, user);
    }

    /// Register a project, replacing any project with the same id
    pub fn insert_project(&mut self, project: Project) {
        tracing::debug!(
            "Registering project {} '{}' ({}, {} stages)",
            project.id, project.name, project.project_type, project.stages.len()
        );
        self.projects.insert(project.id, project);
    }

    /// All registered users in id order
    pub fn users(&self) -> Vec<&User> {
        self.users.values().collect()
    }

    pub fn user(&self, user_id: u64) -> Option<&User> {
        self.users.get(&user_id)
    }

    /// All projects in id order
    pub fn projects(&self) -> Vec<&Project> {
        self.projects.values().collect()
    }

    pub fn project(&self, project_id: u64) -> Option<&Project> {
        self.projects.get(&project_id)
    }

    pub fn project_mut(&mut self, project_id: u64) -> Option<&mut Project> {
        self.projects.get_mut(&project_id)
    }

    /// Projects the user's role lets them see
    ///
    /// Admins see all; customers see what they own; manufacturers and maintenance
    /// providers see what they are assigned to.
    pub fn projects_visible_to(&self, user: &User) -> Vec<&Project> {
        self.projects
            .values()
            .filter(|project| match user.role {
                Role::SuperAdmin => true,
                Role::Customer => project.customer_id == user.id,
                Role::Manufacturer => project.manufacturer_id == Some(user.id),
                Role::MaintenanceProvider => project.maintenance_provider_id == Some(user.id),
            })
            .collect()
    }

    /// Set the project's manufacturer; unknown project ids are ignored
    ///
    /// The manufacturer id is not checked against the user registry.
    pub fn assign_manufacturer(&mut self, project_id: u64, manufacturer_id: u64) {
        self.warn_on_unexpected_assignee(manufacturer_id, Role::Manufacturer);
        match self.projects.get_mut(&project_id) {
            Some(project) => {
                project.manufacturer_id = Some(manufacturer_id);
                tracing::info!("Assigned manufacturer {} to project {}", manufacturer_id, project_id);
            }
            None => tracing::warn!("Manufacturer assignment for unknown project {}", project_id),
        }
    }

    /// Set the project's maintenance provider; unknown project ids are ignored
    pub fn assign_maintenance_provider(&mut self, project_id: u64, provider_id: u64) {
        self.warn_on_unexpected_assignee(provider_id, Role::MaintenanceProvider);
        match self.projects.get_mut(&project_id) {
            Some(project) => {
                project.maintenance_provider_id = Some(provider_id);
                tracing::info!("Assigned maintenance provider {} to project {}", provider_id, project_id);
            }
            None => tracing::warn!("Maintenance provider assignment for unknown project {}", project_id),
        }
    }

    /// Update one stage of a project
    ///
    /// Returns false without touching anything when the project is unknown or the
    /// index is outside the project's stage range.
    pub fn update_stage_status(
        &mut self,
        project_id: u64,
        stage_index: i64,
        status: StageStatus,
        note: Option<&str>,
    ) -> bool {
        let Some(project) = self.projects.get_mut(&project_id) else {
            return false;
        };
        let updated = project.update_stage_status(stage_index, status, note);
        if updated {
            tracing::info!("Project {} stage {} set to {}", project_id, stage_index, status);
        }
        updated
    }

    fn warn_on_unexpected_assignee(&self, user_id: u64, expected: Role) {
        match self.users.get(&user_id) {
            None => tracing::warn!("Assigning unregistered user {} as {}", user_id, expected),
            Some(user) if user.role != expected => tracing::warn!(
                "Assigning user {} with role {} as {}",
                user_id, user.role, expected
            ),
            Some(_) => {}
        }
    }
}
