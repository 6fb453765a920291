/// Authorization policy for project access
///
/// Pure predicates over (user, project). Every guarded operation in the crate goes
/// through `authorize` so the role rules live in exactly one place.

use crate::access::user::{Role, User};
use crate::error::WorkflowError;
use crate::project::types::Project;
use serde::Serialize;
use std::fmt;

/// Action a user attempts on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    UpdateStage,
    AssignManufacturer,
    AssignMaintenanceProvider,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::View => "view",
            Action::UpdateStage => "update stages of",
            Action::AssignManufacturer => "assign a manufacturer to",
            Action::AssignMaintenanceProvider => "assign a maintenance provider to",
        };
        f.write_str(text)
    }
}

/// True when the user is the manufacturer or maintenance provider bound to the project
fn is_assigned_party(user: &User, project: &Project) -> bool {
    match user.role {
        Role::Manufacturer => project.manufacturer_id == Some(user.id),
        Role::MaintenanceProvider => project.maintenance_provider_id == Some(user.id),
        Role::SuperAdmin | Role::Customer => false,
    }
}

/// Admins see everything; everyone else sees projects they own or are assigned to
pub fn can_view(user: &User, project: &Project) -> bool {
    match user.role {
        Role::SuperAdmin => true,
        Role::Customer => project.customer_id == user.id,
        Role::Manufacturer | Role::MaintenanceProvider => is_assigned_party(user, project),
    }
}

/// Customers never update stages; assigned parties and admins may
pub fn can_update_stage(user: &User, project: &Project) -> bool {
    match user.role {
        Role::SuperAdmin => true,
        Role::Customer => false,
        Role::Manufacturer | Role::MaintenanceProvider => is_assigned_party(user, project),
    }
}

/// Only admins assign manufacturers or maintenance providers
pub fn can_assign(user: &User) -> bool {
    user.role == Role::SuperAdmin
}

/// Decide whether `user` may perform `action` on `project`
pub fn is_permitted(user: &User, project: &Project, action: Action) -> bool {
    match action {
        Action::View => can_view(user, project),
        Action::UpdateStage => can_update_stage(user, project),
        Action::AssignManufacturer | Action::AssignMaintenanceProvider => can_assign(user),
    }
}

/// `is_permitted` as a `Result`, carrying the denial details
pub fn authorize(user: &User, project: &Project, action: Action) -> Result<(), WorkflowError> {
    if is_permitted(user, project, action) {
        Ok(())
    } else {
        tracing::warn!(
            "Denied: user {} ({}) may not {} project {}",
            user.id, user.role, action, project.id
        );
        Err(WorkflowError::AccessDenied {
            user_id: user.id,
            project_id: project.id,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ProjectType, StageCatalog};
    use std::collections::BTreeMap;

    fn project() -> Project {
        let mut project = Project::initialise(
            &StageCatalog::standard(),
            101,
            "Sunshine Apartments Lift",
            ProjectType::NewInstallation,
            2,
            BTreeMap::new(),
        )
        .unwrap();
        project.manufacturer_id = Some(3);
        project.maintenance_provider_id = Some(4);
        project
    }

    #[test]
    fn admin_may_do_everything() {
        let admin = User::new(1, "Super Admin", Role::SuperAdmin);
        let project = project();
        for action in [
            Action::View,
            Action::UpdateStage,
            Action::AssignManufacturer,
            Action::AssignMaintenanceProvider,
        ] {
            assert!(is_permitted(&admin, &project, action), "{:?}", action);
        }
    }

    #[test]
    fn customer_views_own_project_but_never_updates() {
        let owner = User::new(2, "Alice Builder", Role::Customer);
        let stranger = User::new(9, "Bob", Role::Customer);
        let project = project();

        assert!(can_view(&owner, &project));
        assert!(!can_view(&stranger, &project));
        assert!(!can_update_stage(&owner, &project));
        assert!(!can_assign(&owner));
    }

    #[test]
    fn assigned_parties_view_and_update() {
        let manufacturer = User::new(3, "LiftCo Manufacturing", Role::Manufacturer);
        let provider = User::new(4, "ServicePro Maint", Role::MaintenanceProvider);
        let project = project();

        for user in [&manufacturer, &provider] {
            assert!(can_view(user, &project));
            assert!(can_update_stage(user, &project));
            assert!(!can_assign(user));
        }
    }

    #[test]
    fn assignment_is_role_specific() {
        // Id 4 is the maintenance provider; a manufacturer with the same id gets nothing.
        let impostor = User::new(4, "Other Manufacturer", Role::Manufacturer);
        let unassigned = User::new(8, "Idle Maint", Role::MaintenanceProvider);
        let project = project();

        assert!(!can_view(&impostor, &project));
        assert!(!can_update_stage(&impostor, &project));
        assert!(!can_view(&unassigned, &project));
    }

    #[test]
    fn authorize_reports_denial() {
        let customer = User::new(2, "Alice Builder", Role::Customer);
        let project = project();

        assert_eq!(authorize(&customer, &project, Action::View), Ok(()));
        assert_eq!(
            authorize(&customer, &project, Action::UpdateStage),
            Err(WorkflowError::AccessDenied {
                user_id: 2,
                project_id: 101,
                action: Action::UpdateStage,
            })
        );
    }
}
