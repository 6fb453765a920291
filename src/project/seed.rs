/// Demo fixtures loaded at startup
///
/// Four users (one per role) and two sample projects for customer 2, already
/// part-way through their stages.

use crate::access::user::{Role, User};
use crate::error::WorkflowError;
use crate::project::{repository::WorkflowRepository, types::Project};
use crate::stage::{ProjectType, StageCatalog, StageStatus};
use std::collections::BTreeMap;

fn meta(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Users every demo deployment starts with
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "Super Admin", Role::SuperAdmin),
        User::new(2, "Alice Builder", Role::Customer),
        User::new(3, "LiftCo Manufacturing", Role::Manufacturer),
        User::new(4, "ServicePro Maint", Role::MaintenanceProvider),
    ]
}

/// Sample projects with their starting stage states
pub fn demo_projects(catalog: &StageCatalog) -> Result<Vec<Project>, WorkflowError> {
    let mut sunshine = Project::initialise(
        catalog,
        101,
        "Sunshine Apartments Lift",
        ProjectType::NewInstallation,
        2,
        meta(&[
            ("address", "Sunshine Apartments, Main Street, Chennai"),
            ("capacity", "6 persons"),
            ("building_type", "Residential"),
        ]),
    )?;
    sunshine.update_stage_status(0, StageStatus::Completed, Some("Account created and requirements captured"));
    sunshine.update_stage_status(1, StageStatus::Completed, Some("Measurements and drawings provided"));
    sunshine.update_stage_status(2, StageStatus::InProgress, Some("Survey scheduled for tomorrow"));

    let mut mall = Project::initialise(
        catalog,
        102,
        "Mall Escalator Service",
        ProjectType::Service,
        2,
        meta(&[("address", "City Mall, Chennai"), ("equipment", "Escalator #3")]),
    )?;
    mall.update_stage_status(0, StageStatus::Completed, Some("Service request logged via app"));
    mall.update_stage_status(1, StageStatus::InProgress, Some("Issue description and photos uploaded"));

    Ok(vec![sunshine, mall])
}

/// Repository populated with the demo users and projects
pub fn demo_repository() -> Result<WorkflowRepository, WorkflowError> {
    let mut repository = WorkflowRepository::new(StageCatalog::standard());
    for user in demo_users() {
        repository.insert_user(user);
    }
    for project in demo_projects(repository.catalog())? {
        repository.insert_project(project);
    }
    tracing::info!(
        "Seeded {} users and {} projects",
        repository.users().len(),
        repository.projects().len()
    );
    Ok(repository)
}
