//! Stage workflow driven through the guarded service, as a front end would.

use lift4m::{
    access::Action, project::seed::demo_repository, Project, ProjectType, Role, StageCatalog,
    StageStatus, User, WorkflowError, WorkflowRepository, WorkflowService,
};
use std::collections::BTreeMap;

fn fresh_service() -> WorkflowService {
    let mut repository = WorkflowRepository::new(StageCatalog::standard());
    repository.insert_user(User::new(1, "Super Admin", Role::SuperAdmin));
    repository.insert_user(User::new(2, "Alice Builder", Role::Customer));
    repository.insert_user(User::new(3, "LiftCo Manufacturing", Role::Manufacturer));
    repository.insert_user(User::new(4, "ServicePro Maint", Role::MaintenanceProvider));

    let project = Project::initialise(
        repository.catalog(),
        201,
        "Harbour View Lift",
        ProjectType::NewInstallation,
        2,
        BTreeMap::from([("address".to_string(), "Harbour Road".to_string())]),
    )
    .expect("catalog covers every project type");
    repository.insert_project(project);
    WorkflowService::new(repository)
}

#[test]
fn manufacturer_gains_update_rights_only_after_assignment() {
    let mut service = fresh_service();

    let denied = service.update_stage_status(3, 201, 2, StageStatus::Completed, Some("done"));
    assert_eq!(
        denied,
        Err(WorkflowError::AccessDenied {
            user_id: 3,
            project_id: 201,
            action: Action::UpdateStage,
        })
    );
    assert!(service.dashboard(3).unwrap().is_empty());

    service.assign_manufacturer(1, 201, 3).unwrap();

    assert_eq!(
        service.update_stage_status(3, 201, 2, StageStatus::Completed, Some("done")),
        Ok(true)
    );

    let project = service.view_project(3, 201).unwrap();
    let completed = project.completed_stage_count();
    assert_eq!(completed, 1);
    assert_eq!(project.progress_percentage(), completed as f64 / 10.0 * 100.0);

    let stage = &project.stages[2];
    assert_eq!(stage.status, StageStatus::Completed);
    assert!(stage.start_date.is_some());
    assert_eq!(stage.start_date, stage.end_date);
    assert_eq!(stage.notes.len(), 1);
    assert!(stage.notes[0].ends_with("] done"));

    // Stage 0 is still the earliest incomplete one.
    assert_eq!(project.current_stage_index(), Some(0));
}

#[test]
fn customer_follows_progress_but_cannot_touch_it() {
    let mut service = fresh_service();
    service.assign_maintenance_provider(1, 201, 4).unwrap();

    for index in 0..3 {
        service
            .update_stage_status(4, 201, index, StageStatus::Completed, None)
            .unwrap();
    }

    let view = service.view_project(2, 201).unwrap();
    assert_eq!(view.progress_percentage(), 30.0);
    assert_eq!(view.current_stage().map(|s| s.definition.id), Some(4));

    assert!(matches!(
        service.update_stage_status(2, 201, 3, StageStatus::InProgress, None),
        Err(WorkflowError::AccessDenied { .. })
    ));
    assert!(matches!(
        service.assign_manufacturer(2, 201, 3),
        Err(WorkflowError::AccessDenied { action: Action::AssignManufacturer, .. })
    ));
}

#[test]
fn finishing_every_stage_clears_current_stage() {
    let mut service = fresh_service();
    let count = service.project(201).unwrap().stages.len() as i64;

    for index in 0..count {
        service
            .update_stage_status(1, 201, index, StageStatus::Completed, None)
            .unwrap();
    }

    let project = service.project(201).unwrap();
    assert_eq!(project.progress_percentage(), 100.0);
    assert!(project.current_stage().is_none());
}

#[test]
fn boundary_indices_leave_project_unchanged() {
    let mut service = fresh_service();
    let count = service.project(201).unwrap().stages.len() as i64;

    for index in [-1, count, i64::MIN, i64::MAX] {
        assert_eq!(
            service.update_stage_status(1, 201, index, StageStatus::Completed, Some("ignored")),
            Ok(false)
        );
    }
    let project = service.project(201).unwrap();
    assert!(project
        .stages
        .iter()
        .all(|s| s.status == StageStatus::NotStarted && s.notes.is_empty() && s.start_date.is_none()));
}

#[test]
fn demo_customer_dashboard_lists_both_projects() {
    let service = WorkflowService::new(demo_repository().unwrap());
    let ids: Vec<u64> = service.dashboard(2).unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![101, 102]);
    assert_eq!(service.dashboard(1).unwrap().len(), 2);
    assert!(service.dashboard(4).unwrap().is_empty());
}
