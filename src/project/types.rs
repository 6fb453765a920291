/// Project type definitions for lift installation and service work
///
/// A project owns its stage instances in the order fixed by its project type.

use crate::error::WorkflowError;
use crate::stage::{ProjectType, StageCatalog, StageInstance, StageStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// A customer's lift project moving through the stage sequence
///
/// The stage list is built once from the catalog and never reordered or resized.
/// Manufacturer and maintenance provider start unassigned and can be reassigned
/// any number of times.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Unique project identifier (e.g., 101)
    pub id: u64,
    /// Human-readable project name (e.g., "Sunshine Apartments Lift")
    pub name: String,
    pub project_type: ProjectType,
    /// Owning customer; fixed at creation
    pub customer_id: u64,
    pub manufacturer_id: Option<u64>,
    pub maintenance_provider_id: Option<u64>,
    /// Stage instances in sequence order
    pub stages: Vec<StageInstance>,
    /// Free-form site details (address, capacity, equipment, ...)
    pub meta: BTreeMap<String, String>,
}

impl Project {
    /// Build a project with one not-started stage per catalog entry for its type
    pub fn initialise(
        catalog: &StageCatalog,
        id: u64,
        name: impl Into<String>,
        project_type: ProjectType,
        customer_id: u64,
        meta: BTreeMap<String, String>,
    ) -> Result<Self, WorkflowError> {
        let stages = catalog
            .stage_sequence(project_type)?
            .iter()
            .map(|&stage_id| catalog.stage_definition(stage_id).map(StageInstance::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name: name.into(),
            project_type,
            customer_id,
            manufacturer_id: None,
            maintenance_provider_id: None,
            stages,
            meta,
        })
    }

    /// First stage in sequence order that is not completed
    pub fn current_stage(&self) -> Option<&StageInstance> {
        self.stages.iter().find(|stage| !stage.is_completed())
    }

    /// Sequence position of `current_stage`
    pub fn current_stage_index(&self) -> Option<usize> {
        self.stages.iter().position(|stage| !stage.is_completed())
    }

    pub fn completed_stage_count(&self) -> usize {
        self.stages.iter().filter(|stage| stage.is_completed()).count()
    }

    /// Share of completed stages, 0.0 to 100.0 (0.0 when there are no stages)
    pub fn progress_percentage(&self) -> f64 {
        if self.stages.is_empty() {
            return 0.0;
        }
        self.completed_stage_count() as f64 / self.stages.len() as f64 * 100.0
    }

    /// Stage at `index`, accepting any signed index; out-of-range yields None
    pub fn stage_mut(&mut self, index: i64) -> Option<&mut StageInstance> {
        usize::try_from(index).ok().and_then(|i| self.stages.get_mut(i))
    }

    /// Apply a status change to the stage at `index`
    ///
    /// Returns false and leaves the project untouched when the index is outside
    /// `[0, stage count)`.
    pub fn update_stage_status(&mut self, index: i64, status: StageStatus, note: Option<&str>) -> bool {
        match self.stage_mut(index) {
            Some(stage) => {
                stage.update_status(status, note);
                true
            }
            None => {
                tracing::debug!(
                    "Ignoring stage index {} for project {} ({} stages)",
                    index, self.id, self.stages.len()
                );
                false
            }
        }
    }
}
