/// Stage catalog: the fixed registry of stage definitions and per-type sequences
///
/// Ten stages cover a lift project from onboarding through handover. New
/// installations and retrofits walk all ten; service requests skip stage 7
/// (Technical Freeze / GAD Approval) because there are no engineering drawings
/// to approve.

use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr, sync::Arc};

/// Immutable template for one stage of a lift project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Globally unique stage id (1-10)
    pub id: u32,
    /// Short display name (e.g., "Lead Broadcast")
    pub name: String,
    /// One-line description of the work done in this stage
    pub description: String,
}

/// Classification of a project, selecting which stage sequence applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    NewInstallation,
    Retrofit,
    /// Service / AMC requests, condensed sequence without drawing approval
    Service,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::NewInstallation,
        ProjectType::Retrofit,
        ProjectType::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NewInstallation => "new_installation",
            ProjectType::Retrofit => "retrofit",
            ProjectType::Service => "service",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown project type: {}", s))
    }
}

/// Stage id of Technical Freeze (GAD Approval), omitted for service projects
pub const TECHNICAL_FREEZE_STAGE_ID: u32 = 7;

const STAGE_TABLE: [(u32, &str, &str); 10] = [
    (1, "Onboarding & Need Discovery",
        "Capture customer info and high level requirements."),
    (2, "Requirement Form & Measurements",
        "Collect measurements/drawings and schedule surveys."),
    (3, "Verified Survey & Feasibility Report",
        "Onsite assessment and risk grading."),
    (4, "Lead Broadcast",
        "Send the verified lead to manufacturers / service providers."),
    (5, "Quote Ranking & Presentation",
        "AI ranks proposals and presents top options."),
    (6, "Selection & Contract",
        "Customer selects provider and tri-party contract is generated."),
    (7, "Technical Freeze (GAD Approval)",
        "Drawings uploaded and approved by stakeholders."),
    (8, "Production & Readiness",
        "Manufacturing progress and site readiness (JRC)."),
    (9, "Delivery & Installation",
        "Shipment, installation and commissioning."),
    (10, "Handover & Support",
        "Final handover, logbook, warranty and AMC."),
];

/// Read-only registry of stage definitions and sequences
///
/// Definitions are handed out as `Arc`s so every stage instance referring to the
/// same stage id shares one allocation.
#[derive(Debug, Clone)]
pub struct StageCatalog {
    /// Key: stage id, Value: shared definition
    definitions: HashMap<u32, Arc<StageDefinition>>,
    /// Key: project type, Value: ordered stage ids
    sequences: HashMap<ProjectType, Vec<u32>>,
}

impl StageCatalog {
    /// Build the lift platform catalog (stages 1-10, three project types)
    pub fn standard() -> Self {
        let definitions = STAGE_TABLE
            .iter()
            .map(|&(id, name, description)| {
                let definition = StageDefinition {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                };
                (id, Arc::new(definition))
            })
            .collect();

        let full: Vec<u32> = (1..=10).collect();
        let condensed: Vec<u32> = full
            .iter()
            .copied()
            .filter(|&id| id != TECHNICAL_FREEZE_STAGE_ID)
            .collect();

        let mut sequences = HashMap::new();
        sequences.insert(ProjectType::NewInstallation, full.clone());
        sequences.insert(ProjectType::Retrofit, full);
        sequences.insert(ProjectType::Service, condensed);

        Self { definitions, sequences }
    }

    /// Look up a stage definition by id
    pub fn stage_definition(&self, id: u32) -> Result<Arc<StageDefinition>, WorkflowError> {
        self.definitions
            .get(&id)
            .cloned()
            .ok_or(WorkflowError::StageDefinitionNotFound(id))
    }

    /// Ordered stage ids that apply to a project type
    pub fn stage_sequence(&self, project_type: ProjectType) -> Result<&[u32], WorkflowError> {
        self.sequences
            .get(&project_type)
            .map(Vec::as_slice)
            .ok_or(WorkflowError::SequenceNotFound(project_type))
    }

    /// All definitions ordered by id
    pub fn definitions(&self) -> Vec<Arc<StageDefinition>> {
        let mut all: Vec<_> = self.definitions.values().cloned().collect();
        all.sort_by_key(|d| d.id);
        all
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
