/// Per-project stage state and the status transition rule

use crate::error::WorkflowError;
use crate::stage::catalog::StageDefinition;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};

/// Timestamp layout prefixed to every stage note
pub const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Progress state of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl StageStatus {
    pub const ALL: [StageStatus; 4] = [
        StageStatus::NotStarted,
        StageStatus::InProgress,
        StageStatus::Completed,
        StageStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::NotStarted => "not_started",
            StageStatus::InProgress => "in_progress",
            StageStatus::Completed => "completed",
            StageStatus::OnHold => "on_hold",
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageStatus {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| WorkflowError::InvalidStatus(s.to_string()))
    }
}

/// Run-time record of one stage within one project
///
/// Only `update_status` mutates an instance. `start_date` is written once, on the
/// first move out of `not_started` into active work; `end_date` follows the most
/// recent completion. Notes are append-only.
#[derive(Debug, Clone, Serialize)]
pub struct StageInstance {
    /// Shared catalog entry this instance tracks
    pub definition: Arc<StageDefinition>,
    pub status: StageStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Entries formatted as "[YYYY-MM-DD HH:MM:SS] note"
    pub notes: Vec<String>,
}

impl StageInstance {
    /// Fresh, not-started instance of a catalog stage
    pub fn new(definition: Arc<StageDefinition>) -> Self {
        Self {
            definition,
            status: StageStatus::NotStarted,
            start_date: None,
            end_date: None,
            notes: Vec::new(),
        }
    }

    /// Apply a status change using the local wall clock
    pub fn update_status(&mut self, new_status: StageStatus, note: Option<&str>) {
        self.update_status_at(new_status, note, Local::now());
    }

    /// Apply a status change as of `now`
    ///
    /// Transitions are not checked for direction: moving a completed stage back to
    /// an earlier status is allowed and leaves both dates untouched.
    pub fn update_status_at(
        &mut self,
        new_status: StageStatus,
        note: Option<&str>,
        now: DateTime<Local>,
    ) {
        let today = now.date_naive();

        if self.status == StageStatus::NotStarted
            && matches!(new_status, StageStatus::InProgress | StageStatus::Completed)
            && self.start_date.is_none()
        {
            self.start_date = Some(today);
        }
        if new_status == StageStatus::Completed {
            self.end_date = Some(today);
        }

        tracing::debug!(
            "Stage {} '{}': {} -> {}",
            self.definition.id, self.definition.name, self.status, new_status
        );
        self.status = new_status;

        if let Some(text) = note.filter(|n| !n.is_empty()) {
            let stamp = now.format(NOTE_TIMESTAMP_FORMAT);
            self.notes.push(format!("[{}] {}", stamp, text));
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == StageStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::catalog::StageCatalog;
    use chrono::{Duration, TimeZone};

    fn survey_stage() -> StageInstance {
        let catalog = StageCatalog::standard();
        StageInstance::new(catalog.stage_definition(3).unwrap())
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn starting_work_sets_start_date_only() {
        let mut stage = survey_stage();
        let now = at(2024, 3, 4, 9, 30, 0);
        stage.update_status_at(StageStatus::InProgress, None, now);

        assert_eq!(stage.status, StageStatus::InProgress);
        assert_eq!(stage.start_date, Some(now.date_naive()));
        assert_eq!(stage.end_date, None);
    }

    #[test]
    fn completing_later_keeps_start_date() {
        let mut stage = survey_stage();
        let started = at(2024, 3, 4, 9, 30, 0);
        let finished = started + Duration::days(5);

        stage.update_status_at(StageStatus::InProgress, None, started);
        stage.update_status_at(StageStatus::Completed, None, finished);

        assert_eq!(stage.start_date, Some(started.date_naive()));
        assert_eq!(stage.end_date, Some(finished.date_naive()));
    }

    #[test]
    fn completing_directly_sets_both_dates() {
        let mut stage = survey_stage();
        let now = at(2024, 6, 1, 12, 0, 0);
        stage.update_status_at(StageStatus::Completed, None, now);

        assert_eq!(stage.start_date, Some(now.date_naive()));
        assert_eq!(stage.end_date, Some(now.date_naive()));
    }

    #[test]
    fn recompletion_overwrites_end_date() {
        let mut stage = survey_stage();
        let first = at(2024, 6, 1, 12, 0, 0);
        let second = first + Duration::days(2);

        stage.update_status_at(StageStatus::Completed, None, first);
        stage.update_status_at(StageStatus::InProgress, None, first);
        stage.update_status_at(StageStatus::Completed, None, second);

        assert_eq!(stage.start_date, Some(first.date_naive()));
        assert_eq!(stage.end_date, Some(second.date_naive()));
    }

    #[test]
    fn on_hold_from_not_started_sets_no_dates() {
        let mut stage = survey_stage();
        stage.update_status_at(StageStatus::OnHold, None, at(2024, 1, 1, 0, 0, 0));

        assert_eq!(stage.status, StageStatus::OnHold);
        assert!(stage.start_date.is_none());
        assert!(stage.end_date.is_none());
    }

    #[test]
    fn reset_to_not_started_does_not_restart_clock() {
        let mut stage = survey_stage();
        let first = at(2024, 2, 1, 8, 0, 0);
        stage.update_status_at(StageStatus::Completed, None, first);
        stage.update_status_at(StageStatus::NotStarted, None, first);
        stage.update_status_at(StageStatus::InProgress, None, first + Duration::days(10));

        assert_eq!(stage.start_date, Some(first.date_naive()));
        assert_eq!(stage.end_date, Some(first.date_naive()));
    }

    #[test]
    fn note_is_timestamped() {
        let mut stage = survey_stage();
        stage.update_status_at(StageStatus::InProgress, Some("Surveyor booked"), at(2024, 3, 4, 9, 5, 7));

        assert_eq!(stage.notes, vec!["[2024-03-04 09:05:07] Surveyor booked".to_string()]);
    }

    #[test]
    fn missing_or_empty_note_appends_nothing() {
        let mut stage = survey_stage();
        let now = at(2024, 3, 4, 9, 5, 7);
        stage.update_status_at(StageStatus::InProgress, None, now);
        stage.update_status_at(StageStatus::OnHold, Some(""), now);

        assert!(stage.notes.is_empty());
    }

    #[test]
    fn wall_clock_update_uses_today() {
        let mut stage = survey_stage();
        stage.update_status(StageStatus::InProgress, Some("kickoff"));

        assert_eq!(stage.start_date, Some(Local::now().date_naive()));
        assert_eq!(stage.notes.len(), 1);
        assert!(stage.notes[0].ends_with("] kickoff"));
    }

    #[test]
    fn status_parsing_rejects_unknown_values() {
        assert_eq!("on_hold".parse::<StageStatus>(), Ok(StageStatus::OnHold));
        assert_eq!(
            "done".parse::<StageStatus>(),
            Err(WorkflowError::InvalidStatus("done".to_string()))
        );
    }
}
