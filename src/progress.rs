//! Per-date checklist progress and the one-way completion mark.
//!
//! State for a date moves NotStarted -> InProgress -> Ready -> Completed.
//! Only [`mark_complete`] reaches Completed, and nothing leaves it.

use crate::dates::canonical;
use crate::models::{
    CHECKLIST, ChecklistEntry, ProgressState, ProgressSummary, checkable_count, is_checkable_index,
};
use crate::storage::{KeyValueStore, StoreError};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

const COMPLETED_MARKER: &str = "completed";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("checklist item {0} cannot be checked")]
    NotCheckable(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistProgress {
    pub date: NaiveDate,
    pub checked: BTreeMap<usize, bool>,
}

impl ChecklistProgress {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            checked: BTreeMap::new(),
        }
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(&index).copied().unwrap_or(false)
    }

    fn checked_count(&self) -> usize {
        self.checked
            .iter()
            .filter(|(index, checked)| **checked && is_checkable_index(**index))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub progress: ChecklistProgress,
    /// True only on the toggle that moved the date into Ready.
    pub entered_ready: bool,
}

pub fn completion_key(date: NaiveDate) -> String {
    canonical(date)
}

pub fn plan_key(date: NaiveDate) -> String {
    format!("{}-plan", canonical(date))
}

pub fn initialize(store: &dyn KeyValueStore, date: NaiveDate) -> ChecklistProgress {
    let Some(raw) = store.get(&plan_key(date)) else {
        return ChecklistProgress::empty(date);
    };

    match serde_json::from_str::<BTreeMap<usize, bool>>(&raw) {
        Ok(mut checked) => {
            checked.retain(|index, _| is_checkable_index(*index));
            ChecklistProgress { date, checked }
        }
        Err(err) => {
            debug!(date = %canonical(date), "ignoring malformed checklist progress: {err}");
            ChecklistProgress::empty(date)
        }
    }
}

pub fn toggle(
    store: &mut dyn KeyValueStore,
    progress: ChecklistProgress,
    index: usize,
) -> Result<ToggleOutcome, ProgressError> {
    if !is_checkable_index(index) {
        return Err(ProgressError::NotCheckable(index));
    }

    let was_ready = is_ready_to_complete(store, &progress);

    let mut progress = progress;
    let next = !progress.is_checked(index);
    progress.checked.insert(index, next);

    let payload = serde_json::to_string(&progress.checked).map_err(StoreError::from)?;
    store.set(&plan_key(progress.date), &payload)?;

    let entered_ready = !was_ready && is_ready_to_complete(store, &progress);
    Ok(ToggleOutcome {
        progress,
        entered_ready,
    })
}

pub fn percent_complete(progress: &ChecklistProgress) -> u8 {
    let total = checkable_count();
    let done = progress.checked_count().min(total);
    // Integer round-half-up of 100 * done / total.
    ((200 * done + total) / (2 * total)) as u8
}

pub fn is_ready_to_complete(store: &dyn KeyValueStore, progress: &ChecklistProgress) -> bool {
    percent_complete(progress) == 100 && !is_already_complete(store, progress.date)
}

pub fn is_already_complete(store: &dyn KeyValueStore, date: NaiveDate) -> bool {
    store.get(&completion_key(date)).as_deref() == Some(COMPLETED_MARKER)
}

/// Returns whether the mark was newly set.
pub fn mark_complete(store: &mut dyn KeyValueStore, date: NaiveDate) -> Result<bool, StoreError> {
    if is_already_complete(store, date) {
        return Ok(false);
    }
    store.set(&completion_key(date), COMPLETED_MARKER)?;
    Ok(true)
}

pub fn state(store: &dyn KeyValueStore, progress: &ChecklistProgress) -> ProgressState {
    if is_already_complete(store, progress.date) {
        return ProgressState::Completed;
    }
    match percent_complete(progress) {
        100 => ProgressState::Ready,
        _ if progress.checked_count() > 0 => ProgressState::InProgress,
        _ => ProgressState::NotStarted,
    }
}

pub fn summarize(store: &dyn KeyValueStore, progress: &ChecklistProgress) -> ProgressSummary {
    let checklist = CHECKLIST
        .iter()
        .enumerate()
        .map(|(index, item)| ChecklistEntry {
            index,
            activity: item.activity.to_string(),
            minutes: item.minutes,
            checked: item.is_checkable().then(|| progress.is_checked(index)),
        })
        .collect();

    ProgressSummary {
        checklist,
        percent: percent_complete(progress),
        state: state(store, progress),
        can_complete: is_ready_to_complete(store, progress),
        completed: is_already_complete(store, progress.date),
    }
}
