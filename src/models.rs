use serde::{Deserialize, Serialize};

/// One row of the devotional sheet. Columns other than these four are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DevotionalRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub scriptures: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub activity: &'static str,
    /// `None` marks the informational header entry.
    pub minutes: Option<u32>,
}

impl ChecklistItem {
    pub fn is_checkable(&self) -> bool {
        self.minutes.is_some()
    }
}

pub const CHECKLIST: [ChecklistItem; 10] = [
    ChecklistItem { activity: "Please tick after you complete this daily plan", minutes: None },
    ChecklistItem { activity: "Praise", minutes: Some(5) },
    ChecklistItem { activity: "Bible Reading", minutes: Some(20) },
    ChecklistItem { activity: "Prayer based on the Bible reading", minutes: Some(5) },
    ChecklistItem { activity: "General Prayer Points", minutes: Some(10) },
    ChecklistItem { activity: "Personal Prayer Points", minutes: Some(10) },
    ChecklistItem { activity: "Worship", minutes: Some(4) },
    ChecklistItem { activity: "Memory Verse", minutes: Some(2) },
    ChecklistItem { activity: "Confession of the Word", minutes: Some(2) },
    ChecklistItem { activity: "Waiting on God", minutes: Some(2) },
];

pub fn is_checkable_index(index: usize) -> bool {
    CHECKLIST.get(index).is_some_and(ChecklistItem::is_checkable)
}

pub fn checkable_count() -> usize {
    CHECKLIST.iter().filter(|item| item.is_checkable()).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    NotStarted,
    InProgress,
    Ready,
    Completed,
}

#[derive(Debug, Deserialize)]
pub struct DevotionalQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub action: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: String,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub index: usize,
    pub activity: String,
    pub minutes: Option<u32>,
    /// Absent for the informational entry.
    pub checked: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub checklist: Vec<ChecklistEntry>,
    pub percent: u8,
    pub state: ProgressState,
    pub can_complete: bool,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevotionalView {
    pub date: String,
    pub display_date: String,
    pub devotional: Option<DevotionalRecord>,
    pub progress: Option<ProgressSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub date: String,
    pub progress: ProgressSummary,
    pub entered_ready: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteResponse {
    pub date: String,
    pub progress: ProgressSummary,
}
