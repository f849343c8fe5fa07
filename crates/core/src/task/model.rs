//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::Error;

/// Task lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }

    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.ordinal() == value)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    /// Accepts the variant name or its ordinal.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(ordinal) = value.parse::<i64>() {
            return Self::from_ordinal(ordinal)
                .ok_or_else(|| Error::InvalidInput(format!("Unknown status '{}'", value)));
        }
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown status '{}'", value)))
    }
}

/// Task priority level, ordered from least to most important
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Low
    }
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn from_ordinal(value: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.ordinal() == value)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Ok(ordinal) = value.parse::<i64>() {
            return Self::from_ordinal(ordinal)
                .ok_or_else(|| Error::InvalidInput(format!("Unknown priority '{}'", value)));
        }
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown priority '{}'", value)))
    }
}

/// A tracked work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_on: NaiveDate,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub category_id: i64,
    /// Only populated by eager-loading reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Task {
    /// Create a new task with the given title in the given category
    pub fn new(title: impl Into<String>, category_id: i64) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            created_on: Utc::now().date_naive(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            category_id,
            category: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the creation date
    pub fn with_created_on(mut self, created_on: NaiveDate) -> Self {
        self.created_on = created_on;
        self
    }
}

/// Criteria applied to the task list. Every present criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    /// Case-sensitive substring of the title.
    pub title_search: Option<String>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn new(
        status: Option<TaskStatus>,
        title_search: Option<String>,
        priority: Option<TaskPriority>,
    ) -> Self {
        Self {
            status,
            title_search: title_search.filter(|s| !s.is_empty()),
            priority,
        }
    }
}

/// The applied criteria together with the tasks they selected
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilterView {
    pub selected_status: Option<TaskStatus>,
    pub title_search: Option<String>,
    pub priority_filter: Option<TaskPriority>,
    pub tasks: Vec<Task>,
}

impl TaskFilterView {
    pub fn new(filter: TaskFilter, tasks: Vec<Task>) -> Self {
        Self {
            selected_status: filter.status,
            title_search: filter.title_search,
            priority_filter: filter.priority,
            tasks,
        }
    }
}
