//! Submitted task form and its validation
//!
//! Browsers send every field as text, so the form keeps raw strings and only
//! produces a [`Task`] once every rule holds.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::model::{Task, TaskPriority, TaskStatus};
use crate::category::CategoryRepository;
use crate::Result;

/// Validation messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            let key = form_field_name(&field.to_string());
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", key));
                fields.add(key, message);
            }
        }
        fields
    }
}

/// Maps struct field names onto the names the form posts
fn form_field_name(field: &str) -> &'static str {
    match field {
        "task_id" => "taskId",
        "title" => "title",
        "description" => "description",
        "created_on" => "createdOn",
        "status" => "status",
        "priority" => "priority",
        "category_id" => "categoryId",
        _ => "form",
    }
}

fn non_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn valid_status(value: &str) -> std::result::Result<(), ValidationError> {
    value
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status").with_message("The Status field is invalid.".into()))
}

fn valid_priority(value: &str) -> std::result::Result<(), ValidationError> {
    value.parse::<TaskPriority>().map(|_| ()).map_err(|_| {
        ValidationError::new("priority").with_message("The Priority field is invalid.".into())
    })
}

fn valid_category_id(value: &str) -> std::result::Result<(), ValidationError> {
    value.trim().parse::<i64>().map(|_| ()).map_err(|_| {
        ValidationError::new("category_id")
            .with_message("The CategoryId field must be a number.".into())
    })
}

fn valid_date(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("created_on")
                .with_message("The CreatedOn field must be a date (YYYY-MM-DD).".into())
        })
}

/// A task as submitted by the create and edit forms
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[serde(default)]
    pub task_id: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "The Title field is required."))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "The Description field is required."))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "valid_date"))]
    pub created_on: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "The Status field is required."),
        custom(function = "valid_status")
    )]
    pub status: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "The Priority field is required."),
        custom(function = "valid_priority")
    )]
    pub priority: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "The CategoryId field is required."),
        custom(function = "valid_category_id")
    )]
    pub category_id: Option<String>,
}

impl TaskForm {
    /// A blank form for a new task, dated today
    pub fn blank() -> Self {
        Self {
            created_on: Some(Utc::now().date_naive().format("%Y-%m-%d").to_string()),
            status: Some(TaskStatus::default().as_str().to_string()),
            priority: Some(TaskPriority::default().as_str().to_string()),
            ..Self::default()
        }
    }

    /// The form's values for an existing task
    pub fn from_task(task: &Task) -> Self {
        Self {
            task_id: Some(task.task_id.to_string()),
            title: task.title.clone(),
            description: task.description.clone(),
            created_on: Some(task.created_on.format("%Y-%m-%d").to_string()),
            status: Some(task.status.as_str().to_string()),
            priority: Some(task.priority.as_str().to_string()),
            category_id: Some(task.category_id.to_string()),
        }
    }

    /// The identifier carried in the form body, if it parses
    pub fn submitted_id(&self) -> Option<Uuid> {
        self.task_id
            .as_deref()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
    }

    pub fn status_value(&self) -> Option<TaskStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn priority_value(&self) -> Option<TaskPriority> {
        self.priority.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn category_id_value(&self) -> Option<i64> {
        self.category_id
            .as_deref()
            .and_then(|s| s.trim().parse().ok())
    }

    /// Validate the form and build the task it describes.
    ///
    /// The outer `Result` carries storage failures while checking the
    /// category; the inner one carries validation messages.
    pub async fn into_task(
        self,
        task_id: Uuid,
        categories: &dyn CategoryRepository,
    ) -> Result<std::result::Result<Task, FieldErrors>> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(e),
        };

        if let Some(category_id) = self.category_id_value() {
            if !categories.exists(category_id).await? {
                errors.add("categoryId", format!("Category {} does not exist.", category_id));
            }
        }

        if !errors.is_empty() {
            return Ok(Err(errors));
        }

        let created_on = self
            .created_on
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Utc::now().date_naive());

        let (Some(status), Some(priority), Some(category_id)) = (
            self.status_value(),
            self.priority_value(),
            self.category_id_value(),
        ) else {
            // validate() already rejected missing or malformed values
            let mut errors = FieldErrors::default();
            errors.add("form", "The form is incomplete.");
            return Ok(Err(errors));
        };

        Ok(Ok(Task {
            task_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            created_on,
            status,
            priority,
            category_id,
            category: None,
        }))
    }
}
