//! Option lists for form selectors

use serde::Serialize;

use crate::category::Category;
use crate::task::{TaskPriority, TaskStatus};

/// One entry of a `<select>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectListItem {
    pub text: String,
    pub value: String,
    pub selected: bool,
}

impl SelectListItem {
    pub fn new(text: impl Into<String>, value: impl Into<String>, selected: bool) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            selected,
        }
    }
}

pub fn status_options(selected: Option<TaskStatus>) -> Vec<SelectListItem> {
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            SelectListItem::new(status.as_str(), status.as_str(), Some(status) == selected)
        })
        .collect()
}

pub fn priority_options(selected: Option<TaskPriority>) -> Vec<SelectListItem> {
    TaskPriority::ALL
        .into_iter()
        .map(|priority| {
            SelectListItem::new(priority.as_str(), priority.as_str(), Some(priority) == selected)
        })
        .collect()
}

/// Categories shown by name, submitted by id
pub fn category_options(categories: &[Category], selected: Option<i64>) -> Vec<SelectListItem> {
    categories
        .iter()
        .map(|c| SelectListItem::new(c.name.as_str(), c.id.to_string(), Some(c.id) == selected))
        .collect()
}
