//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Task, TaskFilter};
use crate::Result;

/// Repository interface for task CRUD operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get the tasks matching every criterion of `filter`, lowest priority first
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: Uuid) -> Result<Option<Task>>;

    /// Get a task by ID together with its category
    async fn get_with_category(&self, id: Uuid) -> Result<Option<Task>>;

    /// Insert a new task
    async fn create(&self, task: Task) -> Result<Task>;

    /// Replace every field of an existing task.
    ///
    /// Fails with [`crate::Error::Concurrency`] when no row was updated.
    async fn update(&self, task: Task) -> Result<Task>;

    /// Check whether a task exists
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Delete a task by ID, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Count all tasks
    async fn count(&self) -> Result<usize>;
}
