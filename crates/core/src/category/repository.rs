//! Category repository trait

use async_trait::async_trait;

use super::model::Category;
use crate::Result;

/// Read access to the category reference table
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Get all categories, ordered by name
    async fn list(&self) -> Result<Vec<Category>>;

    /// Check whether a category with the given id exists
    async fn exists(&self, id: i64) -> Result<bool>;
}
