//! SQLite-backed category storage

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::model::Category;
use super::repository::CategoryRepository;
use crate::Result;

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(row.id, row.name)
    }
}

/// Category store over a shared connection pool
#[derive(Clone)]
pub struct SqliteCategoryStore {
    pool: SqlitePool,
}

impl SqliteCategoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a category and return it with its assigned id
    pub async fn insert(&self, name: &str) -> Result<Category> {
        let id = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        tracing::info!(category_id = id, "Created category");
        Ok(Category::new(id, name))
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}
