//! SQLite-backed task storage
//!
//! Filtering and ordering happen in the query, so only matching rows are
//! loaded.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use super::model::{Task, TaskFilter, TaskPriority, TaskStatus};
use super::repository::TaskRepository;
use crate::category::Category;
use crate::{Error, Result};

const TASK_COLUMNS: &str =
    "t.task_id, t.title, t.description, t.created_on, t.status, t.priority, t.category_id";

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    title: String,
    description: String,
    created_on: NaiveDate,
    status: i64,
    priority: i64,
    category_id: i64,
    category_name: Option<String>,
}

impl TryFrom<TaskRow> for Task {
    type Error = Error;

    fn try_from(row: TaskRow) -> Result<Self> {
        let status = TaskStatus::from_ordinal(row.status).ok_or_else(|| {
            Error::Storage(format!("Task {} has unknown status {}", row.task_id, row.status))
        })?;
        let priority = TaskPriority::from_ordinal(row.priority).ok_or_else(|| {
            Error::Storage(format!(
                "Task {} has unknown priority {}",
                row.task_id, row.priority
            ))
        })?;

        Ok(Task {
            task_id: row.task_id,
            title: row.title,
            description: row.description,
            created_on: row.created_on,
            status,
            priority,
            category_id: row.category_id,
            category: row
                .category_name
                .map(|name| Category::new(row.category_id, name)),
        })
    }
}

fn map_write_error(err: sqlx::Error, task: &Task) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return Error::InvalidInput(format!("Task with ID {} already exists", task.task_id));
        }
        if db.is_foreign_key_violation() {
            return Error::InvalidInput(format!("Category {} does not exist", task.category_id));
        }
    }
    err.into()
}

/// Task store over a shared connection pool
#[derive(Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, id: Uuid, with_category: bool) -> Result<Option<Task>> {
        let sql = if with_category {
            format!(
                "SELECT {}, c.name AS category_name FROM tasks t \
                 LEFT JOIN categories c ON c.id = t.category_id WHERE t.task_id = ?",
                TASK_COLUMNS
            )
        } else {
            format!(
                "SELECT {}, NULL AS category_name FROM tasks t WHERE t.task_id = ?",
                TASK_COLUMNS
            )
        };

        let row: Option<TaskRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Task::try_from).transpose()
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn list(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {}, NULL AS category_name FROM tasks t WHERE 1 = 1",
            TASK_COLUMNS
        ));

        if let Some(status) = filter.status {
            query.push(" AND t.status = ").push_bind(status.ordinal());
        }
        if let Some(title) = filter.title_search {
            // instr() compares bytes, unlike LIKE which folds ASCII case
            query.push(" AND instr(t.title, ").push_bind(title).push(") > 0");
        }
        if let Some(priority) = filter.priority {
            query.push(" AND t.priority = ").push_bind(priority.ordinal());
        }
        query.push(" ORDER BY t.priority ASC, t.rowid ASC");

        let rows: Vec<TaskRow> = query.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>> {
        self.fetch_one(id, false).await
    }

    async fn get_with_category(&self, id: Uuid) -> Result<Option<Task>> {
        self.fetch_one(id, true).await
    }

    async fn create(&self, task: Task) -> Result<Task> {
        sqlx::query(
            "INSERT INTO tasks \
             (task_id, title, description, created_on, status, priority, category_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(task.task_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.created_on)
        .bind(task.status.ordinal())
        .bind(task.priority.ordinal())
        .bind(task.category_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &task))?;

        tracing::info!(task_id = %task.task_id, "Created task");
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task> {
        let result = sqlx::query(
            "UPDATE tasks SET title = ?, description = ?, created_on = ?, status = ?, \
             priority = ?, category_id = ? WHERE task_id = ?",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.created_on)
        .bind(task.status.ordinal())
        .bind(task.priority.ordinal())
        .bind(task.category_id)
        .bind(task.task_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &task))?;

        if result.rows_affected() == 0 {
            return Err(Error::Concurrency(task.task_id));
        }

        tracing::info!(task_id = %task.task_id, "Updated task");
        Ok(task)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM tasks WHERE task_id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
