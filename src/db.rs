use chrono::{NaiveDate, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Todo, TodoPatch};

/// Store for the single `todos` table. Cheap to clone; all clones share
/// one connection pool, and each operation holds a pooled connection only
/// for the duration of its statement.
#[derive(Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    pub async fn connect(config: &Config) -> Result<Self, ApiError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Idempotent schema bootstrap: create the table if absent, and add the
    /// `created_at` column when an older table shape pre-exists without it.
    /// Additive only; existing rows are backfilled, never dropped.
    pub async fn bootstrap(&self) -> Result<(), ApiError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                completed BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        let has_created_at =
            sqlx::query("SELECT 1 FROM pragma_table_info('todos') WHERE name = 'created_at'")
                .fetch_optional(&self.pool)
                .await?
                .is_some();

        if !has_created_at {
            sqlx::query("ALTER TABLE todos ADD COLUMN created_at TEXT")
                .execute(&self.pool)
                .await?;
            sqlx::query("UPDATE todos SET created_at = ? WHERE created_at IS NULL")
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;
            tracing::info!("added created_at column to existing todos table");
        }

        tracing::info!("todos table is ready");
        Ok(())
    }

    /// All todos, or only those created on `filter_date` (calendar-day
    /// match). Incomplete items sort before completed ones; within each
    /// group newest first, ties broken by id.
    pub async fn list(&self, filter_date: Option<NaiveDate>) -> Result<Vec<Todo>, ApiError> {
        let todos = match filter_date {
            Some(date) => {
                sqlx::query_as::<_, Todo>(
                    "SELECT id, text, completed, created_at FROM todos
                     WHERE date(created_at) = ?
                     ORDER BY completed ASC, created_at DESC, id DESC",
                )
                .bind(date)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Todo>(
                    "SELECT id, text, completed, created_at FROM todos
                     ORDER BY completed ASC, created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(todos)
    }

    /// Inserts a todo and reads the stored row back. The returned record,
    /// not the input, is authoritative for `id` and `created_at`.
    pub async fn create(&self, text: &str) -> Result<Todo, ApiError> {
        let result = sqlx::query("INSERT INTO todos (text, created_at) VALUES (?, ?)")
            .bind(text)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, text, completed, created_at FROM todos WHERE id = ?",
        )
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    /// Applies only the fields present in `patch`; `id` and `created_at`
    /// are never touched. Returns the updated row, or `NotFound` if no row
    /// has the given id.
    pub async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Todo, ApiError> {
        let result = sqlx::query(
            "UPDATE todos
             SET text = COALESCE(?, text), completed = COALESCE(?, completed)
             WHERE id = ?",
        )
        .bind(patch.text.as_deref())
        .bind(patch.completed)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }

        let todo = sqlx::query_as::<_, Todo>(
            "SELECT id, text, completed, created_at FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    /// Idempotent: deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
