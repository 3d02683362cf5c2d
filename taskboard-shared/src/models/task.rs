/// Task model and database operations
///
/// # Status
///
/// `req_status` is free text. Two values are written by this crate:
///
/// ```text
/// pending → in progress
/// ```
///
/// New tasks always start as [`STATUS_PENDING`]; the only other transition is
/// [`Task::mark_in_progress`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS tasks (
///     title text,
///     description text,
///     user_name text,
///     location text,
///     email text,
///     phone_number text,
///     req_status text,
///     id serial UNIQUE
/// );
/// ```
///
/// Concurrent updates to one row are last-writer-wins; there is no version
/// column.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Status assigned on creation
pub const STATUS_PENDING: &str = "pending";

/// Status assigned by [`Task::mark_in_progress`]
pub const STATUS_IN_PROGRESS: &str = "in progress";

/// Task row as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_name: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub req_status: Option<String>,
}

/// Writable task fields, used for both create and full update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub user_name: String,
    pub location: String,
    pub email: String,
    pub phone_number: String,
}

impl Task {
    /// Inserts a task with status "pending" and returns the stored row
    pub async fn create(pool: &PgPool, data: TaskFields) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_name, location, email, phone_number, req_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, user_name, location, email, phone_number, req_status
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_name)
        .bind(data.location)
        .bind(data.email)
        .bind(data.phone_number)
        .bind(STATUS_PENDING)
        .fetch_one(pool)
        .await
    }

    /// Overwrites every writable field of a task; status is left alone
    ///
    /// Returns false when no task has this id.
    pub async fn update(pool: &PgPool, id: i32, data: TaskFields) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, user_name = $3,
                location = $4, email = $5, phone_number = $6
            WHERE id = $7
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_name)
        .bind(data.location)
        .bind(data.email)
        .bind(data.phone_number)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sets the status to "in progress"; returns false when no task matched
    pub async fn mark_in_progress(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET req_status = $1 WHERE id = $2")
            .bind(STATUS_IN_PROGRESS)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every task, ordered by id. No pagination or filtering.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, user_name, location, email, phone_number, req_status
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Deletes a task together with its comments
    ///
    /// Both deletes run in one transaction; if either fails nothing is
    /// removed. Returns false when no task had this id (its stray comments,
    /// if any, are still removed).
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM comments WHERE task_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
