/// Comment model
///
/// Comments reference a task by `task_id` without a foreign key. They are
/// never edited and are only removed together with their task
/// (see [`Task::delete`](crate::models::task::Task::delete)).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS comments (
///     task_id integer,
///     user_name text,
///     contents text
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub task_id: Option<i32>,
    pub user_name: Option<String>,
    pub contents: Option<String>,
}

/// Input for a new comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub task_id: i32,
    pub user_name: String,
    pub contents: String,
}

impl Comment {
    pub async fn create(pool: &PgPool, data: NewComment) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO comments (task_id, user_name, contents) VALUES ($1, $2, $3)")
            .bind(data.task_id)
            .bind(data.user_name)
            .bind(data.contents)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// All comments for a task, in no particular order
    pub async fn list_by_task(pool: &PgPool, task_id: i32) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT task_id, user_name, contents FROM comments WHERE task_id = $1",
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }
}
