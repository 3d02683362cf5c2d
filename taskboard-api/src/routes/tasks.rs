/// Task endpoints
///
/// # Endpoints
///
/// - `POST /task` - Create a task (status "pending")
/// - `GET /task` - List every task
/// - `PUT /task/:id` - Overwrite a task's fields
/// - `DELETE /task/:id` - Delete a task and its comments
/// - `PUT /markProgress/:id` - Set status to "in progress"
///
/// None of these require a session. Update, delete and mark-in-progress
/// answer 204 whether or not the id matched a row.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::models::task::{Task, TaskFields};
use tracing::{debug, info};

/// Body of create and update requests
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskRequest {
    pub title: String,
    pub description: String,
    pub user_name: String,
    pub location: String,
    pub email: String,
    pub phone_number: String,
}

impl From<TaskRequest> for TaskFields {
    fn from(req: TaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            user_name: req.user_name,
            location: req.location,
            email: req.email,
            phone_number: req.phone_number,
        }
    }
}

/// Create a task
///
/// ```text
/// POST /task
/// Content-Type: application/json
///
/// {
///   "title": "Groceries",
///   "description": "Milk and eggs",
///   "user_name": "Ann",
///   "location": "Main St",
///   "email": "ann@x.com",
///   "phone_number": "555-0100"
/// }
/// ```
///
/// Responds `201 Created` with `Created task.`
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<(StatusCode, &'static str)> {
    let task = Task::create(&state.db, req.into()).await?;
    info!(task_id = task.id, title = task.title.as_deref().unwrap_or_default(), "Created task");

    Ok((StatusCode::CREATED, "Created task."))
}

/// Overwrite title, description, user name, location, email and phone number
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<TaskRequest>,
) -> ApiResult<StatusCode> {
    if Task::update(&state.db, id, req.into()).await? {
        info!(task_id = id, "Updated task");
    } else {
        debug!(task_id = id, "Update matched no task");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List every task as a JSON array ordered by id
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(Task::list(&state.db).await?))
}

/// Delete a task and every comment attached to it, atomically
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if Task::delete(&state.db, id).await? {
        info!(task_id = id, "Deleted task");
    } else {
        debug!(task_id = id, "Delete matched no task");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Set a task's status to "in progress"
pub async fn mark_progress(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    if Task::mark_in_progress(&state.db, id).await? {
        info!(task_id = id, "Marked task in progress");
    } else {
        debug!(task_id = id, "Status update matched no task");
    }

    Ok(StatusCode::NO_CONTENT)
}
