/// Comment endpoints
///
/// # Endpoints
///
/// - `POST /comment` - Add a comment to a task (session)
/// - `GET /comment?task_id=` - Comments of a task
/// - `GET /task/:id/comments` - Same, with the id in the path
///
/// Comments are removed only together with their task.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskboard_shared::{
    auth::session::Identity,
    models::comment::{Comment, NewComment},
};
use tracing::info;

/// Body of a new comment
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentRequest {
    pub task_id: i32,
    pub user_name: String,
    pub contents: String,
}

/// Query of the comment listing
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    pub task_id: i32,
}

/// Add a comment; requires an authenticated session
///
/// ```text
/// POST /comment
/// Content-Type: application/json
///
/// { "task_id": 3, "user_name": "Ann", "contents": "On my way" }
/// ```
///
/// Responds `201 Created` with `Created comment.`, or redirects to the login
/// page without a session.
pub async fn create_comment(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, &'static str)> {
    let task_id = req.task_id;
    Comment::create(
        &state.db,
        NewComment {
            task_id,
            user_name: req.user_name,
            contents: req.contents,
        },
    )
    .await?;
    info!(task_id, email = %identity.email, "Created comment");

    Ok((StatusCode::CREATED, "Created comment."))
}

/// Comments of the task given by `?task_id=`
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentQuery>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(Comment::list_by_task(&state.db, query.task_id).await?))
}

/// Comments of the task given in the path
pub async fn list_task_comments(
    State(state): State<AppState>,
    Path(task_id): Path<i32>,
) -> ApiResult<Json<Vec<Comment>>> {
    Ok(Json(Comment::list_by_task(&state.db, task_id).await?))
}
