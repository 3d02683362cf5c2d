/// Account endpoints
///
/// # Endpoints
///
/// - `POST /user/new` - Register
/// - `POST /user/login` - Start an authenticated session
/// - `PUT /user/edit` - Update display name and phone number (session)
/// - `DELETE /user/delete` - Delete the account (session)
/// - `GET /user/data?target_email=` - Public profile of an account
/// - `GET /user/logout` - End the session
///
/// Edit and delete act only on the caller's own account: the `user_email` in
/// the body must equal the session identity, otherwise the request is refused
/// with 403 whether or not the target exists.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use taskboard_shared::{
    auth::{
        credentials,
        session::{self as gate, Identity, LOGIN_PAGE},
    },
    models::user::User,
};
use tower_sessions::Session;
use validator::Validate;

/// Body of register and login requests
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub user_email: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always "valid"; failures are reported through the status code
    pub login_status: String,
}

/// Edit request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditUserRequest {
    pub user_email: String,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Delete request
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteUserRequest {
    pub user_email: String,
}

/// Query of the profile lookup
#[derive(Debug, Deserialize)]
pub struct UserDataQuery {
    #[serde(default)]
    pub target_email: String,
}

/// Public profile; unset fields are empty strings
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDataResponse {
    pub email: String,
    pub display_name: String,
    pub phone_number: String,
}

impl From<User> for UserDataResponse {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name_or_default().to_string(),
            phone_number: user.phone_number_or_default().to_string(),
            email: user.email,
        }
    }
}

fn ensure_owner(identity: &Identity, email: &str) -> ApiResult<()> {
    if identity.owns(email) {
        Ok(())
    } else {
        tracing::warn!(
            session_email = %identity.email,
            target_email = %email,
            "Refused account change for another identity"
        );
        Err(ApiError::Forbidden("Invalid session.".to_string()))
    }
}

/// Register a new account
///
/// ```text
/// POST /user/new
/// Content-Type: application/json
///
/// { "user_email": "a@x.com", "password": "pw" }
/// ```
///
/// # Responses
///
/// - `201 Created`: `Created account.`
/// - `400 Bad Request`: an empty or missing field
/// - `409 Conflict`: `Account already exists.`
/// - `500 Internal Server Error`: storage failure
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, &'static str)> {
    req.validate()?;

    credentials::register_user(&state.db, &req.user_email, &req.password).await?;

    Ok((StatusCode::CREATED, "Created account."))
}

/// Log in and bind the session cookie to the account
///
/// ```text
/// POST /user/login
/// Content-Type: application/json
///
/// { "user_email": "a@x.com", "password": "pw" }
/// ```
///
/// # Responses
///
/// - `200 OK`: `{"login_status":"valid"}` plus the session cookie
/// - `400 Bad Request`: an empty or missing field
/// - `401 Unauthorized`: unknown email or wrong password, after the
///   configured failure delay
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    gate::login(
        &state.db,
        &session,
        &req.user_email,
        &req.password,
        state.login_failure_delay(),
    )
    .await?;

    Ok(Json(LoginResponse {
        login_status: "valid".to_string(),
    }))
}

/// Update display name and phone number of the caller's account
///
/// # Responses
///
/// - `204 No Content`
/// - `303 See Other` to the login page without a session
/// - `403 Forbidden`: `Invalid session.`
pub async fn edit_user(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<EditUserRequest>,
) -> ApiResult<StatusCode> {
    ensure_owner(&identity, &req.user_email)?;

    credentials::update_profile(
        &state.db,
        &req.user_email,
        req.display_name.as_deref(),
        req.phone_number.as_deref(),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete the caller's account and end the session
///
/// A failure to clear the session is logged and does not change the answer,
/// since the account row is already removed.
///
/// # Responses
///
/// - `204 No Content`
/// - `303 See Other` to the login page without a session
/// - `403 Forbidden`: `Invalid session.`
pub async fn delete_user(
    State(state): State<AppState>,
    identity: Identity,
    session: Session,
    Json(req): Json<DeleteUserRequest>,
) -> ApiResult<StatusCode> {
    ensure_owner(&identity, &req.user_email)?;

    credentials::delete_user(&state.db, &req.user_email).await?;

    if let Err(e) = gate::logout(&session).await {
        tracing::warn!(
            email = %identity.email,
            error = %e,
            "Failed to clear session of deleted account"
        );
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Public profile of an account
///
/// # Responses
///
/// - `200 OK`: `{"email", "display_name", "phone_number"}`
/// - `404 Not Found`: no such account
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserDataQuery>,
) -> ApiResult<Json<UserDataResponse>> {
    let user = User::find_by_email(&state.db, &query.target_email)
        .await?
        .ok_or_else(|| ApiError::NotFound("No such account.".to_string()))?;

    Ok(Json(user.into()))
}

/// End the session and send the caller back to the login page
pub async fn logout(session: Session) -> ApiResult<Redirect> {
    gate::logout(&session).await?;
    Ok(Redirect::to(LOGIN_PAGE))
}
