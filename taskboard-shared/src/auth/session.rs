/// Session-backed authentication gate
///
/// A connection moves through
///
/// ```text
/// Anonymous → (login) → Authenticated → (logout / expiry) → Anonymous
/// ```
///
/// and the only thing stored in the session is the raw email of the
/// authenticated account, under [`SESSION_IDENTITY_KEY`]. The session itself
/// comes from `tower-sessions`, which hands each handler an explicit
/// [`Session`] and persists it through a pluggable `SessionStore`.
///
/// Handlers that need a logged-in caller take an [`Identity`] argument:
///
/// ```no_run
/// use taskboard_shared::auth::session::Identity;
///
/// async fn whoami(identity: Identity) -> String {
///     identity.email
/// }
/// ```
///
/// Without a session the extractor rejects with a redirect to
/// [`LOGIN_PAGE`], which is what the static front end expects.

use crate::auth::credentials::{self, CredentialError};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::PgPool;
use std::time::Duration;
use tower_sessions::Session;
use tracing::{debug, error, info, warn};

/// Session key holding the authenticated email
pub const SESSION_IDENTITY_KEY: &str = "user_email";

/// Where unauthenticated callers are sent
pub const LOGIN_PAGE: &str = "/index.html";

/// Pause applied to every failed login
pub const DEFAULT_LOGIN_FAILURE_DELAY: Duration = Duration::from_secs(2);

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    /// True when this identity owns the account `email`
    pub fn owns(&self, email: &str) -> bool {
        self.email == email
    }
}

/// Login failures
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown email or wrong password, not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Rejection produced by the [`Identity`] extractor
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    /// No authenticated session
    #[error("Login required")]
    LoginRequired,

    /// The session layer is missing or its store failed
    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRequired => Redirect::to(LOGIN_PAGE).into_response(),
            AuthRejection::SessionUnavailable(msg) => {
                error!("Session unavailable: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session unavailable").into_response()
            }
        }
    }
}

/// Authenticates `email`/`password` and binds the session to the email
///
/// A missing account and a wrong password take the same path: one lookup,
/// one verification, one `failure_delay` pause, one generic error. The pause
/// only holds this request; other requests keep running.
///
/// On success the session id is rotated before the identity is stored.
pub async fn login(
    pool: &PgPool,
    session: &Session,
    email: &str,
    password: &str,
    failure_delay: Duration,
) -> Result<Identity, LoginError> {
    if !credentials::verify_password(pool, email, password).await? {
        warn!(email, "Failed login attempt");
        tokio::time::sleep(failure_delay).await;
        return Err(LoginError::InvalidCredentials);
    }

    session.cycle_id().await?;
    session.insert(SESSION_IDENTITY_KEY, email).await?;

    info!(email, "Logged in");
    Ok(Identity {
        email: email.to_string(),
    })
}

/// Clears the session, returning the connection to anonymous
pub async fn logout(session: &Session) -> Result<(), tower_sessions::session::Error> {
    if let Some(identity) = current_identity(session).await? {
        info!(email = %identity.email, "Logged out");
    }
    session.flush().await
}

/// The identity bound to this session, if any
pub async fn current_identity(
    session: &Session,
) -> Result<Option<Identity>, tower_sessions::session::Error> {
    let email: Option<String> = session.get(SESSION_IDENTITY_KEY).await?;
    Ok(email.map(|email| Identity { email }))
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AuthRejection::SessionUnavailable(msg.to_string()))?;

        match current_identity(&session).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => {
                debug!("Rejected request without an authenticated session");
                Err(AuthRejection::LoginRequired)
            }
            Err(e) => Err(AuthRejection::SessionUnavailable(e.to_string())),
        }
    }
}
