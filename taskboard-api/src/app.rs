/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
/// use tower_sessions::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state, MemoryStore::default());
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, routes};
use axum::{
    routing::{get, post, put},
    Router,
};
use sha2::{Digest, Sha512};
use sqlx::PgPool;
use std::{sync::Arc, time::Duration};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tower_sessions::{
    cookie::{Key, SameSite},
    SessionManagerLayer, SessionStore,
};
use tracing::Level;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "taskboard.sid";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Cookie signing key derived from the configured secret
    ///
    /// SHA-512 stretches any secret to the 64 bytes the cookie key requires.
    pub fn session_key(&self) -> Key {
        let digest = Sha512::digest(self.config.session.secret.as_bytes());
        Key::from(digest.as_slice())
    }

    pub fn login_failure_delay(&self) -> Duration {
        self.config.session.login_failure_delay()
    }
}

/// Builds the complete router
///
/// ```text
/// /
/// ├── GET    /health
/// ├── /user/
/// │   ├── POST   /new
/// │   ├── POST   /login
/// │   ├── PUT    /edit            (session)
/// │   ├── DELETE /delete          (session)
/// │   ├── GET    /data?target_email=
/// │   └── GET    /logout
/// ├── GET|POST   /task
/// ├── PUT|DELETE /task/:id
/// ├── GET        /task/:id/comments
/// ├── PUT        /markProgress/:id
/// ├── POST       /comment         (session)
/// ├── GET        /comment?task_id=
/// └── *          static files from `STATIC_DIR`
/// ```
///
/// Sessions are persisted through `store`; any `tower_sessions::SessionStore`
/// works, which lets tests run against `MemoryStore`.
pub fn build_router<Store>(state: AppState, store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let session_layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(state.config.session.cookie_secure)
        .with_signed(state.session_key());

    let user_routes = Router::new()
        .route("/new", post(routes::users::create_user))
        .route("/login", post(routes::users::login))
        .route("/edit", put(routes::users::edit_user))
        .route("/delete", axum::routing::delete(routes::users::delete_user))
        .route("/data", get(routes::users::get_user))
        .route("/logout", get(routes::users::logout));

    let task_routes = Router::new()
        .route(
            "/task",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/task/:id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        )
        .route("/task/:id/comments", get(routes::comments::list_task_comments))
        .route("/markProgress/:id", put(routes::tasks::mark_progress));

    let comment_routes = Router::new().route(
        "/comment",
        get(routes::comments::list_comments).post(routes::comments::create_comment),
    );

    let static_files = ServeDir::new(&state.config.api.static_dir);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/user", user_routes)
        .merge(task_routes)
        .merge(comment_routes)
        .fallback_service(static_files)
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
