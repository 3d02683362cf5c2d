/// Schema bootstrap
///
/// Creates the `users`, `tasks` and `comments` tables when they are missing.
/// Every statement uses `CREATE TABLE IF NOT EXISTS`, so running the bootstrap
/// again (or from several instances at once) leaves existing tables and rows
/// untouched. There is no migration history: the three statements below are
/// the whole schema.
///
/// Referential integrity between `tasks` and `comments` is kept by
/// [`Task::delete`](crate::models::task::Task::delete), not by a foreign key.

use sqlx::PgPool;
use tracing::{debug, error, info};

/// Table definitions, applied in order
pub const SCHEMA_STATEMENTS: [(&str, &str); 3] = [
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            email text UNIQUE,
            display_name text,
            phone_number text,
            salt text NOT NULL,
            hash text NOT NULL
        )
        "#,
    ),
    (
        "tasks",
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            title text,
            description text,
            user_name text,
            location text,
            email text,
            phone_number text,
            req_status text,
            id serial UNIQUE
        )
        "#,
    ),
    (
        "comments",
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            task_id integer,
            user_name text,
            contents text
        )
        "#,
    ),
];

/// Creates all tables that do not exist yet
///
/// Stops at the first failing statement and returns its error; callers are
/// expected to abort startup, since every handler depends on these tables.
pub async fn bootstrap(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Bootstrapping database schema");

    for (table, statement) in SCHEMA_STATEMENTS {
        debug!(table, "Ensuring table exists");
        if let Err(e) = sqlx::query(statement).execute(pool).await {
            error!(table, error = %e, "Schema bootstrap failed");
            return Err(e);
        }
    }

    info!("Database schema ready");
    Ok(())
}
