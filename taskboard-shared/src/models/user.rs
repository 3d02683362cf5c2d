/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE IF NOT EXISTS users (
///     email text UNIQUE,
///     display_name text,
///     phone_number text,
///     salt text NOT NULL,
///     hash text NOT NULL
/// );
/// ```
///
/// The email is the account identifier and the session identity. Profile
/// edits only touch `display_name` and `phone_number`; email and credentials
/// are fixed once the row exists.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::models::user::{NewUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// User::create(&pool, NewUser {
///     email: "a@x.com".to_string(),
///     salt: "c2FsdHNhbHQ".to_string(),
///     hash: "aGFzaA".to_string(),
/// })
/// .await?;
///
/// assert!(User::exists(&pool, "a@x.com").await?);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Account identifier
    pub email: String,

    /// Optional display name
    pub display_name: Option<String>,

    /// Optional phone number
    pub phone_number: Option<String>,
}

/// Stored credential pair for an account
///
/// Not serializable on purpose: it never leaves the server.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredCredentials {
    /// Base64 salt text
    pub salt: String,

    /// Base64 hash output
    pub hash: String,
}

/// Input for inserting a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub salt: String,
    pub hash: String,
}

/// Outcome of an insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The row was inserted
    Created,

    /// Another row already holds this email
    AlreadyExists,
}

impl User {
    /// Returns true iff an account with this email exists
    pub async fn exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Inserts an account
    ///
    /// A unique-constraint violation on `email` is reported as
    /// [`CreateOutcome::AlreadyExists`] rather than an error, which covers two
    /// registrations racing past the existence check.
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<CreateOutcome, sqlx::Error> {
        let result = sqlx::query("INSERT INTO users (email, salt, hash) VALUES ($1, $2, $3)")
            .bind(data.email)
            .bind(data.salt)
            .bind(data.hash)
            .execute(pool)
            .await;

        match result {
            Ok(_) => Ok(CreateOutcome::Created),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// Finds the public view of an account
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT email, display_name, phone_number
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Loads the salt and hash for an account
    pub async fn find_credentials(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<StoredCredentials>, sqlx::Error> {
        sqlx::query_as::<_, StoredCredentials>(
            "SELECT salt, hash FROM users WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Overwrites the profile fields of an account
    ///
    /// Ownership must already be checked by the caller. Returns false when no
    /// row matched.
    pub async fn update_profile(
        pool: &PgPool,
        email: &str,
        display_name: Option<&str>,
        phone_number: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET display_name = $2, phone_number = $3 WHERE email = $1",
        )
        .bind(email)
        .bind(display_name)
        .bind(phone_number)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes an account; returns false when no row matched
    pub async fn delete(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Display name, or an empty string when unset
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }

    /// Phone number, or an empty string when unset
    pub fn phone_number_or_default(&self) -> &str {
        self.phone_number.as_deref().unwrap_or_default()
    }
}
