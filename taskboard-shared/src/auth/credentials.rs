/// Credential store
///
/// Persists one salt/hash pair per email and answers "does this account
/// exist" and "is this the right password". Storage failures are returned to
/// the caller instead of being folded into `false`, so a handler can tell
/// "no such user" apart from "database unavailable".
///
/// Argon2 derivation is CPU-bound and runs on Tokio's blocking pool.

use crate::auth::password::{self, PasswordError, SaltedHash};
use crate::models::user::{CreateOutcome, NewUser, User};
use sqlx::PgPool;
use tracing::{debug, info};

/// Registration failures
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// Email or password was empty
    #[error("Email and password are required")]
    Invalid,

    /// An account with this email already exists
    #[error("Account already exists")]
    Conflict,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Verification failures other than a wrong password
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Salt used to derive a throwaway hash when the account does not exist
const UNKNOWN_ACCOUNT_SALT: &str = "dW5rbm93bi1hY2NvdW50LXNhbHQ";

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordError>
where
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| PasswordError::HashError(format!("Hashing task failed: {}", e)))?
}

/// True iff an account with this email exists
pub async fn user_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    User::exists(pool, email).await
}

/// Creates an account with a freshly salted hash of `password`
///
/// # Errors
///
/// - `RegisterError::Invalid` when either field is empty
/// - `RegisterError::Conflict` when the email is taken, including when a
///   concurrent registration wins the insert
/// - `RegisterError::Password` / `RegisterError::Storage` otherwise
pub async fn register_user(pool: &PgPool, email: &str, password: &str) -> Result<(), RegisterError> {
    if email.is_empty() || password.is_empty() {
        return Err(RegisterError::Invalid);
    }

    if User::exists(pool, email).await? {
        debug!(email, "Registration rejected: account exists");
        return Err(RegisterError::Conflict);
    }

    let plaintext = password.to_string();
    let SaltedHash { salt, hash } = run_blocking(move || password::hash_password(&plaintext)).await?;

    let outcome = User::create(
        pool,
        NewUser {
            email: email.to_string(),
            salt,
            hash,
        },
    )
    .await?;

    match outcome {
        CreateOutcome::Created => {
            info!(email, "Created account");
            Ok(())
        }
        CreateOutcome::AlreadyExists => Err(RegisterError::Conflict),
    }
}

/// Checks a password against the stored credentials for `email`
///
/// Returns `Ok(false)` when there is no such account. The password is still
/// derived once, against a fixed salt, so an unknown email costs
/// as much as a wrong password.
pub async fn verify_password(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<bool, CredentialError> {
    let plaintext = password.to_string();

    let Some(stored) = User::find_credentials(pool, email).await? else {
        // Same derivation cost as a wrong password
        run_blocking(move || password::hash_with_salt(&plaintext, UNKNOWN_ACCOUNT_SALT)).await?;
        debug!(email, "Login attempt for unknown account");
        return Ok(false);
    };

    let matches = run_blocking(move || {
        password::verify_password(&plaintext, &stored.salt, &stored.hash)
    })
    .await?;

    Ok(matches)
}

/// Overwrites display name and phone number; ownership is checked by the caller
pub async fn update_profile(
    pool: &PgPool,
    email: &str,
    display_name: Option<&str>,
    phone_number: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let updated = User::update_profile(pool, email, display_name, phone_number).await?;
    if updated {
        info!(email, "Updated account");
    }
    Ok(updated)
}

/// Removes an account; ownership is checked by the caller
pub async fn delete_user(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let deleted = User::delete(pool, email).await?;
    if deleted {
        info!(email, "Deleted account");
    }
    Ok(deleted)
}
