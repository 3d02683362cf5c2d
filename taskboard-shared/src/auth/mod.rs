/// Authentication for Taskboard
///
/// # Modules
///
/// - [`password`]: Argon2id salt/hash derivation and constant-time verification
/// - [`credentials`]: Credential store operations over the `users` table
/// - [`session`]: Session-backed login, logout and the [`session::Identity`] gate
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let stored = hash_password("pw")?;
/// assert!(verify_password("pw", &stored.salt, &stored.hash)?);
/// assert!(!verify_password("other", &stored.salt, &stored.hash)?);
/// # Ok(())
/// # }
/// ```

pub mod credentials;
pub mod password;
pub mod session;
