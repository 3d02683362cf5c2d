/// Credential hashing with Argon2id
///
/// Salt and hash are kept apart so they can live in separate columns:
///
/// - **salt**: 16 random bytes from the OS RNG, as unpadded base64 text
/// - **hash**: the 32-byte Argon2id output for (password, salt), as base64 text
///
/// Parameters are fixed (64 MB memory, 3 passes, 4 lanes) because the stored
/// rows do not record them. Changing them invalidates every stored hash.
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let first = hash_password("same")?;
/// let second = hash_password("same")?;
///
/// // Fresh salt each time, so the hashes differ
/// assert_ne!(first.hash, second.hash);
/// assert!(verify_password("same", &second.salt, &second.hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, Output, PasswordHasher, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Error type for hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Hash derivation failed
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// A stored salt or hash could not be decoded
    #[error("Invalid stored credential: {0}")]
    InvalidStored(String),
}

/// Salt and hash for one account, both as base64 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedHash {
    pub salt: String,
    pub hash: String,
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(65536) // 64 MB
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

fn derive(password: &str, salt: &SaltString) -> Result<Output, PasswordError> {
    let hashed = hasher()?
        .hash_password(password.as_bytes(), salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    hashed
        .hash
        .ok_or_else(|| PasswordError::HashError("Argon2 produced no output".to_string()))
}

/// Derives a fresh salt and the matching hash for `password`
pub fn hash_password(password: &str) -> Result<SaltedHash, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = derive(password, &salt)?;

    Ok(SaltedHash {
        salt: salt.as_str().to_string(),
        hash: hash.to_string(),
    })
}

/// Recomputes the hash of `password` with a stored salt
pub fn hash_with_salt(password: &str, salt: &str) -> Result<String, PasswordError> {
    let salt = SaltString::from_b64(salt)
        .map_err(|e| PasswordError::InvalidStored(format!("salt: {}", e)))?;

    Ok(derive(password, &salt)?.to_string())
}

/// Checks `password` against a stored salt and hash
///
/// The outputs are compared with `Output`'s constant-time equality, so the
/// time taken does not depend on how many leading bytes match.
///
/// # Errors
///
/// Returns `PasswordError::InvalidStored` when the stored salt or hash is not
/// valid base64 of the expected shape.
pub fn verify_password(password: &str, salt: &str, hash: &str) -> Result<bool, PasswordError> {
    let salt = SaltString::from_b64(salt)
        .map_err(|e| PasswordError::InvalidStored(format!("salt: {}", e)))?;
    let expected = Output::b64_decode(hash)
        .map_err(|e| PasswordError::InvalidStored(format!("hash: {}", e)))?;

    let actual = derive(password, &salt)?;
    Ok(actual == expected)
}
