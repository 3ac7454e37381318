//! User authentication
//!
//! Passwords are hashed with Argon2id and never stored in plain text.
//! Password reset follows the original flow: the caller must present the
//! date of birth on file before a new password is accepted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{NewUser, User};

/// Hash a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Auth(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Register a new user; returns the new user id
pub fn signup(db: &Database, user: &NewUser) -> Result<i64> {
    if user.email.trim().is_empty() || !user.email.contains('@') {
        return Err(Error::InvalidData(format!(
            "Invalid email: {:?}",
            user.email
        )));
    }
    if user.password.is_empty() {
        return Err(Error::InvalidData("Password must not be empty".to_string()));
    }

    let hash = hash_password(&user.password)?;
    let id = db.create_user(user, &hash)?;
    info!(email = %user.email, "User registered");
    Ok(id)
}

/// Verify credentials; returns the user on success, None on bad email or password
pub fn login(db: &Database, email: &str, password: &str) -> Result<Option<User>> {
    let Some(hash) = db.get_password_hash(email)? else {
        return Ok(None);
    };

    if !verify_password(password, &hash) {
        return Ok(None);
    }

    db.get_user_by_email(email)
}

/// Reset a password after verifying the date of birth on file
///
/// Returns false when the user is unknown or the dob does not match.
pub fn reset_password(db: &Database, email: &str, dob: &str, new_password: &str) -> Result<bool> {
    let Some(user) = db.get_user_by_email(email)? else {
        return Ok(false);
    };

    if user.dob.as_deref() != Some(dob) {
        return Ok(false);
    }

    let hash = hash_password(new_password)?;
    db.update_password(email, &hash)?;
    info!(email = %email, "Password reset");
    Ok(true)
}
