//! API session tokens
//!
//! Opaque bearer tokens handed out at login and checked by the server's
//! auth middleware. Tokens are SHA-256 digests over the user, a
//! timestamp, and a process-local counter.

use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

use super::Database;
use crate::error::Result;

fn generate_token(email: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    let now = chrono::Utc::now();

    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(now.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    hasher.update(counter.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hex::encode(hasher.finalize())
}

impl Database {
    /// Create a session for a user and return the bearer token
    pub fn create_session(&self, user_email: &str) -> Result<String> {
        let token = generate_token(user_email);
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO sessions (token, user_email) VALUES (?, ?)",
            params![token, user_email],
        )?;
        Ok(token)
    }

    /// Resolve a bearer token to its user email (None if unknown)
    pub fn session_email(&self, token: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let email = conn
            .query_row(
                "SELECT user_email FROM sessions WHERE token = ?",
                params![token],
                |row| row.get(0),
            )
            .optional()?;
        Ok(email)
    }

    /// Invalidate a session token; false if it did not exist
    pub fn delete_session(&self, token: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM sessions WHERE token = ?", params![token])?;
        Ok(deleted > 0)
    }
}
