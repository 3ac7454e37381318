//! User account operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewUser, User};

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        dob: row.get(4)?,
        salary: row.get(5)?,
        gender: row.get(6)?,
        job: row.get(7)?,
        address: row.get(8)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}

const USER_COLUMNS: &str = "id, name, email, phone, dob, salary, gender, job, address, created_at";

impl Database {
    /// Insert a new user with an already-hashed password
    ///
    /// Returns `Error::Conflict` if the email is taken.
    pub fn create_user(&self, user: &NewUser, password_hash: &str) -> Result<i64> {
        let conn = self.conn()?;

        let result = conn.execute(
            r#"
            INSERT INTO users (name, email, password_hash, phone, dob, salary, gender, job, address)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user.name,
                user.email,
                password_hash,
                user.phone,
                user.dob,
                user.salary,
                user.gender,
                user.job,
                user.address,
            ],
        );

        match result {
            Ok(_) => Ok(conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(Error::Conflict(format!(
                    "Email already registered: {}",
                    user.email
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                &format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS),
                params![email],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    /// Get the stored password hash for a user (None if unknown email)
    pub fn get_password_hash(&self, email: &str) -> Result<Option<String>> {
        let conn = self.conn()?;
        let hash = conn
            .query_row(
                "SELECT password_hash FROM users WHERE email = ?",
                params![email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(hash)
    }

    /// Update profile fields for a user (everything except email/password)
    pub fn update_user_profile(
        &self,
        email: &str,
        name: &str,
        phone: Option<&str>,
        dob: Option<&str>,
        salary: f64,
        gender: Option<&str>,
        job: Option<&str>,
        address: Option<&str>,
    ) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE users
            SET name = ?, phone = ?, dob = ?, salary = ?, gender = ?, job = ?, address = ?
            WHERE email = ?
            "#,
            params![name, phone, dob, salary, gender, job, address, email],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("User not found: {}", email)));
        }
        Ok(())
    }

    pub fn update_password(&self, email: &str, password_hash: &str) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE users SET password_hash = ? WHERE email = ?",
            params![password_hash, email],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("User not found: {}", email)));
        }
        Ok(())
    }

    pub fn user_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count)
    }
}
