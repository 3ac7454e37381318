//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rusqlite::params;

    fn new_user(email: &str, salary: f64) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            phone: Some("555-0100".to_string()),
            dob: Some("1990-01-15".to_string()),
            salary,
            gender: None,
            job: Some("Engineer".to_string()),
            address: None,
        }
    }

    fn new_expense(date: &str, amount: f64, category: &str, bucket: &str) -> NewExpense {
        NewExpense {
            name: Some("entry".to_string()),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            category: category.to_string(),
            subcategory: None,
            bucket: bucket.to_string(),
            spent_by: None,
            payment_mode: Some("UPI".to_string()),
            notes: None,
            other_income: 0.0,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.user_count().unwrap(), 0);
    }

    #[test]
    fn test_user_crud() {
        let db = Database::in_memory().unwrap();

        let id = db.create_user(&new_user("a@example.com", 50000.0), "hash").unwrap();
        assert!(id > 0);

        let user = db.get_user_by_email("a@example.com").unwrap().unwrap();
        assert_eq!(user.name, "Test User");
        assert_eq!(user.salary, 50000.0);
        assert_eq!(user.job.as_deref(), Some("Engineer"));

        assert!(db.get_user_by_email("nobody@example.com").unwrap().is_none());
        assert_eq!(db.user_count().unwrap(), 1);

        // Duplicate email is a conflict
        let err = db
            .create_user(&new_user("a@example.com", 1.0), "hash2")
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::Conflict(_)));
    }

    #[test]
    fn test_update_user_profile() {
        let db = Database::in_memory().unwrap();
        db.create_user(&new_user("a@example.com", 50000.0), "hash").unwrap();

        db.update_user_profile(
            "a@example.com",
            "Renamed",
            None,
            Some("1990-01-15"),
            60000.0,
            None,
            Some("Manager"),
            Some("New Address"),
        )
        .unwrap();

        let user = db.get_user_by_email("a@example.com").unwrap().unwrap();
        assert_eq!(user.name, "Renamed");
        assert_eq!(user.salary, 60000.0);
        assert_eq!(user.job.as_deref(), Some("Manager"));

        let err = db
            .update_user_profile("nobody@example.com", "X", None, None, 0.0, None, None, None)
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::NotFound(_)));
    }

    #[test]
    fn test_expense_crud() {
        let db = Database::in_memory().unwrap();

        let id = db
            .add_expense(
                "a@example.com",
                &new_expense("2024-03-10", 1200.0, "Food", "Household + Groceries"),
            )
            .unwrap();
        assert!(id > 0);

        db.add_expense(
            "a@example.com",
            &new_expense("2024-03-15", 300.0, "Transport", "Lifestyle + Personal"),
        )
        .unwrap();

        // Another user's records are invisible
        db.add_expense(
            "b@example.com",
            &new_expense("2024-03-01", 999.0, "Food", "Household + Groceries"),
        )
        .unwrap();

        let records = db.list_expenses("a@example.com").unwrap();
        assert_eq!(records.len(), 2);
        // Newest first
        assert_eq!(records[0].date.to_string(), "2024-03-15");
        assert_eq!(records[1].bucket, "Household + Groceries");

        assert_eq!(db.expense_count("a@example.com").unwrap(), 2);
        assert_eq!(db.expense_count("b@example.com").unwrap(), 1);
    }

    #[test]
    fn test_delete_expense_is_owner_scoped() {
        let db = Database::in_memory().unwrap();
        let id = db
            .add_expense(
                "a@example.com",
                &new_expense("2024-03-10", 100.0, "Food", "Household + Groceries"),
            )
            .unwrap();

        // Wrong owner deletes nothing
        assert!(!db.delete_expense(id, "b@example.com").unwrap());
        assert_eq!(db.expense_count("a@example.com").unwrap(), 1);

        assert!(db.delete_expense(id, "a@example.com").unwrap());
        assert_eq!(db.expense_count("a@example.com").unwrap(), 0);

        // Already gone
        assert!(!db.delete_expense(id, "a@example.com").unwrap());
    }

    #[test]
    fn test_list_expenses_excludes_invalid_dates() {
        let db = Database::in_memory().unwrap();
        db.add_expense(
            "a@example.com",
            &new_expense("2024-03-10", 100.0, "Food", "Household + Groceries"),
        )
        .unwrap();

        // Sneak in a row with a malformed date, bypassing NewExpense
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO expenses (user_email, date, amount, category, bucket) \
             VALUES (?, 'not-a-date', 50.0, 'Food', 'Household + Groceries')",
            params!["a@example.com"],
        )
        .unwrap();

        let records = db.list_expenses("a@example.com").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 100.0);
    }

    #[test]
    fn test_category_bindings() {
        let db = Database::in_memory().unwrap();

        assert!(db.lookup_binding("Gadgets", "Audio").unwrap().is_none());

        db.bind_category("Gadgets", "Audio", "Lifestyle + Personal").unwrap();
        assert_eq!(
            db.lookup_binding("Gadgets", "Audio").unwrap().as_deref(),
            Some("Lifestyle + Personal")
        );

        // Upsert replaces the bucket
        db.bind_category("Gadgets", "Audio", "Emergency Fund").unwrap();
        assert_eq!(
            db.lookup_binding("Gadgets", "Audio").unwrap().as_deref(),
            Some("Emergency Fund")
        );

        // Same category, different subcategory is a separate binding
        db.bind_category("Gadgets", "Video", "Savings + Investment").unwrap();
        assert_eq!(db.list_bindings().unwrap().len(), 2);
    }

    #[test]
    fn test_resolve_entry_bucket_order() {
        let db = Database::in_memory().unwrap();
        let categories = crate::analysis::CategoryMap::default();

        // Explicit bucket wins and is persisted
        let bucket = db
            .resolve_entry_bucket(&categories, "Gadgets", "Audio", Some("Emergency Fund"))
            .unwrap();
        assert_eq!(bucket, "Emergency Fund");
        assert_eq!(
            db.lookup_binding("Gadgets", "Audio").unwrap().as_deref(),
            Some("Emergency Fund")
        );

        // Stored binding beats the static map
        let bucket = db
            .resolve_entry_bucket(&categories, "Gadgets", "Audio", None)
            .unwrap();
        assert_eq!(bucket, "Emergency Fund");

        // Known static category resolves without creating a binding
        let bucket = db
            .resolve_entry_bucket(&categories, "Food", "", None)
            .unwrap();
        assert_eq!(bucket, "Household + Groceries");
        assert!(db.lookup_binding("Food", "").unwrap().is_none());

        // Unknown pair falls back to the default and is persisted
        let bucket = db
            .resolve_entry_bucket(&categories, "Xyz123", "", None)
            .unwrap();
        assert_eq!(bucket, crate::analysis::DEFAULT_BUCKET);
        assert_eq!(
            db.lookup_binding("Xyz123", "").unwrap().as_deref(),
            Some(crate::analysis::DEFAULT_BUCKET)
        );
    }

    #[test]
    fn test_rebinding_never_rewrites_stored_expenses() {
        let db = Database::in_memory().unwrap();
        let categories = crate::analysis::CategoryMap::default();

        let bucket = db
            .resolve_entry_bucket(&categories, "Gadgets", "", Some("Lifestyle + Personal"))
            .unwrap();
        db.add_expense(
            "a@example.com",
            &new_expense("2024-03-10", 100.0, "Gadgets", &bucket),
        )
        .unwrap();

        // Remap the category
        db.bind_category("Gadgets", "", "Emergency Fund").unwrap();

        // The stored record keeps its frozen bucket
        let records = db.list_expenses("a@example.com").unwrap();
        assert_eq!(records[0].bucket, "Lifestyle + Personal");

        // New entries pick up the new binding
        let bucket = db
            .resolve_entry_bucket(&categories, "Gadgets", "", None)
            .unwrap();
        assert_eq!(bucket, "Emergency Fund");
    }

    #[test]
    fn test_sessions() {
        let db = Database::in_memory().unwrap();

        let token = db.create_session("a@example.com").unwrap();
        let token2 = db.create_session("a@example.com").unwrap();
        assert_ne!(token, token2, "tokens must be unique per session");

        assert_eq!(
            db.session_email(&token).unwrap().as_deref(),
            Some("a@example.com")
        );
        assert!(db.session_email("bogus").unwrap().is_none());

        assert!(db.delete_session(&token).unwrap());
        assert!(db.session_email(&token).unwrap().is_none());
        assert!(!db.delete_session(&token).unwrap());

        // The other session is untouched
        assert!(db.session_email(&token2).unwrap().is_some());
    }

    #[test]
    fn test_soft_reset_preserves_users_and_bindings() {
        let db = Database::in_memory().unwrap();
        db.create_user(&new_user("a@example.com", 50000.0), "hash").unwrap();
        db.bind_category("Gadgets", "", "Emergency Fund").unwrap();
        db.add_expense(
            "a@example.com",
            &new_expense("2024-03-10", 100.0, "Food", "Household + Groceries"),
        )
        .unwrap();
        db.create_session("a@example.com").unwrap();

        db.soft_reset().unwrap();

        assert_eq!(db.user_count().unwrap(), 1);
        assert_eq!(db.list_bindings().unwrap().len(), 1);
        assert_eq!(db.expense_count("a@example.com").unwrap(), 0);
    }
}
