//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use kharcha_core::db::Database;
use tower::ServiceExt;

fn setup_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
    };
    (create_router(db.clone(), None, config), db)
}

fn setup_app_no_auth() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
    };
    (create_router(db.clone(), None, config), db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn signup_body(email: &str, salary: f64) -> serde_json::Value {
    serde_json::json!({
        "name": "Asha Patel",
        "email": email,
        "password": "correct-horse",
        "dob": "1990-01-15",
        "salary": salary,
    })
}

async fn signup_and_login(app: &Router, email: &str, salary: f64) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            signup_body(email, salary),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"email": email, "password": "correct-horse"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

fn expense_body(date: &str, amount: f64, category: &str) -> serde_json::Value {
    serde_json::json!({
        "date": date,
        "amount": amount,
        "category": category,
        "payment_mode": "UPI",
    })
}

// ========== Auth Tests ==========

#[tokio::test]
async fn test_health_is_public() {
    let (app, _db) = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let (app, _db) = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_login_me_roundtrip() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["email"], "asha@example.com");
    assert_eq!(json["salary"], 50000.0);
    // Password hash must never appear in API responses
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let (app, _db) = setup_app();
    signup_and_login(&app, "asha@example.com", 50000.0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"email": "asha@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let (app, _db) = setup_app();
    signup_and_login(&app, "asha@example.com", 50000.0).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            signup_body("asha@example.com", 1.0),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let (app, _db) = setup_app();
    signup_and_login(&app, "asha@example.com", 50000.0).await;

    // Wrong dob is rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset",
            serde_json::json!({
                "email": "asha@example.com",
                "dob": "2001-01-01",
                "new_password": "newpass",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Matching dob resets the password
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/reset",
            serde_json::json!({
                "email": "asha@example.com",
                "dob": "1990-01-15",
                "new_password": "newpass",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"email": "asha@example.com", "password": "newpass"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Expense Tests ==========

#[tokio::test]
async fn test_expense_crud() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;
    let auth = format!("Bearer {}", token);

    // Create
    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-05", 1200.0, "Food"),
    );
    request
        .headers_mut()
        .insert("authorization", auth.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let id = json["id"].as_i64().unwrap();
    assert_eq!(json["bucket"], "Household + Groceries");

    // List
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["amount"], 1200.0);

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/expenses/{}", id))
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a 404
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/expenses/{}", id))
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_expense_rejects_negative_amount() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;

    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-05", -5.0, "Food"),
    );
    request
        .headers_mut()
        .insert("authorization", format!("Bearer {}", token).parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Dashboard Tests ==========

#[tokio::test]
async fn test_dashboard_scenario() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;
    let auth = format!("Bearer {}", token);

    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-05", 20000.0, "Food"),
    );
    request
        .headers_mut()
        .insert("authorization", auth.parse().unwrap());
    app.clone().oneshot(request).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard?month=2024-03")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], "2024-03");
    assert_eq!(json["summary"]["expense_total"], 20000.0);
    assert_eq!(json["summary"]["income_total"], 50000.0);
    assert_eq!(json["summary"]["savings"], 30000.0);
    assert_eq!(json["summary"]["savings_percent"], 60.0);

    let budget = json["budget"].as_array().unwrap();
    assert_eq!(budget.len(), 7);
    let groceries = budget
        .iter()
        .find(|row| row["bucket"] == "Household + Groceries")
        .unwrap();
    assert_eq!(groceries["limit"], 7500.0);
    assert_eq!(groceries["spent"], 20000.0);
    assert_eq!(groceries["status"], "overspent");

    let insights = json["insights"].as_array().unwrap();
    assert!(insights
        .iter()
        .any(|i| i.as_str().unwrap().contains("Household + Groceries")));
    assert!(insights
        .iter()
        .any(|i| i.as_str().unwrap() == "Good savings habit"));
}

#[tokio::test]
async fn test_dashboard_rejects_bad_month() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/dashboard?month=March")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_months_excludes_empty_months() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;
    let auth = format!("Bearer {}", token);

    for (date, amount) in [("2024-03-05", 100.0), ("2024-01-20", 50.0)] {
        let mut request =
            json_request("POST", "/api/expenses", expense_body(date, amount, "Food"));
        request
            .headers_mut()
            .insert("authorization", auth.parse().unwrap());
        app.clone().oneshot(request).await.unwrap();
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/months")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let months = json["months"].as_array().unwrap();
    // 2024-02 has no records and cannot be selected
    assert_eq!(months.len(), 2);
    assert_eq!(months[0], "2024-03");
    assert_eq!(months[1], "2024-01");
    assert_eq!(json["default"], "2024-03");
}

// ========== Category Tests ==========

#[tokio::test]
async fn test_bind_category_affects_future_entries_only() {
    let (app, _db) = setup_app_no_auth();
    let user_header = ("x-kharcha-user", "asha@example.com");

    // Signup still needed for dashboard/report, not for raw expense entry
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            signup_body("asha@example.com", 50000.0),
        ))
        .await
        .unwrap();

    // Record with an unknown category: defaults to Lifestyle + Personal
    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-05", 500.0, "Gadgets"),
    );
    request
        .headers_mut()
        .insert(user_header.0, user_header.1.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["bucket"], "Lifestyle + Personal");

    // Re-bind the pair
    let mut request = json_request(
        "POST",
        "/api/categories",
        serde_json::json!({"category": "Gadgets", "bucket": "Emergency Fund"}),
    );
    request
        .headers_mut()
        .insert(user_header.0, user_header.1.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // New entry picks up the binding
    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-10", 300.0, "Gadgets"),
    );
    request
        .headers_mut()
        .insert(user_header.0, user_header.1.parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["bucket"], "Emergency Fund");

    // The first record keeps its frozen bucket
    let mut request = Request::builder()
        .uri("/api/expenses")
        .body(Body::empty())
        .unwrap();
    request
        .headers_mut()
        .insert(user_header.0, user_header.1.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    let json = get_body_json(response).await;
    let records = json.as_array().unwrap();
    let first = records
        .iter()
        .find(|r| r["date"] == "2024-03-05")
        .unwrap();
    assert_eq!(first["bucket"], "Lifestyle + Personal");
}

#[tokio::test]
async fn test_list_categories() {
    let (app, _db) = setup_app_no_auth();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let defaults = json["defaults"].as_array().unwrap();
    assert!(defaults
        .iter()
        .any(|d| d["category"] == "Food" && d["bucket"] == "Household + Groceries"));

    let buckets = json["buckets"].as_array().unwrap();
    assert_eq!(buckets.len(), 7);
    assert_eq!(buckets[0], "Rent + Utilities");
}

// ========== Report Tests ==========

#[tokio::test]
async fn test_report_download() {
    let (app, _db) = setup_app();
    let token = signup_and_login(&app, "asha@example.com", 50000.0).await;
    let auth = format!("Bearer {}", token);

    let mut request = json_request(
        "POST",
        "/api/expenses",
        expense_body("2024-03-05", 1200.0, "Food"),
    );
    request
        .headers_mut()
        .insert("authorization", auth.parse().unwrap());
    app.clone().oneshot(request).await.unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/2024-03")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv"
    );
    assert!(response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("expense-report-2024-03.csv"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("date,name,amount"));
    assert!(text.contains("2024-03-05"));

    // JSON format variant
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/2024-03?format=json")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    // Empty month is a 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/reports/2020-01")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unknown format is a 400
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/reports/2024-03?format=pdf")
                .header("authorization", auth.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
