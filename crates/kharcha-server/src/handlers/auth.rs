//! Authentication and profile handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{AppError, AppState, AuthUser, SuccessResponse};
use kharcha_core::auth;
use kharcha_core::models::{NewUser, User};

#[derive(Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub email: String,
}

/// POST /api/auth/signup - register a new user
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<SignupResponse>, AppError> {
    let email = new_user.email.clone();
    let id = auth::signup(&state.db, &new_user).map_err(AppError::from_core)?;

    Ok(Json(SignupResponse { id, email }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/login - verify credentials, mint a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = auth::login(&state.db, &req.email, &req.password)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    let token = state
        .db
        .create_session(&user.email)
        .map_err(AppError::from_core)?;

    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/auth/logout - invalidate the presented session token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<SuccessResponse>, AppError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or_else(|| AppError::bad_request("Missing bearer token"))?;

    state
        .db
        .delete_session(token)
        .map_err(AppError::from_core)?;

    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub dob: String,
    pub new_password: String,
}

/// POST /api/auth/reset - dob-verified password reset
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let ok = auth::reset_password(&state.db, &req.email, &req.dob, &req.new_password)
        .map_err(AppError::from_core)?;

    if !ok {
        // Same answer for unknown email and wrong dob
        return Err(AppError::bad_request("Reset verification failed"));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/me - the authenticated user's profile
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
) -> Result<Json<User>, AppError> {
    let user = state
        .db
        .get_user_by_email(&email)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub salary: f64,
    pub gender: Option<String>,
    pub job: Option<String>,
    pub address: Option<String>,
}

/// PUT /api/me - update profile fields (email and password excluded)
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(email)): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<User>, AppError> {
    if req.salary < 0.0 {
        return Err(AppError::bad_request("Salary must be non-negative"));
    }

    state
        .db
        .update_user_profile(
            &email,
            &req.name,
            req.phone.as_deref(),
            req.dob.as_deref(),
            req.salary,
            req.gender.as_deref(),
            req.job.as_deref(),
            req.address.as_deref(),
        )
        .map_err(AppError::from_core)?;

    let user = state
        .db
        .get_user_by_email(&email)
        .map_err(AppError::from_core)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user))
}
