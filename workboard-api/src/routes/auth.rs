/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /v1/auth/login` - verify credentials, return the user
/// - `POST /v1/auth/forgot-password` - start the password-reset flow
///
/// Note the inherited contract: a login mismatch answers envelope code 500
/// with one generic message, and never reveals which field was wrong.

use axum::{extract::State, Json};
use serde::Deserialize;

use workboard_shared::{
    models::user::User,
    response::{ResponseBase, STATUS_BAD_REQUEST},
};

use crate::app::AppState;

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub user_name: String,

    /// Plaintext password, verified against the stored hash
    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Login name
    pub user_name: String,

    /// Email on file for the account; both must match
    pub email: String,
}

/// Login handler
///
/// ```text
/// POST /v1/auth/login
/// { "user_name": "jdoe", "password": "..." }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Json<ResponseBase<User>> {
    match payload {
        Some(Json(req)) => Json(
            state
                .user_service()
                .login(&req.user_name, &req.password)
                .await,
        ),
        None => Json(ResponseBase::failure(STATUS_BAD_REQUEST, "Invalid payload")),
    }
}

/// Forgot-password handler
///
/// ```text
/// POST /v1/auth/forgot-password
/// { "user_name": "jdoe", "email": "jdoe@example.com" }
/// ```
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Option<Json<ForgotPasswordRequest>>,
) -> Json<ResponseBase<i32>> {
    match payload {
        Some(Json(req)) => Json(
            state
                .user_service()
                .forgot_password(&req.user_name, &req.email)
                .await,
        ),
        None => Json(ResponseBase::failure(STATUS_BAD_REQUEST, "Invalid payload")),
    }
}
