use crate::auth::{create_token, verify_password, CurrentUser};
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState};
use axum::{extract::State, response::Json, Extension};
use model::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Established session identity plus the bearer token that carries it
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<i32>,
}

/// Verify credentials and establish a session
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session established", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let username = request.username.trim();
    debug!("Login attempt for username: {}", username);

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Login failed: unknown username {}", username);
            ApiError::InvalidCredentials
        })?;

    // The stored value is a salted one-way hash; a mismatch is
    // indistinguishable from an unknown username.
    if !verify_password(&request.password, &user.password_hash) {
        warn!("Login failed: bad password for {}", username);
        return Err(ApiError::InvalidCredentials);
    }

    let token = create_token(&user, &state.session_secret).map_err(|e| {
        error!("Session token creation failed: {}", e);
        ApiError::Internal
    })?;

    info!("User {} logged in with role {}", user.username, user.role.as_str());
    let response = ApiResponse {
        data: LoginResponse {
            token,
            user_id: user.id,
            username: user.username,
            role: user.role.as_str().to_string(),
            employee_id: user.employee_id,
        },
        message: "Logged in".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// End the session. The session lives in a signed client-held token, so
/// clearing it means the client discards the token; this endpoint exists
/// so that intent shows up in logs and API docs.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cleared", body = ApiResponse<String>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn logout(
    Extension(actor): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    info!("User {} logged out", actor.username);
    let response = ApiResponse {
        data: "Session cleared".to_string(),
        message: "Logged out".to_string(),
        success: true,
    };
    Ok(Json(response))
}
