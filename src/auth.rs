//! Session tokens and the authentication middleware.
//!
//! A session is a signed bearer token carrying {user id, username, role,
//! linked employee id}. The middleware decodes it into a [`CurrentUser`]
//! request extension; handlers never read ambient state.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use model::entities::user::{self, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::schemas::AppState;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub employee_id: Option<i32>,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// The authenticated actor, passed explicitly into every operation.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub employee_id: Option<i32>,
}

impl CurrentUser {
    /// Fails with `Forbidden` when the actor's role is not in the permitted set.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }

    /// The linked employee id, or `NoLinkedEmployee` when the account has none.
    pub fn require_employee(&self) -> Result<i32, ApiError> {
        self.employee_id.ok_or(ApiError::NoLinkedEmployee)
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Hr)
    }
}

const SESSION_EXPIRY_HOURS: i64 = 24;

/// Create a session token for a freshly authenticated user
pub fn create_token(
    user: &user::Model,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.as_str().to_string(),
        employee_id: user.employee_id,
        exp: (now + chrono::Duration::hours(SESSION_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that verifies the bearer token and stores the actor as a
/// request extension. Every route behind it fails with `Unauthenticated`
/// before any handler code runs.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(state.session_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Session token validation failed: {}", e);
        ApiError::Unauthenticated
    })?;

    let claims = token_data.claims;
    let role = Role::parse(&claims.role).ok_or(ApiError::Unauthenticated)?;

    request.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
        username: claims.username,
        role,
        employee_id: claims.employee_id,
    });

    Ok(next.run(request).await)
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHasher};
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
