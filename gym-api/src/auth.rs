use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, middleware::auth::AdminClaims, state::AppState};

pub const ADMIN_ROLE: &str = "ADMIN";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: u64,
}

/// POST /api/admin/login
pub async fn login_admin(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let valid = req.username == state.auth.admin_username
        && req.password == *state.auth.admin_password.expose();
    if !valid {
        tracing::warn!("Failed admin login for '{}'", req.username);
        return Err(AppError::AuthenticationError("Invalid credentials".to_string()));
    }

    let claims = AdminClaims {
        sub: req.username,
        role: ADMIN_ROLE.to_owned(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.expose().as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    tracing::info!("Admin {} logged in", claims.sub);
    Ok(Json(AuthResponse {
        token,
        expires_in: state.auth.expiration,
    }))
}
