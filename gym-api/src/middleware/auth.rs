use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{auth::ADMIN_ROLE, error::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

/// Requires `Authorization: Bearer <token>` issued by the admin login.
/// Claims are injected into request extensions.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.expose().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthenticationError("Invalid or expired token".to_string()))?;

    if token_data.claims.role != ADMIN_ROLE {
        return Err(AppError::AuthorizationError("Admin access required".to_string()));
    }

    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}
