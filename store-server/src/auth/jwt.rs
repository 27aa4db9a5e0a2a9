//! Bearer-token identity verification

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use shared::error::AppError;
use shared::models::Role;

use crate::state::AppState;

/// JWT claims carried in the identity token
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub sub: String,
    /// Role name (USER | ADMIN)
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller extracted from the JWT
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub user_id: String,
    pub role: Role,
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a token for a user. Issuing is the identity provider's job in
/// production; this exists for fixtures and tests.
pub fn create_token(
    user_id: &str,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = UserClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that verifies the bearer token and injects [`UserIdentity`]
/// into request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let token_data = jsonwebtoken::decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::token_expired(),
        _ => {
            tracing::debug!(error = %e, "JWT validation failed");
            AppError::invalid_token("Invalid token")
        }
    })?;

    let role: Role = token_data
        .claims
        .role
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed role claim"))?;

    request.extensions_mut().insert(UserIdentity {
        user_id: token_data.claims.sub,
        role,
    });

    Ok(next.run(request).await)
}
