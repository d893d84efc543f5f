//! Authentication middleware

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    constants::roles,
    db::repositories::ProfileRepository,
    error::{AppError, AppResult},
    models::{Permissions, Profile},
    state::AppState,
};

/// Claims of a dashboard session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Profile id
    pub sub: String,
    pub aud: String,
    pub exp: i64,
    #[serde(default)]
    pub email: Option<String>,
}

/// Verify an HS256 session token against the configured secret and audience
pub fn verify_token(token: &str, config: &JwtConfig) -> AppResult<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims)
}

/// Authenticated user resolved from the session token and their profile
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: String,
    pub role: String,
    pub special_access: Vec<String>,
    pub permissions: Permissions,
}

impl From<Profile> for AuthenticatedUser {
    fn from(profile: Profile) -> Self {
        let permissions = profile.permissions();
        Self {
            id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            role: profile.base_role,
            special_access: profile.special_access,
            permissions,
        }
    }
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == roles::ADMIN
    }

    /// Fail with `Forbidden` unless `granted` holds for this user's permissions
    pub fn ensure(&self, granted: fn(&Permissions) -> bool, action: &str) -> AppResult<()> {
        if granted(&self.permissions) {
            Ok(())
        } else {
            debug!(user_id = %self.id, role = %self.role, action, "Permission denied");
            Err(AppError::Forbidden(format!("You are not allowed to {action}")))
        }
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        debug!(path = %path, "Auth failed: No Authorization header");
        return Err(AppError::Unauthorized);
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        debug!(path = %path, "Auth failed: expected 'Bearer <token>'");
        return Err(AppError::Unauthorized);
    };

    let claims = verify_token(token, &state.config().jwt).map_err(|e| {
        debug!(path = %path, error = ?e, "Auth failed: Token verification failed");
        e
    })?;

    let profile_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        debug!(path = %path, sub = %claims.sub, error = ?e, "Auth failed: Invalid profile ID in token");
        AppError::InvalidToken
    })?;

    let profile = ProfileRepository::find_by_id(state.db(), &profile_id)
        .await?
        .ok_or_else(|| {
            debug!(path = %path, profile_id = %profile_id, "Auth failed: No profile for token");
            AppError::Unauthorized
        })?;

    let user = AuthenticatedUser::from(profile);
    debug!(path = %path, user_id = %user.id, role = %user.role, "User authenticated successfully");

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
