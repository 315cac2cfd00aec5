//! Authentication middleware

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::Response,
    http::header::AUTHORIZATION,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::{AppState, AppError};
use crate::handlers::auth::Claims;
use crate::models::Role;

/// User context extracted from JWT
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl UserContext {
    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

/// Extractor for teacher-only handlers.
///
/// Runs before any body extractor, so a student is refused with 403 whatever
/// the request body looks like.
#[derive(Debug, Clone)]
pub struct Teacher(pub UserContext);

/// RBAC: Require teacher role
pub fn require_teacher(user: &UserContext) -> Result<(), AppError> {
    require_role(user, Role::Teacher)
}

/// RBAC: Require specific role
pub fn require_role(user: &UserContext, required_role: Role) -> Result<(), AppError> {
    if user.role != required_role {
        tracing::warn!(
            "Role '{}' required but user {} has role '{}'",
            required_role.as_str(), user.user_id, user.role.as_str()
        );
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Middleware: Require user JWT authentication
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req)?;

    let user_ctx = decode_user(&token, &state.config.jwt_secret)?;

    req.extensions_mut().insert(user_ctx);

    Ok(next.run(req).await)
}

/// Verify a token and build the user context from its claims
pub fn decode_user(token: &str, secret: &str) -> Result<UserContext, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default()
    ).map_err(|e| {
        tracing::debug!("Rejected token: {}", e);
        AppError::TokenInvalid
    })?;

    let claims = token_data.claims;

    Ok(UserContext {
        user_id: Uuid::parse_str(&claims.sub).map_err(|_| AppError::TokenInvalid)?,
        email: claims.email,
        role: claims.role.parse().map_err(|_| AppError::TokenInvalid)?,
    })
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(req: &Request) -> Result<String, AppError> {
    let auth_header = req.headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::Unauthorized)?
        .to_str()
        .map_err(|_| AppError::Unauthorized)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<UserContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Teacher
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = UserContext::from_request_parts(parts, state).await?;
        require_teacher(&user)?;
        Ok(Teacher(user))
    }
}
