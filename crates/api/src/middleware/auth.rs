//! Bearer-token authentication extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use glaze_core::error::CoreError;
use glaze_core::roles::validate_role;
use glaze_db::models::user::{UpsertUser, UserAccount};
use glaze_db::repositories::UserRepo;
use glaze_db::DbPool;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Caller identity taken from a verified identity-provider token.
///
/// The role always comes from the signed claims; nothing the client sends
/// in a body or query can change it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The identity provider's subject id.
    pub external_id: String,
    pub email: Option<String>,
    /// `"admin"` or `"customer"`.
    pub role: String,
}

impl AuthUser {
    /// Create or refresh the local account row for this caller.
    pub async fn upsert_account(&self, pool: &DbPool) -> Result<UserAccount, sqlx::Error> {
        UserRepo::upsert(
            pool,
            &UpsertUser {
                external_id: self.external_id.clone(),
                email: self.email.clone(),
                role: self.role.clone(),
            },
        )
        .await
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid Authorization format. Expected: Bearer <token>"))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        if validate_role(&claims.role).is_err() {
            tracing::warn!(role = %claims.role, "Token carries an unknown role");
            return Err(unauthorized("Invalid or expired token"));
        }

        Ok(AuthUser {
            external_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// The caller, if the request carries a valid token.
///
/// Missing or invalid tokens yield `None` instead of rejecting, for
/// endpoints that serve anonymous users too.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key("authorization") {
            return Ok(OptionalAuth(None));
        }
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuth(Some(user))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unusable Authorization header");
                Ok(OptionalAuth(None))
            }
        }
    }
}
