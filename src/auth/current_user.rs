use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::jwt;
use crate::config::Config;
use crate::database::models::user;

/// Authenticated user extracted from the JWT bearer token.
///
/// Loads the full user row from the database based on the token's `sub`
/// claim. Use this in every handler that requires authentication.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: user::Model,
}

impl std::ops::Deref for CurrentUser {
    type Target = user::Model;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

/// Error type for `CurrentUser` extraction failures.
#[derive(Debug)]
pub enum AuthError {
    /// No Authorization header provided, invalid token, or unknown user
    Unauthorized,
    /// Database error while loading user
    DatabaseError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::DatabaseError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Config: FromRef<S>,
    DatabaseConnection: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::Unauthorized)?;

        let config = Config::from_ref(state);
        let claims = jwt::verify_token(&config, token).map_err(|_| AuthError::Unauthorized)?;

        // Ids are UUID-shaped strings; reject anything else before hitting
        // the database.
        Uuid::parse_str(&claims.sub).map_err(|_| AuthError::Unauthorized)?;

        let db = DatabaseConnection::from_ref(state);
        let user = user::Entity::find_by_id(claims.sub)
            .one(&db)
            .await
            .map_err(|_| AuthError::DatabaseError)?
            .ok_or(AuthError::Unauthorized)?;

        Ok(CurrentUser { user })
    }
}
