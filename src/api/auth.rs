use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use sea_orm::SqlErr;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::{request_error::RequestError, validated_json::ValidatedJson},
    app::App,
    auth::generate_token,
    database::models::user,
    password::{hash_password, verify_password},
    repository::{Repository, UserRepository},
    services::new_entity_id,
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The name must be between 1 and 255 characters."
    ))]
    pub name: String,
    #[validate(email(message = "The email address is not valid."))]
    pub email: String,
    #[validate(length(min = 8, message = "The password must be at least 8 characters long."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "The email address is not valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "The password must not be empty."))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    State(app): State<App>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> Result<impl IntoResponse, RequestError> {
    let repository = UserRepository::new(app.db.clone());

    let password_hash =
        hash_password(&input.password).map_err(|e| RequestError::Internal(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let new_user = user::Model {
        id: new_entity_id(),
        name: input.name,
        email: input.email,
        password_hash,
        created_at: now,
        updated_at: now,
    };

    // The unique index on email is the real guard; a racing duplicate
    // registration surfaces as a constraint violation below.
    match repository.add(new_user.clone()).await {
        Ok(()) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(RequestError::Unique("email"));
        }
        Err(e) => return Err(RequestError::Internal(e.to_string())),
    }

    let token = generate_token(&app.config, &new_user.id)
        .map_err(|e| RequestError::Internal(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

pub async fn login(
    State(app): State<App>,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> Result<Json<TokenResponse>, RequestError> {
    let repository = UserRepository::new(app.db.clone());

    let found = repository
        .find_by_email(&input.email)
        .await
        .map_err(|e| RequestError::Internal(e.to_string()))?
        .ok_or(RequestError::InvalidCredentials)?;

    let valid = verify_password(&input.password, &found.password_hash)
        .map_err(|e| RequestError::Internal(e.to_string()))?;
    if !valid {
        return Err(RequestError::InvalidCredentials);
    }

    let token =
        generate_token(&app.config, &found.id).map_err(|e| RequestError::Internal(e.to_string()))?;

    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::tests::setup_test::setup_test;

    #[tokio::test]
    async fn register_issues_a_usable_token() {
        let test = setup_test().await;

        let response = test
            .server
            .post("/api/auth/register")
            .json(&json!({
                "name": "alice",
                "email": "alice@example.com",
                "password": "a strong password",
            }))
            .await;
        assert_eq!(response.status_code(), 201);

        let token = response.json::<serde_json::Value>()["token"]
            .as_str()
            .expect("token missing")
            .to_owned();

        // The token authenticates a request.
        let topics = test
            .server
            .get("/api/topics")
            .authorization_bearer(&token)
            .await;
        assert_eq!(topics.status_code(), 200);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let test = setup_test().await;

        let payload = json!({
            "name": "alice",
            "email": "alice@example.com",
            "password": "a strong password",
        });

        let first = test.server.post("/api/auth/register").json(&payload).await;
        assert_eq!(first.status_code(), 201);

        let second = test.server.post("/api/auth/register").json(&payload).await;
        assert_eq!(second.status_code(), 400);
    }

    #[tokio::test]
    async fn register_rejects_invalid_input() {
        let test = setup_test().await;

        let response = test
            .server
            .post("/api/auth/register")
            .json(&json!({
                "name": "alice",
                "email": "not-an-email",
                "password": "a strong password",
            }))
            .await;
        assert_eq!(response.status_code(), 400);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let test = setup_test().await;

        test.server
            .post("/api/auth/register")
            .json(&json!({
                "name": "alice",
                "email": "alice@example.com",
                "password": "a strong password",
            }))
            .await;

        let response = test
            .server
            .post("/api/auth/login")
            .json(&json!({
                "email": "alice@example.com",
                "password": "not the password",
            }))
            .await;
        assert_eq!(response.status_code(), 401);

        let ok = test
            .server
            .post("/api/auth/login")
            .json(&json!({
                "email": "alice@example.com",
                "password": "a strong password",
            }))
            .await;
        assert_eq!(ok.status_code(), 200);
    }

    #[tokio::test]
    async fn unknown_email_is_unauthorized() {
        let test = setup_test().await;

        let response = test
            .server
            .post("/api/auth/login")
            .json(&json!({
                "email": "nobody@example.com",
                "password": "whatever else",
            }))
            .await;
        assert_eq!(response.status_code(), 401);
    }
}
