use axum::{
    extract::FromRef,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::{config::Config, environment::Environment};

/// Shared application state handed to every handler.
#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub db: DatabaseConnection,
}

impl FromRef<App> for Config {
    fn from_ref(app: &App) -> Self {
        app.config.clone()
    }
}

impl FromRef<App> for DatabaseConnection {
    fn from_ref(app: &App) -> Self {
        app.db.clone()
    }
}

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("Database connection error")]
    DatabaseError(#[from] sea_orm::DbErr),
}

impl IntoResponse for ReadinessError {
    fn into_response(self) -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, self.to_string()).into_response()
    }
}
