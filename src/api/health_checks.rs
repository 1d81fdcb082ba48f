use axum::extract::State;

use crate::app::{App, ReadinessError};

pub async fn ok() -> &'static str {
    "OK"
}

/// Readiness requires a live database connection.
pub async fn readiness(State(app): State<App>) -> Result<&'static str, ReadinessError> {
    app.db.ping().await?;
    Ok("OK")
}
