use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{api, app::App};

pub fn router(app: App) -> Router {
    let api_router = Router::new()
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route(
            "/topics",
            get(api::topics::list_topics).post(api::topics::create_topic),
        )
        .route("/topics/me", get(api::topics::my_topics))
        .route(
            "/topics/{topic_id}",
            get(api::topics::get_topic)
                .patch(api::topics::update_topic)
                .delete(api::topics::delete_topic),
        )
        .route(
            "/topics/{topic_id}/ideas",
            get(api::topics::list_ideas).post(api::topics::create_idea),
        )
        .route(
            "/ideas/{idea_id}",
            patch(api::ideas::update_idea).delete(api::ideas::delete_idea),
        )
        .route(
            "/ideas/{idea_id}/votes",
            get(api::votes::count_votes)
                .post(api::votes::create_vote)
                .delete(api::votes::delete_vote),
        )
        .with_state(app.clone());

    Router::new()
        .route("/liveness", get(api::health_checks::ok))
        .route("/readiness", get(api::health_checks::readiness))
        .with_state(app)
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
}
