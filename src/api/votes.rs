use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    api::request_error::RequestError,
    app::App,
    auth::CurrentUser,
    authorization::{check_authorization, Requirement},
    repository::{IdeaRepository, VoteRepository},
    services::VoteService,
};

#[derive(Debug, Serialize)]
pub struct VoteCountResponse {
    pub votes: u64,
}

fn vote_service(app: &App) -> VoteService {
    VoteService::new(VoteRepository::new(app.db.clone()))
}

/// Voting is an aggregation on the idea: any authenticated user may vote,
/// the idea just has to exist. The response body says whether a new vote was
/// recorded (`false` when the user had already voted).
pub async fn create_vote(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(idea_id): Path<String>,
) -> Result<Json<bool>, RequestError> {
    check_authorization(
        &IdeaRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Aggregate,
        &idea_id,
    )
    .await?;

    let created = vote_service(&app)
        .create_vote(&idea_id, &current_user.id)
        .await?;
    Ok(Json(created))
}

/// Removing a vote is a deletion of the caller's own vote, resolved by the
/// `(idea_id, caller)` pair.
pub async fn delete_vote(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(idea_id): Path<String>,
) -> Result<Json<bool>, RequestError> {
    check_authorization(
        &VoteRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Delete,
        &idea_id,
    )
    .await?;

    let deleted = vote_service(&app)
        .delete_vote(&idea_id, &current_user.id)
        .await?;
    Ok(Json(deleted))
}

pub async fn count_votes(
    State(app): State<App>,
    _current_user: CurrentUser,
    Path(idea_id): Path<String>,
) -> Result<Json<VoteCountResponse>, RequestError> {
    let votes = vote_service(&app).count_votes(&idea_id).await?;
    Ok(Json(VoteCountResponse { votes }))
}
