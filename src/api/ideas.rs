use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{
    api::{request_error::RequestError, validated_json::ValidatedJson},
    app::App,
    auth::CurrentUser,
    authorization::{check_authorization, Requirement},
    database::models::idea,
    repository::IdeaRepository,
    services::{ideas::IdeaInput, IdeaService},
};

#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub id: String,
    pub user_id: String,
    pub topic_id: String,
    pub description: String,
}

impl From<idea::Model> for IdeaResponse {
    fn from(idea: idea::Model) -> Self {
        Self {
            id: idea.id,
            user_id: idea.user_id,
            topic_id: idea.topic_id,
            description: idea.description,
        }
    }
}

fn idea_service(app: &App) -> IdeaService {
    IdeaService::new(IdeaRepository::new(app.db.clone()))
}

pub async fn update_idea(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(idea_id): Path<String>,
    ValidatedJson(input): ValidatedJson<IdeaInput>,
) -> Result<Json<IdeaResponse>, RequestError> {
    check_authorization(
        &IdeaRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Edit,
        &idea_id,
    )
    .await?;

    let idea = idea_service(&app)
        .update_idea(&idea_id, &input, &current_user.id)
        .await?;
    Ok(Json(IdeaResponse::from(idea)))
}

pub async fn delete_idea(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(idea_id): Path<String>,
) -> Result<Json<serde_json::Value>, RequestError> {
    check_authorization(
        &IdeaRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Delete,
        &idea_id,
    )
    .await?;

    idea_service(&app)
        .delete_idea(&idea_id, &current_user.id)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Idea successfully deleted." }),
    ))
}
