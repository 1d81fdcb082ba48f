use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::{
    api::{request_error::RequestError, validated_json::ValidatedJson, PageParams},
    app::App,
    auth::CurrentUser,
    authorization::{check_authorization, Requirement},
    database::models::topic,
    repository::{IdeaRepository, TopicRepository},
    services::{ideas::IdeaInput, topics::TopicInput, IdeaService, TopicService},
};

use super::ideas::IdeaResponse;

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
}

impl From<topic::Model> for TopicResponse {
    fn from(topic: topic::Model) -> Self {
        Self {
            id: topic.id,
            user_id: topic.user_id,
            title: topic.title,
        }
    }
}

fn topic_service(app: &App) -> TopicService {
    TopicService::new(TopicRepository::new(app.db.clone()))
}

pub async fn create_topic(
    State(app): State<App>,
    current_user: CurrentUser,
    ValidatedJson(input): ValidatedJson<TopicInput>,
) -> Result<impl IntoResponse, RequestError> {
    let topic = topic_service(&app)
        .create_topic(&input, &current_user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(TopicResponse::from(topic))))
}

pub async fn update_topic(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(topic_id): Path<String>,
    ValidatedJson(input): ValidatedJson<TopicInput>,
) -> Result<Json<TopicResponse>, RequestError> {
    check_authorization(
        &TopicRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Edit,
        &topic_id,
    )
    .await?;

    let topic = topic_service(&app)
        .update_topic(&topic_id, &input, &current_user.id)
        .await?;
    Ok(Json(TopicResponse::from(topic)))
}

pub async fn delete_topic(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(topic_id): Path<String>,
) -> Result<Json<serde_json::Value>, RequestError> {
    check_authorization(
        &TopicRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Delete,
        &topic_id,
    )
    .await?;

    topic_service(&app)
        .delete_topic(&topic_id, &current_user.id)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Topic successfully deleted." }),
    ))
}

pub async fn get_topic(
    State(app): State<App>,
    _current_user: CurrentUser,
    Path(topic_id): Path<String>,
) -> Result<Json<TopicResponse>, RequestError> {
    let topic = topic_service(&app).get_topic(&topic_id).await?;
    Ok(Json(TopicResponse::from(topic)))
}

pub async fn list_topics(
    State(app): State<App>,
    _current_user: CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, RequestError> {
    let page = topic_service(&app)
        .get_page(params.page, params.page_size, None)
        .await?;
    Ok(Json(page))
}

pub async fn my_topics(
    State(app): State<App>,
    current_user: CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, RequestError> {
    let page = topic_service(&app)
        .get_page(params.page, params.page_size, Some(&current_user.id))
        .await?;
    Ok(Json(page))
}

/// Posting an idea under someone else's topic is allowed; aggregation only
/// requires the topic to exist.
pub async fn create_idea(
    State(app): State<App>,
    current_user: CurrentUser,
    Path(topic_id): Path<String>,
    ValidatedJson(input): ValidatedJson<IdeaInput>,
) -> Result<impl IntoResponse, RequestError> {
    check_authorization(
        &TopicRepository::new(app.db.clone()),
        &current_user.id,
        Requirement::Aggregate,
        &topic_id,
    )
    .await?;

    let idea = IdeaService::new(IdeaRepository::new(app.db.clone()))
        .create_idea(&input, &current_user.id, &topic_id)
        .await?;
    Ok((StatusCode::CREATED, Json(IdeaResponse::from(idea))))
}

pub async fn list_ideas(
    State(app): State<App>,
    _current_user: CurrentUser,
    Path(topic_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, RequestError> {
    let page = IdeaService::new(IdeaRepository::new(app.db.clone()))
        .get_page(params.page, params.page_size, Some(&topic_id))
        .await?;
    Ok(Json(page))
}
