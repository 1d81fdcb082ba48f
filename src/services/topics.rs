use chrono::Utc;
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use validator::Validate;

use crate::{
    database::models::topic,
    pagination::PaginationView,
    repository::{topics::TopicPage, PagedRepository, Repository, TopicRepository},
    services::{new_entity_id, validate_identifier, ServiceError},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TopicInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The title must be between 1 and 255 characters."
    ))]
    pub title: String,
}

#[derive(Clone)]
pub struct TopicService {
    repository: TopicRepository,
}

impl TopicService {
    #[must_use]
    pub fn new(repository: TopicRepository) -> Self {
        Self { repository }
    }

    pub async fn create_topic(
        &self,
        input: &TopicInput,
        user_id: &str,
    ) -> Result<topic::Model, ServiceError> {
        input.validate()?;
        validate_identifier(user_id)?;

        let now = Utc::now().naive_utc();
        let topic = topic::Model {
            id: new_entity_id(),
            user_id: user_id.to_owned(),
            title: input.title.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repository.add(topic.clone()).await?;
        Ok(topic)
    }

    /// The lookup is owner-scoped; a topic that exists but belongs to someone
    /// else behaves as missing here (the ownership gate runs upstream).
    pub async fn update_topic(
        &self,
        topic_id: &str,
        input: &TopicInput,
        user_id: &str,
    ) -> Result<topic::Model, ServiceError> {
        input.validate()?;
        validate_identifier(topic_id)?;
        validate_identifier(user_id)?;

        let mut topic = self
            .repository
            .find_first_matching(
                Condition::all()
                    .add(topic::Column::Id.eq(topic_id))
                    .add(topic::Column::UserId.eq(user_id)),
            )
            .await?
            .ok_or(ServiceError::NotFound("topic"))?;

        topic.title = input.title.clone();
        topic.updated_at = Utc::now().naive_utc();
        self.repository.update(topic.clone()).await?;
        Ok(topic)
    }

    pub async fn delete_topic(&self, topic_id: &str, user_id: &str) -> Result<(), ServiceError> {
        validate_identifier(topic_id)?;
        validate_identifier(user_id)?;

        let topic = self
            .repository
            .find_first_matching(
                Condition::all()
                    .add(topic::Column::Id.eq(topic_id))
                    .add(topic::Column::UserId.eq(user_id)),
            )
            .await?
            .ok_or(ServiceError::NotFound("topic"))?;

        self.repository.delete(topic).await?;
        Ok(())
    }

    pub async fn get_topic(&self, topic_id: &str) -> Result<topic::Model, ServiceError> {
        validate_identifier(topic_id)?;

        self.repository
            .find_by_id(topic_id.to_owned())
            .await?
            .ok_or(ServiceError::NotFound("topic"))
    }

    pub async fn get_page(
        &self,
        page_number: i64,
        page_size: i64,
        owner: Option<&str>,
    ) -> Result<PaginationView<TopicPage>, ServiceError> {
        Ok(self
            .repository
            .get_paged(page_number, page_size, owner)
            .await?)
    }
}
