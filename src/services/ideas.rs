use chrono::Utc;
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use validator::Validate;

use crate::{
    database::models::idea,
    pagination::PaginationView,
    repository::{ideas::IdeaPage, IdeaRepository, PagedRepository, Repository},
    services::{new_entity_id, validate_identifier, ServiceError},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IdeaInput {
    #[validate(length(
        min = 1,
        max = 255,
        message = "The description must be between 1 and 255 characters."
    ))]
    pub description: String,
}

#[derive(Clone)]
pub struct IdeaService {
    repository: IdeaRepository,
}

impl IdeaService {
    #[must_use]
    pub fn new(repository: IdeaRepository) -> Self {
        Self { repository }
    }

    /// The topic's existence is established upstream by the aggregation gate,
    /// so only the identifiers are validated here.
    pub async fn create_idea(
        &self,
        input: &IdeaInput,
        user_id: &str,
        topic_id: &str,
    ) -> Result<idea::Model, ServiceError> {
        input.validate()?;
        validate_identifier(user_id)?;
        validate_identifier(topic_id)?;

        let now = Utc::now().naive_utc();
        let idea = idea::Model {
            id: new_entity_id(),
            user_id: user_id.to_owned(),
            topic_id: topic_id.to_owned(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };

        self.repository.add(idea.clone()).await?;
        Ok(idea)
    }

    pub async fn update_idea(
        &self,
        idea_id: &str,
        input: &IdeaInput,
        user_id: &str,
    ) -> Result<idea::Model, ServiceError> {
        input.validate()?;
        validate_identifier(idea_id)?;
        validate_identifier(user_id)?;

        let mut idea = self
            .repository
            .find_first_matching(
                Condition::all()
                    .add(idea::Column::Id.eq(idea_id))
                    .add(idea::Column::UserId.eq(user_id)),
            )
            .await?
            .ok_or(ServiceError::NotFound("idea"))?;

        idea.description = input.description.clone();
        idea.updated_at = Utc::now().naive_utc();
        self.repository.update(idea.clone()).await?;
        Ok(idea)
    }

    pub async fn delete_idea(&self, idea_id: &str, user_id: &str) -> Result<(), ServiceError> {
        validate_identifier(idea_id)?;
        validate_identifier(user_id)?;

        let idea = self
            .repository
            .find_first_matching(
                Condition::all()
                    .add(idea::Column::Id.eq(idea_id))
                    .add(idea::Column::UserId.eq(user_id)),
            )
            .await?
            .ok_or(ServiceError::NotFound("idea"))?;

        self.repository.delete(idea).await?;
        Ok(())
    }

    pub async fn get_page(
        &self,
        page_number: i64,
        page_size: i64,
        topic: Option<&str>,
    ) -> Result<PaginationView<IdeaPage>, ServiceError> {
        Ok(self
            .repository
            .get_paged(page_number, page_size, topic)
            .await?)
    }
}
