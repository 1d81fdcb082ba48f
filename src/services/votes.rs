use chrono::Utc;
use sea_orm::SqlErr;

use crate::{
    database::models::vote,
    repository::{Repository, VoteRepository},
    services::{validate_identifier, ServiceError},
};

#[derive(Clone)]
pub struct VoteService {
    repository: VoteRepository,
}

impl VoteService {
    #[must_use]
    pub fn new(repository: VoteRepository) -> Self {
        Self { repository }
    }

    /// Records a vote, returning `false` when the user already voted on the
    /// idea.
    ///
    /// The existence check is only a fast path; two concurrent calls for the
    /// same `(idea_id, user_id)` pair can both pass it. The composite primary
    /// key is the authoritative guard — the losing insert comes back as a
    /// unique-constraint violation and is reported as "not created" too.
    pub async fn create_vote(&self, idea_id: &str, user_id: &str) -> Result<bool, ServiceError> {
        validate_identifier(idea_id)?;
        validate_identifier(user_id)?;

        let existing = self
            .repository
            .find_by_id((idea_id.to_owned(), user_id.to_owned()))
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let new_vote = vote::Model {
            idea_id: idea_id.to_owned(),
            user_id: user_id.to_owned(),
            created_at: Utc::now().naive_utc(),
        };

        match self.repository.add(new_vote).await {
            Ok(()) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the acting user's vote, returning `false` when there was none.
    pub async fn delete_vote(&self, idea_id: &str, user_id: &str) -> Result<bool, ServiceError> {
        validate_identifier(idea_id)?;
        validate_identifier(user_id)?;

        let Some(existing) = self
            .repository
            .find_by_id((idea_id.to_owned(), user_id.to_owned()))
            .await?
        else {
            return Ok(false);
        };

        self.repository.delete(existing).await?;
        Ok(true)
    }

    pub async fn count_votes(&self, idea_id: &str) -> Result<u64, ServiceError> {
        validate_identifier(idea_id)?;
        Ok(self.repository.count_votes(idea_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        database::models::{idea, topic},
        repository::{IdeaRepository, TopicRepository},
        services::new_entity_id,
        tests::setup_test::{setup_test, TestUtils},
    };

    async fn seed_idea(test: &TestUtils, owner: &str) -> idea::Model {
        let now = Utc::now().naive_utc();
        let topic = topic::Model {
            id: new_entity_id(),
            user_id: owner.to_owned(),
            title: "Topic".to_owned(),
            created_at: now,
            updated_at: now,
        };
        TopicRepository::new(test.db.clone())
            .add(topic.clone())
            .await
            .expect("Failed to insert topic");

        let idea = idea::Model {
            id: new_entity_id(),
            user_id: owner.to_owned(),
            topic_id: topic.id,
            description: "Idea".to_owned(),
            created_at: now,
            updated_at: now,
        };
        IdeaRepository::new(test.db.clone())
            .add(idea.clone())
            .await
            .expect("Failed to insert idea");
        idea
    }

    #[tokio::test]
    async fn a_second_vote_by_the_same_user_is_not_created() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;
        let idea = seed_idea(&test, &alice.id).await;

        let service = VoteService::new(VoteRepository::new(test.db.clone()));

        assert!(service
            .create_vote(&idea.id, &bob.id)
            .await
            .expect("Vote failed"));
        assert!(!service
            .create_vote(&idea.id, &bob.id)
            .await
            .expect("Vote failed"));

        assert_eq!(
            service.count_votes(&idea.id).await.expect("Count failed"),
            1
        );
    }

    #[tokio::test]
    async fn removing_a_vote_reports_whether_one_existed() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let idea = seed_idea(&test, &alice.id).await;

        let service = VoteService::new(VoteRepository::new(test.db.clone()));

        assert!(!service
            .delete_vote(&idea.id, &alice.id)
            .await
            .expect("Delete failed"));

        service
            .create_vote(&idea.id, &alice.id)
            .await
            .expect("Vote failed");
        assert!(service
            .delete_vote(&idea.id, &alice.id)
            .await
            .expect("Delete failed"));
        assert_eq!(
            service.count_votes(&idea.id).await.expect("Count failed"),
            0
        );
    }

    #[tokio::test]
    async fn malformed_identifiers_are_validation_failures() {
        let test = setup_test().await;
        let service = VoteService::new(VoteRepository::new(test.db.clone()));

        let result = service.create_vote("short-id", &new_entity_id()).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
