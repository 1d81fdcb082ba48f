use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::{
    authorization::FindResource,
    database::models::vote,
    repository::Repository,
};

#[derive(Clone)]
pub struct VoteRepository {
    db: DatabaseConnection,
}

impl VoteRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Number of votes currently recorded for an idea.
    pub async fn count_votes(&self, idea_id: &str) -> Result<u64, DbErr> {
        vote::Entity::find()
            .filter(vote::Column::IdeaId.eq(idea_id))
            .count(&self.db)
            .await
    }
}

#[async_trait]
impl Repository<vote::Entity> for VoteRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl FindResource for VoteRepository {
    type Resource = vote::Model;

    /// A vote has no surrogate id; it is resolved by its natural key, the
    /// `(idea_id, acting_user_id)` pair.
    async fn find_resource(
        &self,
        key: &str,
        acting_user_id: &str,
    ) -> Result<Option<vote::Model>, DbErr> {
        self.find_by_id((key.to_owned(), acting_user_id.to_owned()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        authorization::FindResource,
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
    async fn votes_resolve_by_their_composite_key() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;
        let idea = seed_idea(&test, &alice.id).await;

        let repository = VoteRepository::new(test.db.clone());
        repository
            .add(vote::Model {
                idea_id: idea.id.clone(),
                user_id: bob.id.clone(),
                created_at: Utc::now().naive_utc(),
            })
            .await
            .expect("Failed to insert vote");

        // Resolution sees only the acting user's own vote.
        let bobs_vote = repository
            .find_resource(&idea.id, &bob.id)
            .await
            .expect("Lookup failed");
        assert!(bobs_vote.is_some());

        let alices_vote = repository
            .find_resource(&idea.id, &alice.id)
            .await
            .expect("Lookup failed");
        assert!(alices_vote.is_none());

        assert_eq!(
            repository.count_votes(&idea.id).await.expect("Count failed"),
            1
        );
    }

    #[tokio::test]
    async fn a_duplicate_vote_violates_the_composite_key() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let idea = seed_idea(&test, &alice.id).await;

        let repository = VoteRepository::new(test.db.clone());
        let vote = vote::Model {
            idea_id: idea.id.clone(),
            user_id: alice.id.clone(),
            created_at: Utc::now().naive_utc(),
        };
        repository
            .add(vote.clone())
            .await
            .expect("Failed to insert vote");

        let duplicate = repository.add(vote).await;
        assert!(matches!(
            duplicate.as_ref().map_err(sea_orm::DbErr::sql_err),
            Err(Some(sea_orm::SqlErr::UniqueConstraintViolation(_)))
        ));

        assert_eq!(
            repository.count_votes(&idea.id).await.expect("Count failed"),
            1
        );
    }
}
