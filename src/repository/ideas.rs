use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::{
    authorization::FindResource,
    database::models::{idea, user, vote},
    pagination::{paginate, PaginationView},
    repository::{PagedRepository, Repository},
};

/// One row of the paginated idea listing: author name and the vote count
/// aggregated at read time.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct IdeaPage {
    pub id: String,
    pub created_by: String,
    pub description: String,
    pub votes: i64,
}

#[derive(Clone)]
pub struct IdeaRepository {
    db: DatabaseConnection,
}

impl IdeaRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository<idea::Entity> for IdeaRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Deleting an idea removes its votes first.
    async fn delete(&self, entity: idea::Model) -> Result<(), DbErr> {
        vote::Entity::delete_many()
            .filter(vote::Column::IdeaId.eq(&entity.id))
            .exec(&self.db)
            .await?;

        idea::Entity::delete(entity.into_active_model())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PagedRepository for IdeaRepository {
    type View = IdeaPage;

    /// Lists ideas joined with the author's display name and a per-call vote
    /// count, optionally scoped to one topic.
    async fn get_paged(
        &self,
        page_number: i64,
        page_size: i64,
        topic: Option<&str>,
    ) -> Result<PaginationView<IdeaPage>, DbErr> {
        let mut filter = Condition::all();
        if let Some(topic) = topic {
            filter = filter.add(idea::Column::TopicId.eq(topic));
        }

        let total_items = idea::Entity::find()
            .filter(filter.clone())
            .count(&self.db)
            .await?;
        let window = paginate(page_number, page_size, total_items);

        let items = idea::Entity::find()
            .filter(filter)
            .join(JoinType::InnerJoin, idea::Relation::User.def())
            .join(JoinType::LeftJoin, idea::Relation::Votes.def())
            .select_only()
            .column(idea::Column::Id)
            .expr_as(Expr::col((user::Entity, user::Column::Name)), "created_by")
            .column(idea::Column::Description)
            .expr_as(
                Expr::col((vote::Entity, vote::Column::UserId)).count(),
                "votes",
            )
            .group_by(idea::Column::Id)
            .group_by(user::Column::Name)
            .group_by(idea::Column::Description)
            .group_by(idea::Column::CreatedAt)
            .order_by_asc(idea::Column::CreatedAt)
            .offset(window.skip)
            .limit(window.take)
            .into_model::<IdeaPage>()
            .all(&self.db)
            .await?;

        Ok(PaginationView::new(items, total_items, window))
    }
}

#[async_trait]
impl FindResource for IdeaRepository {
    type Resource = idea::Model;

    async fn find_resource(
        &self,
        key: &str,
        _acting_user_id: &str,
    ) -> Result<Option<idea::Model>, DbErr> {
        self.find_by_id(key.to_owned()).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        database::models::topic,
        repository::{TopicRepository, VoteRepository},
        services::new_entity_id,
        tests::setup_test::{setup_test, TestUtils},
    };

    async fn seed_topic(test: &TestUtils, owner: &str) -> topic::Model {
        let now = Utc::now().naive_utc();
        let topic = topic::Model {
            id: new_entity_id(),
            user_id: owner.to_owned(),
            title: "Seeded topic".to_owned(),
            created_at: now,
            updated_at: now,
        };
        TopicRepository::new(test.db.clone())
            .add(topic.clone())
            .await
            .expect("Failed to insert topic");
        topic
    }

    async fn seed_idea(
        test: &TestUtils,
        owner: &str,
        topic_id: &str,
        description: &str,
        offset_seconds: i64,
    ) -> idea::Model {
        let now = Utc::now().naive_utc() + Duration::seconds(offset_seconds);
        let idea = idea::Model {
            id: new_entity_id(),
            user_id: owner.to_owned(),
            topic_id: topic_id.to_owned(),
            description: description.to_owned(),
            created_at: now,
            updated_at: now,
        };
        IdeaRepository::new(test.db.clone())
            .add(idea.clone())
            .await
            .expect("Failed to insert idea");
        idea
    }

    async fn seed_vote(test: &TestUtils, idea_id: &str, user_id: &str) {
        let vote = vote::Model {
            idea_id: idea_id.to_owned(),
            user_id: user_id.to_owned(),
            created_at: Utc::now().naive_utc(),
        };
        VoteRepository::new(test.db.clone())
            .add(vote)
            .await
            .expect("Failed to insert vote");
    }

    #[tokio::test]
    async fn paged_view_joins_author_and_counts_votes() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;

        let topic = seed_topic(&test, &alice.id).await;
        let first = seed_idea(&test, &alice.id, &topic.id, "Idea with votes", 0).await;
        seed_idea(&test, &alice.id, &topic.id, "Idea without votes", 1).await;
        seed_vote(&test, &first.id, &alice.id).await;
        seed_vote(&test, &first.id, &bob.id).await;

        let page = IdeaRepository::new(test.db.clone())
            .get_paged(1, 10, Some(&topic.id))
            .await
            .expect("Paged query failed");

        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.len(), 2);

        assert_eq!(page.items[0].description, "Idea with votes");
        assert_eq!(page.items[0].created_by, "alice");
        assert_eq!(page.items[0].votes, 2);

        assert_eq!(page.items[1].description, "Idea without votes");
        assert_eq!(page.items[1].votes, 0);
    }

    #[tokio::test]
    async fn paged_view_is_scoped_to_the_given_topic() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;

        let topic = seed_topic(&test, &alice.id).await;
        let other_topic = seed_topic(&test, &alice.id).await;
        seed_idea(&test, &alice.id, &topic.id, "In scope", 0).await;
        seed_idea(&test, &alice.id, &other_topic.id, "Out of scope", 0).await;

        let page = IdeaRepository::new(test.db.clone())
            .get_paged(1, 10, Some(&topic.id))
            .await
            .expect("Paged query failed");

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].description, "In scope");
    }

    #[tokio::test]
    async fn deleting_an_idea_removes_its_votes() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;

        let topic = seed_topic(&test, &alice.id).await;
        let idea = seed_idea(&test, &alice.id, &topic.id, "Doomed", 0).await;
        seed_vote(&test, &idea.id, &bob.id).await;

        let repository = IdeaRepository::new(test.db.clone());
        repository.delete(idea.clone()).await.expect("Delete failed");

        assert!(repository
            .find_by_id(idea.id.clone())
            .await
            .expect("Lookup failed")
            .is_none());
        assert_eq!(
            VoteRepository::new(test.db.clone())
                .count_votes(&idea.id)
                .await
                .expect("Count failed"),
            0
        );
    }
}
