use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::{
    authorization::FindResource,
    database::models::{idea, topic, user, vote},
    pagination::{paginate, PaginationView},
    repository::{PagedRepository, Repository},
};

/// One row of the paginated topic listing, joined with the author's name.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct TopicPage {
    pub id: String,
    pub created_by: String,
    pub title: String,
}

#[derive(Clone)]
pub struct TopicRepository {
    db: DatabaseConnection,
}

impl TopicRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Repository<topic::Entity> for TopicRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Deleting a topic removes its ideas and their votes first.
    async fn delete(&self, entity: topic::Model) -> Result<(), DbErr> {
        let idea_ids: Vec<String> = idea::Entity::find()
            .filter(idea::Column::TopicId.eq(&entity.id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|idea| idea.id)
            .collect();

        if !idea_ids.is_empty() {
            vote::Entity::delete_many()
                .filter(vote::Column::IdeaId.is_in(idea_ids.clone()))
                .exec(&self.db)
                .await?;
            idea::Entity::delete_many()
                .filter(idea::Column::Id.is_in(idea_ids))
                .exec(&self.db)
                .await?;
        }

        topic::Entity::delete(entity.into_active_model())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PagedRepository for TopicRepository {
    type View = TopicPage;

    /// Lists topics joined with the author's display name, optionally scoped
    /// to one owner.
    async fn get_paged(
        &self,
        page_number: i64,
        page_size: i64,
        owner: Option<&str>,
    ) -> Result<PaginationView<TopicPage>, DbErr> {
        let mut filter = Condition::all();
        if let Some(owner) = owner {
            filter = filter.add(topic::Column::UserId.eq(owner));
        }

        let total_items = topic::Entity::find()
            .filter(filter.clone())
            .count(&self.db)
            .await?;
        let window = paginate(page_number, page_size, total_items);

        let items = topic::Entity::find()
            .filter(filter)
            .join(JoinType::InnerJoin, topic::Relation::User.def())
            .select_only()
            .column(topic::Column::Id)
            .expr_as(Expr::col((user::Entity, user::Column::Name)), "created_by")
            .column(topic::Column::Title)
            .order_by_asc(topic::Column::CreatedAt)
            .offset(window.skip)
            .limit(window.take)
            .into_model::<TopicPage>()
            .all(&self.db)
            .await?;

        Ok(PaginationView::new(items, total_items, window))
    }
}

#[async_trait]
impl FindResource for TopicRepository {
    type Resource = topic::Model;

    async fn find_resource(
        &self,
        key: &str,
        _acting_user_id: &str,
    ) -> Result<Option<topic::Model>, DbErr> {
        self.find_by_id(key.to_owned()).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        repository::{IdeaRepository, VoteRepository},
        services::new_entity_id,
        tests::setup_test::{setup_test, TestUtils},
    };

    async fn seed_topic(test: &TestUtils, owner: &str, title: &str, offset_seconds: i64) -> topic::Model {
        let now = Utc::now().naive_utc() + Duration::seconds(offset_seconds);
        let topic = topic::Model {
            id: new_entity_id(),
            user_id: owner.to_owned(),
            title: title.to_owned(),
            created_at: now,
            updated_at: now,
        };
        TopicRepository::new(test.db.clone())
            .add(topic.clone())
            .await
            .expect("Failed to insert topic");
        topic
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing_rows() {
        let test = setup_test().await;
        let repository = TopicRepository::new(test.db.clone());

        let found = repository
            .find_by_id(new_entity_id())
            .await
            .expect("Lookup failed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_all_matching_filters_by_predicate() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;

        seed_topic(&test, &alice.id, "Alice one", 0).await;
        seed_topic(&test, &alice.id, "Alice two", 1).await;
        seed_topic(&test, &bob.id, "Bob one", 2).await;

        let repository = TopicRepository::new(test.db.clone());
        let alices = repository
            .find_all_matching(Condition::all().add(topic::Column::UserId.eq(alice.id.as_str())))
            .await
            .expect("Query failed");

        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|topic| topic.user_id == alice.id));
    }

    #[tokio::test]
    async fn paged_view_joins_the_authors_name() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;

        seed_topic(&test, &alice.id, "First", 0).await;
        seed_topic(&test, &bob.id, "Second", 1).await;

        let page = TopicRepository::new(test.db.clone())
            .get_paged(1, 10, None)
            .await
            .expect("Paged query failed");

        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].created_by, "alice");
        assert_eq!(page.items[1].created_by, "bob");

        let scoped = TopicRepository::new(test.db.clone())
            .get_paged(1, 10, Some(&bob.id))
            .await
            .expect("Paged query failed");
        assert_eq!(scoped.total_items, 1);
        assert_eq!(scoped.items[0].title, "Second");
    }

    #[tokio::test]
    async fn out_of_range_page_inputs_are_coerced() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        seed_topic(&test, &alice.id, "Only one", 0).await;

        let page = TopicRepository::new(test.db.clone())
            .get_paged(0, -1, None)
            .await
            .expect("Paged query failed");

        assert_eq!(page.current_page, 1);
        assert_eq!(page.page_size, 10);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_topic_removes_its_ideas_and_their_votes() {
        let test = setup_test().await;
        let (alice, _) = test.create_user("alice").await;
        let (bob, _) = test.create_user("bob").await;

        let topic = seed_topic(&test, &alice.id, "Doomed", 0).await;

        let idea_repository = IdeaRepository::new(test.db.clone());
        let now = Utc::now().naive_utc();
        let idea = idea::Model {
            id: new_entity_id(),
            user_id: alice.id.clone(),
            topic_id: topic.id.clone(),
            description: "Doomed idea".to_owned(),
            created_at: now,
            updated_at: now,
        };
        idea_repository
            .add(idea.clone())
            .await
            .expect("Failed to insert idea");

        let vote_repository = VoteRepository::new(test.db.clone());
        vote_repository
            .add(vote::Model {
                idea_id: idea.id.clone(),
                user_id: bob.id.clone(),
                created_at: now,
            })
            .await
            .expect("Failed to insert vote");

        TopicRepository::new(test.db.clone())
            .delete(topic.clone())
            .await
            .expect("Delete failed");

        assert!(idea_repository
            .find_by_id(idea.id.clone())
            .await
            .expect("Lookup failed")
            .is_none());
        assert_eq!(
            vote_repository
                .count_votes(&idea.id)
                .await
                .expect("Count failed"),
            0
        );
    }
}
