use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryFilter,
};

use crate::pagination::PaginationView;

pub mod ideas;
pub mod topics;
pub mod users;
pub mod votes;

pub use ideas::IdeaRepository;
pub use topics::TopicRepository;
pub use users::UserRepository;
pub use votes::VoteRepository;

/// Generic CRUD contract shared by all entity repositories.
///
/// Implementors only supply the database connection; the default method
/// bodies cover point lookup, predicate queries and the three mutations.
/// Absent rows are a normal outcome (`Ok(None)`), never an error.
///
/// A repository overrides `delete` when removing the entity must cascade to
/// its dependents (topics own ideas, ideas own votes).
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send,
{
    fn db(&self) -> &DatabaseConnection;

    async fn find_by_id<K>(&self, key: K) -> Result<Option<E::Model>, DbErr>
    where
        K: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType> + Send,
    {
        E::find_by_id(key).one(self.db()).await
    }

    async fn find_first_matching(&self, filter: Condition) -> Result<Option<E::Model>, DbErr> {
        E::find().filter(filter).one(self.db()).await
    }

    async fn find_all_matching(&self, filter: Condition) -> Result<Vec<E::Model>, DbErr> {
        E::find().filter(filter).all(self.db()).await
    }

    async fn add(&self, entity: E::Model) -> Result<(), DbErr> {
        E::insert(entity.into_active_model()).exec(self.db()).await?;
        Ok(())
    }

    async fn update(&self, entity: E::Model) -> Result<(), DbErr> {
        E::update(entity.into_active_model()).exec(self.db()).await?;
        Ok(())
    }

    async fn delete(&self, entity: E::Model) -> Result<(), DbErr> {
        E::delete(entity.into_active_model()).exec(self.db()).await?;
        Ok(())
    }
}

/// Paginated listing contract for repositories that expose a read-side
/// projection (joined columns, aggregated counts).
///
/// `identifier` optionally scopes the listing — to an owner for topics, to a
/// topic for ideas. The projection is computed per call; a concurrent vote
/// may or may not be visible in the returned counts (snapshot consistency).
#[async_trait]
pub trait PagedRepository {
    type View: Send;

    async fn get_paged(
        &self,
        page_number: i64,
        page_size: i64,
        identifier: Option<&str>,
    ) -> Result<PaginationView<Self::View>, DbErr>;
}
