use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, DbErr};

use crate::{database::models::user, repository::Repository};

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        self.find_first_matching(Condition::all().add(user::Column::Email.eq(email)))
            .await
    }
}

#[async_trait]
impl Repository<user::Entity> for UserRepository {
    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
