pub use sea_orm_migration::prelude::*;

mod m20250911_141523_create_users;
mod m20250918_103045_create_topics;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250911_141523_create_users::Migration),
            Box::new(m20250918_103045_create_topics::Migration),
        ]
    }
}

pub struct Migrator;
