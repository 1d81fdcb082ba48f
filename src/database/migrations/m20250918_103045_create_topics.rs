use sea_orm_migration::{
    prelude::*,
    schema::{string, string_len, timestamp},
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Topics::Table)
                    .if_not_exists()
                    .col(string_len(Topics::Id, 36).primary_key())
                    .col(string_len(Topics::UserId, 36).not_null())
                    .col(string(Topics::Title).not_null())
                    .col(timestamp(Topics::CreatedAt).not_null())
                    .col(timestamp(Topics::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-topics-user_id")
                            .from(Topics::Table, Topics::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ideas::Table)
                    .if_not_exists()
                    .col(string_len(Ideas::Id, 36).primary_key())
                    .col(string_len(Ideas::UserId, 36).not_null())
                    .col(string_len(Ideas::TopicId, 36).not_null())
                    .col(string(Ideas::Description).not_null())
                    .col(timestamp(Ideas::CreatedAt).not_null())
                    .col(timestamp(Ideas::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ideas-user_id")
                            .from(Ideas::Table, Ideas::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ideas-topic_id")
                            .from(Ideas::Table, Ideas::TopicId)
                            .to(Topics::Table, Topics::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The composite primary key is the storage-level guarantee that a user
        // can vote at most once per idea.
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(string_len(Votes::IdeaId, 36).not_null())
                    .col(string_len(Votes::UserId, 36).not_null())
                    .col(timestamp(Votes::CreatedAt).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-votes")
                            .col(Votes::IdeaId)
                            .col(Votes::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-votes-idea_id")
                            .from(Votes::Table, Votes::IdeaId)
                            .to(Ideas::Table, Ideas::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-votes-user_id")
                            .from(Votes::Table, Votes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-topics-user_id")
                    .table(Topics::Table)
                    .col(Topics::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ideas-topic_id")
                    .table(Ideas::Table)
                    .col(Ideas::TopicId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Ideas::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Topics::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Topics {
    Table,
    Id,
    UserId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Ideas {
    Table,
    Id,
    UserId,
    TopicId,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    IdeaId,
    UserId,
    CreatedAt,
}
