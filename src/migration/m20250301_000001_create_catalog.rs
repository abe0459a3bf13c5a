use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

use crate::entity::{
    AgeCategories, AuditLogs, Categories, Favorites, MovieCategories, MovieTypes, Movies,
    PasswordResetTokens, Screenshots, Seasons, Users, Videos, favorites, seasons,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_from_entity<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Referenced tables first so foreign keys resolve on Postgres.
        create_from_entity(manager, &schema, Users).await?;
        create_from_entity(manager, &schema, MovieTypes).await?;
        create_from_entity(manager, &schema, AgeCategories).await?;
        create_from_entity(manager, &schema, Categories).await?;
        create_from_entity(manager, &schema, Movies).await?;
        create_from_entity(manager, &schema, MovieCategories).await?;
        create_from_entity(manager, &schema, Screenshots).await?;
        create_from_entity(manager, &schema, Seasons).await?;
        create_from_entity(manager, &schema, Videos).await?;
        create_from_entity(manager, &schema, Favorites).await?;
        create_from_entity(manager, &schema, PasswordResetTokens).await?;
        create_from_entity(manager, &schema, AuditLogs).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_favorites_user_movie")
                    .table(Favorites)
                    .col(favorites::Column::UserId)
                    .col(favorites::Column::MovieId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seasons_movie_number")
                    .table(Seasons)
                    .col(seasons::Column::MovieId)
                    .col(seasons::Column::Number)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(AuditLogs)
                    .table(PasswordResetTokens)
                    .table(Favorites)
                    .table(Videos)
                    .table(Seasons)
                    .table(Screenshots)
                    .table(MovieCategories)
                    .table(Movies)
                    .table(Categories)
                    .table(AgeCategories)
                    .table(MovieTypes)
                    .table(Users)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
