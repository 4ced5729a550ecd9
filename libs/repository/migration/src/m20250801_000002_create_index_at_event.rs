use sea_orm_migration::prelude::*;

use crate::m20250801_000001_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Event::Table)
                    .name("idx_event_date")
                    .col(Event::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Event::Table)
                    .name("idx_event_identity")
                    .col(Event::Artist)
                    .col(Event::Date)
                    .col(Event::Time)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .table(Event::Table)
                    .name("idx_event_identity")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .table(Event::Table)
                    .name("idx_event_date")
                    .to_owned(),
            )
            .await
    }
}
