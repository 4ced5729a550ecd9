use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Event::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Event::Name).string())
                    .col(ColumnDef::new(Event::Artist).string())
                    .col(ColumnDef::new(Event::Date).date().not_null())
                    .col(ColumnDef::new(Event::Time).string())
                    .col(ColumnDef::new(Event::Venue).string())
                    .col(ColumnDef::new(Event::City).string())
                    .col(ColumnDef::new(Event::Provincia).string())
                    .col(ColumnDef::new(Event::Country).string())
                    .col(ColumnDef::new(Event::Description).text())
                    .col(ColumnDef::new(Event::SourceUrl).string())
                    .col(
                        ColumnDef::new(Event::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Event::NightPlan).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Name,
    Artist,
    Date,
    Time,
    Venue,
    City,
    Provincia,
    Country,
    Description,
    SourceUrl,
    Verified,
    NightPlan,
}
