pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_event_table;
mod m20250801_000002_create_index_at_event;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_event_table::Migration),
            Box::new(m20250801_000002_create_index_at_event::Migration),
        ]
    }
}
