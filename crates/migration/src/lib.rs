pub use sea_orm_migration::prelude::*;

mod m20260120_000001_categories;
mod m20260120_000002_expenses;
mod m20260120_000003_seed_categories;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260120_000001_categories::Migration),
            Box::new(m20260120_000002_expenses::Migration),
            Box::new(m20260120_000003_seed_categories::Migration),
        ]
    }
}
