//! Seeds the default category set shipped with a fresh database.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use sea_orm_migration::{SchemaManagerConnection, prelude::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Healthcare",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        for name in DEFAULT_CATEGORIES {
            insert_category(db, backend, name).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let backend = db.get_database_backend();

        for name in DEFAULT_CATEGORIES {
            db.execute(Statement::from_sql_and_values(
                backend,
                "DELETE FROM categories WHERE name_norm = ?;",
                vec![name.to_lowercase().into()],
            ))
            .await?;
        }

        Ok(())
    }
}

async fn insert_category(
    db: &SchemaManagerConnection<'_>,
    backend: DbBackend,
    name: &str,
) -> Result<(), DbErr> {
    // OR IGNORE keeps the seed re-runnable against a database that already
    // holds one of the default names.
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT OR IGNORE INTO categories (name, name_norm, created_at) \
         VALUES (?, ?, ?);",
        vec![
            name.to_string().into(),
            name.to_lowercase().into(),
            Utc::now().into(),
        ],
    ))
    .await?;
    Ok(())
}
