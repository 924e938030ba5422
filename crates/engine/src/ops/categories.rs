use chrono::Utc;
use sea_orm::{ActiveValue, DbErr, QueryFilter, QueryOrder, SqlErr, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, categories, expenses};

use super::{Engine, with_tx};

const NAME_MAX_CHARS: usize = 100;

impl Engine {
    /// Lists all categories ordered by name.
    pub async fn list_categories(&self) -> ResultEngine<Vec<categories::Model>> {
        with_tx!(self, |db_tx| {
            let models = categories::Entity::find()
                .order_by_asc(categories::Column::Name)
                .all(&db_tx)
                .await?;
            Ok(models)
        })
    }

    /// Returns a single category.
    pub async fn category(&self, id: i32) -> ResultEngine<categories::Model> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| category_not_found(id))?;
            Ok(model)
        })
    }

    /// Creates a category from a display name.
    ///
    /// The name is trimmed before the duplicate check, so `" Food "` collides
    /// with an existing `"food"`. The pre-check keeps the common-path error
    /// message, while the unique index on `name_norm` is the authoritative
    /// guard against concurrent writers.
    pub async fn create_category(&self, name: &str) -> ResultEngine<categories::Model> {
        let name = normalize_category_name(name)?;
        let name_norm = name.to_lowercase();
        with_tx!(self, |db_tx| {
            let exists = categories::Entity::find()
                .filter(categories::Column::NameNorm.eq(name_norm.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(category_exists(&name));
            }

            let active = categories::ActiveModel {
                name: ActiveValue::Set(name.clone()),
                name_norm: ActiveValue::Set(name_norm),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            };
            let model = active
                .insert(&db_tx)
                .await
                .map_err(|err| map_unique_violation(err, &name))?;
            Ok(model)
        })
    }

    /// Renames an existing category.
    ///
    /// The duplicate check excludes the category itself, so a case-only
    /// rename succeeds. Expenses referencing the old name keep it.
    pub async fn rename_category(&self, id: i32, new_name: &str) -> ResultEngine<categories::Model> {
        let name = normalize_category_name(new_name)?;
        let name_norm = name.to_lowercase();
        with_tx!(self, |db_tx| {
            categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| category_not_found(id))?;

            let taken = categories::Entity::find()
                .filter(categories::Column::NameNorm.eq(name_norm.clone()))
                .filter(categories::Column::Id.ne(id))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(category_exists(&name));
            }

            let active = categories::ActiveModel {
                id: ActiveValue::Set(id),
                name: ActiveValue::Set(name.clone()),
                name_norm: ActiveValue::Set(name_norm),
                ..Default::default()
            };
            let model = match active.update(&db_tx).await {
                Ok(model) => model,
                Err(DbErr::RecordNotUpdated) => {
                    // The row vanished between the lookup and the write.
                    let still_there = categories::Entity::find_by_id(id)
                        .one(&db_tx)
                        .await?
                        .is_some();
                    if still_there {
                        return Err(EngineError::Database(DbErr::RecordNotUpdated));
                    }
                    return Err(category_not_found(id));
                }
                Err(err) => return Err(map_unique_violation(err, &name)),
            };
            Ok(model)
        })
    }

    /// Deletes a category, refusing while any expense still references it.
    ///
    /// The reference check matches the stored expense strings exactly (case
    /// included), so an expense tagged `"food"` does not block deleting
    /// `"Food"`.
    pub async fn delete_category(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| category_not_found(id))?;

            let in_use = expenses::Entity::find()
                .filter(expenses::Column::Category.eq(model.name))
                .one(&db_tx)
                .await?
                .is_some();
            if in_use {
                return Err(EngineError::Conflict(
                    "Cannot delete category because it is being used by expenses".to_string(),
                ));
            }

            let result = categories::Entity::delete_by_id(id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                return Err(category_not_found(id));
            }
            Ok(())
        })
    }
}

fn normalize_category_name(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(
            "Category name is required".to_string(),
        ));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(EngineError::Validation(format!(
            "Category name must be at most {NAME_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn category_not_found(id: i32) -> EngineError {
    EngineError::NotFound(format!("Category with id {id} not found"))
}

fn category_exists(name: &str) -> EngineError {
    EngineError::Conflict(format!("Category with name '{name}' already exists"))
}

/// Concurrent duplicate writes slip past the pre-check and surface from the
/// unique index instead; report those as the same conflict.
fn map_unique_violation(err: DbErr, name: &str) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => category_exists(name),
        _ => EngineError::Database(err),
    }
}
