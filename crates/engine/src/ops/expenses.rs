use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, DbErr, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, Money, ResultEngine, expenses};

use super::{Engine, with_tx};

const CATEGORY_MAX_CHARS: usize = 100;
const NOTES_MAX_CHARS: usize = 500;

/// Write payload shared by create and update; an update overwrites every
/// business field.
#[derive(Clone, Debug)]
pub struct ExpenseWriteCmd {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub notes: Option<String>,
}

impl ExpenseWriteCmd {
    /// Checks field constraints and converts the amount into cents.
    ///
    /// The category here is free text stored verbatim (no trim), unlike the
    /// names in the category registry.
    fn validated(self) -> ResultEngine<ValidExpense> {
        let amount = Money::try_from(self.amount)?;
        if self.category.chars().count() > CATEGORY_MAX_CHARS {
            return Err(EngineError::Validation(format!(
                "Category must be at most {CATEGORY_MAX_CHARS} characters"
            )));
        }
        if let Some(notes) = &self.notes
            && notes.chars().count() > NOTES_MAX_CHARS
        {
            return Err(EngineError::Validation(format!(
                "Notes must be at most {NOTES_MAX_CHARS} characters"
            )));
        }
        Ok(ValidExpense {
            amount,
            date: self.date,
            category: self.category,
            notes: self.notes,
        })
    }
}

struct ValidExpense {
    amount: Money,
    date: NaiveDate,
    category: String,
    notes: Option<String>,
}

impl Engine {
    /// Lists all expenses, newest date first; ties broken by creation time.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<expenses::Model>> {
        with_tx!(self, |db_tx| {
            let models = expenses::Entity::find()
                .order_by_desc(expenses::Column::Date)
                .order_by_desc(expenses::Column::CreatedAt)
                .all(&db_tx)
                .await?;
            Ok(models)
        })
    }

    /// Returns a single expense.
    pub async fn expense(&self, id: i32) -> ResultEngine<expenses::Model> {
        with_tx!(self, |db_tx| {
            let model = expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| expense_not_found(id))?;
            Ok(model)
        })
    }

    /// Creates an expense.
    ///
    /// The category is not checked against the registry: referencing a name
    /// the registry never had (or no longer has) is legal.
    pub async fn create_expense(&self, cmd: ExpenseWriteCmd) -> ResultEngine<expenses::Model> {
        let valid = cmd.validated()?;
        with_tx!(self, |db_tx| {
            let active = expenses::ActiveModel {
                amount_minor: ActiveValue::Set(valid.amount.cents()),
                date: ActiveValue::Set(valid.date),
                category: ActiveValue::Set(valid.category),
                notes: ActiveValue::Set(valid.notes),
                created_at: ActiveValue::Set(Utc::now()),
                updated_at: ActiveValue::Set(None),
                ..Default::default()
            };
            let model = active.insert(&db_tx).await?;
            Ok(model)
        })
    }

    /// Overwrites all business fields of an expense and stamps `updated_at`.
    pub async fn update_expense(
        &self,
        id: i32,
        cmd: ExpenseWriteCmd,
    ) -> ResultEngine<expenses::Model> {
        let valid = cmd.validated()?;
        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| expense_not_found(id))?;

            let active = expenses::ActiveModel {
                id: ActiveValue::Set(id),
                amount_minor: ActiveValue::Set(valid.amount.cents()),
                date: ActiveValue::Set(valid.date),
                category: ActiveValue::Set(valid.category),
                notes: ActiveValue::Set(valid.notes),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            let model = match active.update(&db_tx).await {
                Ok(model) => model,
                Err(DbErr::RecordNotUpdated) => {
                    // The row vanished between the lookup and the write.
                    let still_there = expenses::Entity::find_by_id(id)
                        .one(&db_tx)
                        .await?
                        .is_some();
                    if still_there {
                        return Err(EngineError::Database(DbErr::RecordNotUpdated));
                    }
                    return Err(expense_not_found(id));
                }
                Err(err) => return Err(err.into()),
            };
            Ok(model)
        })
    }

    /// Deletes an expense.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_by_id(id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                return Err(expense_not_found(id));
            }
            Ok(())
        })
    }
}

fn expense_not_found(id: i32) -> EngineError {
    EngineError::NotFound(format!("Expense with id {id} not found"))
}
