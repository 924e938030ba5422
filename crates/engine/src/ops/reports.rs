use chrono::{Datelike, Utc};
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, DbBackend, PaginatorTrait, Statement, TransactionTrait,
    Value, prelude::*,
};

use crate::{Money, ResultEngine, categories};

use super::{Engine, with_tx};

/// Store-wide totals plus the running total for the current calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryTotals {
    pub total_expenses: Money,
    pub monthly_expenses: Money,
    pub category_count: u64,
}

/// Aggregate over one exact stored `category` string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySummaryRow {
    pub category: String,
    pub total: Money,
    pub count: i64,
}

impl Engine {
    /// Computes the overall totals: all-time expense sum, current-month sum,
    /// and the number of registered categories.
    ///
    /// The month window is the calendar month of the server's UTC clock at
    /// call time. `category_count` counts registry rows, not the distinct
    /// categories in use by expenses.
    pub async fn summary(&self) -> ResultEngine<SummaryTotals> {
        let now = Utc::now();
        let month_key = format!("{:04}-{:02}", now.year(), now.month());
        with_tx!(self, |db_tx| {
            let backend = db_tx.get_database_backend();

            let total_minor = sum_amount_minor(
                &db_tx,
                backend,
                "SELECT COALESCE(SUM(amount_minor), 0) AS sum FROM expenses",
                vec![],
            )
            .await?;

            let monthly_minor = sum_amount_minor(
                &db_tx,
                backend,
                "SELECT COALESCE(SUM(amount_minor), 0) AS sum FROM expenses \
                 WHERE strftime('%Y-%m', date) = ?",
                vec![month_key.into()],
            )
            .await?;

            let category_count = categories::Entity::find().count(&db_tx).await?;

            Ok(SummaryTotals {
                total_expenses: Money::new(total_minor),
                monthly_expenses: Money::new(monthly_minor),
                category_count,
            })
        })
    }

    /// Groups expenses by their exact stored category string, summing and
    /// counting per group.
    ///
    /// Rows come back ordered by descending total; the order among equal
    /// totals is unspecified. No expenses means an empty list.
    pub async fn category_summary(&self) -> ResultEngine<Vec<CategorySummaryRow>> {
        with_tx!(self, |db_tx| {
            let backend = db_tx.get_database_backend();
            let stmt = Statement::from_string(
                backend,
                "SELECT category, COALESCE(SUM(amount_minor), 0) AS total, COUNT(*) AS count \
                 FROM expenses GROUP BY category ORDER BY total DESC",
            );
            let rows = db_tx.query_all(stmt).await?;

            let mut summary = Vec::with_capacity(rows.len());
            for row in rows {
                let category: String = row.try_get("", "category")?;
                let total: i64 = row.try_get("", "total")?;
                let count: i64 = row.try_get("", "count")?;
                summary.push(CategorySummaryRow {
                    category,
                    total: Money::new(total),
                    count,
                });
            }
            Ok(summary)
        })
    }
}

async fn sum_amount_minor(
    db_tx: &DatabaseTransaction,
    backend: DbBackend,
    sql: &str,
    values: Vec<Value>,
) -> ResultEngine<i64> {
    let stmt = Statement::from_sql_and_values(backend, sql, values);
    let row = db_tx.query_one(stmt).await?;
    Ok(row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0))
}
