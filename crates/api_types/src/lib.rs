use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod category {
    use super::*;

    /// Response body for a single category.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryGet {
        pub id: i32,
        pub name: String,
    }

    /// Request body for creating a category.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub name: String,
    }

    /// Request body for renaming a category.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }
}

pub mod expense {
    use super::*;

    /// Response body for a single expense.
    ///
    /// `amount` is serialized as a JSON number with at most 2 fractional
    /// digits; `date` as an ISO calendar date string; `notes` as `null`
    /// when absent.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseGet {
        pub id: i32,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub date: NaiveDate,
        pub category: String,
        pub notes: Option<String>,
    }

    /// Request body for creating an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub date: NaiveDate,
        pub category: String,
        #[serde(default)]
        pub notes: Option<String>,
    }

    /// Request body for replacing an expense's fields.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub date: NaiveDate,
        pub category: String,
        #[serde(default)]
        pub notes: Option<String>,
    }
}

pub mod report {
    use super::*;

    /// Response body for the overall summary.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Summary {
        #[serde(with = "rust_decimal::serde::float")]
        pub total_expenses: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub monthly_expenses: Decimal,
        pub category_count: u64,
    }

    /// Response row of the per-category report.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategorySummary {
        pub category: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub total: Decimal,
        pub count: i64,
    }
}
