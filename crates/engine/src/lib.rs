//! Data service for a personal expense tracker.
//!
//! The engine owns the database connection and exposes the category
//! registry, the expense store, and the aggregation queries as async
//! operations. Every operation runs inside a single database transaction;
//! the engine keeps no other state, so handles can be shared freely across
//! requests.

pub use error::EngineError;
pub use money::Money;
pub use ops::{CategorySummaryRow, Engine, EngineBuilder, ExpenseWriteCmd, SummaryTotals};

pub mod categories;
pub mod expenses;
mod error;
mod money;
mod ops;

type ResultEngine<T> = Result<T, EngineError>;
