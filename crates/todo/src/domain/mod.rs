//! Task store and its query types.
//!
//! The store combines storage operations with the task rules: ID
//! allocation, filtering, sorting, search and recurrence on completion.

mod query;
mod tasks;

pub use query::SortKey;
pub use tasks::TaskStore;
