mod core;
pub mod backend;
pub mod config;
pub mod tracker;

pub use crate::core::{Expense, ExpenseId, Cost, ExpenseRepository, RepositoryError};
pub use crate::core::{expense, repository, error};
pub use crate::tracker::{ExpenseTracker, TrackerError, TrackerResult};
