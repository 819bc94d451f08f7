pub mod expense;
pub mod repository;
pub mod error;

pub use expense::{Expense, ExpenseId, Cost};
pub use repository::ExpenseRepository;
pub use error::{RepositoryError, RepositoryResult};
