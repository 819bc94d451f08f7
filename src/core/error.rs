use thiserror::Error;

use crate::core::ExpenseId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// Occurs when an update is requested while no expense
    /// has been selected for editing.
    #[error("no expense is currently selected for editing")]
    NoCurrentSelection,
    /// Occurs when referencing an expense by an id
    /// which does not exist in the list
    #[error("no such expense id: {0}")]
    UnknownExpense(ExpenseId),
    /// Occurs when the highest id in the list is already
    /// the largest representable id.
    #[error("no expense ids left to assign")]
    IdsExhausted
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
