use log::{info, warn};
use thiserror::Error;

use crate::backend::{BackendError, KeyValueStorage, PersistentStore};
use crate::core::{Cost, Expense, ExpenseId, ExpenseRepository, RepositoryError};

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Occurs when adding or editing an expense with a blank name.
    #[error("expense name must not be empty")]
    EmptyName,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Backend(#[from] BackendError)
}

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Keeps an `ExpenseRepository` and its `PersistentStore` in step.
///
/// Each operation changes the repository first and then the store.
/// When the store write fails the repository is restored to its state
/// from before the call, so the two never diverge.
pub struct ExpenseTracker<S: KeyValueStorage> {
    repository: ExpenseRepository,
    store: PersistentStore<S>
}

impl<S: KeyValueStorage> ExpenseTracker<S> {
    pub fn open(store: PersistentStore<S>) -> ExpenseTracker<S> {
        let repository = ExpenseRepository::load(&store);
        info!("loaded {} expenses", repository.all().len());
        ExpenseTracker { repository, store }
    }

    pub fn expenses(&self) -> &[Expense] {
        self.repository.all()
    }

    pub fn total(&self) -> Cost {
        self.repository.total()
    }

    pub fn by_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.repository.by_id(id)
    }

    pub fn current(&self) -> Option<&Expense> {
        self.repository.current()
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    pub fn add_expense(&mut self, name: &str, cost: Cost) -> TrackerResult<Expense> {
        let name = Self::validate_name(name)?;
        let snapshot = self.repository.clone();

        let expense = self.repository.add(name, cost)?.clone();
        let res = self.store.save_all(self.repository.all());
        self.commit_or_rollback(snapshot, res)?;

        info!("added expense {} '{}'", expense.id, expense.name);
        return Ok(expense);
    }

    pub fn begin_edit(&mut self, id: ExpenseId) -> TrackerResult<&Expense> {
        Ok(self.repository.set_current(id)?)
    }

    pub fn cancel_edit(&mut self) {
        self.repository.clear_current();
    }

    /// Applies the new name and cost to the expense selected with `begin_edit`.
    pub fn update_expense(&mut self, name: &str, cost: Cost) -> TrackerResult<Expense> {
        let name = Self::validate_name(name)?;
        let snapshot = self.repository.clone();

        let expense = self.repository.update(name, cost)?.clone();
        let res = self.store.update_one(&expense);
        self.commit_or_rollback(snapshot, res)?;

        info!("updated expense {}", expense.id);
        return Ok(expense);
    }

    /// Removes the expense with `id`; an unknown id changes nothing.
    pub fn delete_expense(&mut self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        let snapshot = self.repository.clone();

        let removed = match self.repository.remove(id) {
            Some(expense) => expense,
            None => return Ok(None)
        };
        let res = self.store.delete_one(id);
        self.commit_or_rollback(snapshot, res)?;

        info!("deleted expense {}", id);
        return Ok(Some(removed));
    }

    pub fn clear_all(&mut self) -> TrackerResult<()> {
        let snapshot = self.repository.clone();

        self.repository.clear_all();
        let res = self.store.clear();
        self.commit_or_rollback(snapshot, res)?;

        info!("cleared all expenses");
        return Ok(());
    }

    fn commit_or_rollback(&mut self, snapshot: ExpenseRepository, res: Result<(), BackendError>) -> TrackerResult<()> {
        if let Err(err) = res {
            warn!("storage write failed, restoring previous state: {}", err);
            self.repository = snapshot;
            return Err(err.into());
        }
        return Ok(());
    }

    fn validate_name(name: &str) -> TrackerResult<&str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        return Ok(trimmed);
    }
}
