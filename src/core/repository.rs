use crate::backend::{KeyValueStorage, PersistentStore};
use crate::core::expense::{Expense, ExpenseId, Cost, current_timestamp};
use crate::core::error::{RepositoryError, RepositoryResult};

/// In-memory list of expenses, kept in insertion order,
/// together with the expense currently being edited.
#[derive(Clone, Debug, Default)]
pub struct ExpenseRepository {
    expenses: Vec<Expense>,
    current: Option<ExpenseId>
}

impl ExpenseRepository {
    pub fn new() -> ExpenseRepository {
        ExpenseRepository::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> ExpenseRepository {
        ExpenseRepository { expenses, current: None }
    }

    pub fn load<S: KeyValueStorage>(store: &PersistentStore<S>) -> ExpenseRepository {
        ExpenseRepository::from_expenses(store.load())
    }

    pub fn add(&mut self, name: &str, cost: Cost) -> RepositoryResult<&Expense> {
        let expense = Expense::now(self.next_id()?, name, cost);
        self.expenses.push(expense);
        return Ok(&self.expenses[self.expenses.len() - 1]);
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    /// Sum of all costs, saturating at the bounds of `Cost`.
    pub fn total(&self) -> Cost {
        return self.expenses.iter()
            .fold(0, |total: Cost, expense| total.saturating_add(expense.cost));
    }

    pub fn by_id(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Selects the expense with the given id for editing.
    /// An unknown id leaves the previous selection in place.
    pub fn set_current(&mut self, id: ExpenseId) -> RepositoryResult<&Expense> {
        let position = self.position(id)
            .ok_or(RepositoryError::UnknownExpense(id))?;
        self.current = Some(id);
        return Ok(&self.expenses[position]);
    }

    pub fn current(&self) -> Option<&Expense> {
        self.current.and_then(|id| self.by_id(id))
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Applies `name` and `cost` to the selected expense, refreshes its
    /// timestamp and ends the edit.
    pub fn update(&mut self, name: &str, cost: Cost) -> RepositoryResult<&Expense> {
        let id = self.current.ok_or(RepositoryError::NoCurrentSelection)?;
        let position = self.position(id)
            .ok_or(RepositoryError::UnknownExpense(id))?;

        let expense = &mut self.expenses[position];
        expense.name = name.to_owned();
        expense.cost = cost;
        expense.timestamp = current_timestamp();

        self.current = None;
        return Ok(&self.expenses[position]);
    }

    pub fn remove(&mut self, id: ExpenseId) -> Option<Expense> {
        let position = self.position(id)?;
        if self.current == Some(id) {
            self.current = None;
        }
        return Some(self.expenses.remove(position));
    }

    pub fn clear_all(&mut self) {
        self.expenses.clear();
        self.current = None;
    }

    pub fn is_editing(&self) -> bool {
        self.current.is_some()
    }

    fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|expense| expense.id == id)
    }

    fn next_id(&self) -> RepositoryResult<ExpenseId> {
        match self.expenses.iter().map(|expense| expense.id).max() {
            Some(max) => max.checked_add(1).ok_or(RepositoryError::IdsExhausted),
            None => Ok(0)
        }
    }
}
