use log::{debug, warn};

use crate::backend::interface::{KeyValueStorage, Result};
use crate::core::{Expense, ExpenseId};

pub const DEFAULT_KEY: &str = "expenses";

/// Mirror of the expense list kept as one JSON array under a single key.
///
/// Every mutating call is a full read-modify-write of that blob.
#[derive(Debug)]
pub struct PersistentStore<S: KeyValueStorage> {
    storage: S,
    key: String
}

impl<S: KeyValueStorage> PersistentStore<S> {
    pub fn new(storage: S) -> PersistentStore<S> {
        PersistentStore::with_key(storage, DEFAULT_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> PersistentStore<S> {
        PersistentStore { storage, key: key.to_owned() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Returns the stored list. Absent or malformed data reads as empty.
    pub fn load(&self) -> Vec<Expense> {
        let Some(blob) = self.storage.get_item(&self.key) else {
            return Vec::new();
        };

        match serde_json::from_str(&blob) {
            Ok(expenses) => expenses,
            Err(err) => {
                warn!("discarding malformed expense list under '{}': {}", self.key, err);
                Vec::new()
            }
        }
    }

    pub fn save_all(&mut self, expenses: &[Expense]) -> Result<()> {
        let blob = serde_json::to_string(expenses)?;
        debug!("saving {} expenses under '{}'", expenses.len(), self.key);
        self.storage.set_item(&self.key, &blob)
    }

    pub fn store_one(&mut self, expense: &Expense) -> Result<()> {
        let mut expenses = self.load();
        expenses.push(expense.clone());
        self.save_all(&expenses)
    }

    pub fn clear(&mut self) -> Result<()> {
        debug!("clearing '{}'", self.key);
        self.storage.remove_item(&self.key)
    }

    pub fn update_one(&mut self, updated: &Expense) -> Result<()> {
        let mut expenses = self.load();
        match expenses.iter_mut().find(|expense| expense.id == updated.id) {
            Some(expense) => *expense = updated.clone(),
            None => return Ok(())
        }
        self.save_all(&expenses)
    }

    pub fn delete_one(&mut self, id: ExpenseId) -> Result<()> {
        let mut expenses = self.load();
        let count = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == count {
            return Ok(());
        }
        self.save_all(&expenses)
    }
}


#[cfg(test)]
mod tests {
    use crate::backend::{KeyValueStorage, MemoryStorage, PersistentStore};
    use crate::core::Expense;

    use rstest::{fixture, rstest};
    use serde_json::json;

    type Store = PersistentStore<MemoryStorage>;

    #[fixture]
    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new(0, "Coffee", 5, "Date: 1/2/2024, Time: 8:30"),
            Expense::new(1, "Book", 20, "Date: 1/2/2024, Time: 9:0")
        ]
    }

    #[fixture]
    fn store(expenses: Vec<Expense>) -> Store {
        let mut store = PersistentStore::new(MemoryStorage::new());
        store.save_all(&expenses).unwrap();
        return store;
    }

    fn raw(store: &Store) -> Option<String> {
        store.storage().get_item(store.key())
    }

    #[test]
    fn absent_entry_loads_empty() {
        let store = PersistentStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_entry_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item("expenses", "{not json").unwrap();
        let store = PersistentStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[rstest]
    fn blob_layout(store: Store) {
        let value: serde_json::Value = serde_json::from_str(&raw(&store).unwrap()).unwrap();
        assert_eq!(value, json!([
            {"id": 0, "name": "Coffee", "cost": 5, "timestamp": "Date: 1/2/2024, Time: 8:30"},
            {"id": 1, "name": "Book", "cost": 20, "timestamp": "Date: 1/2/2024, Time: 9:0"}
        ]));
    }

    #[rstest]
    fn save_loaded_is_idempotent(mut store: Store) {
        let before = raw(&store);
        let loaded = store.load();
        store.save_all(&loaded).unwrap();
        assert_eq!(raw(&store), before);
    }

    #[rstest]
    fn save_all_replaces(mut store: Store) {
        store.save_all(&[Expense::new(3, "Rent", 500, "")]).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }

    #[rstest]
    fn store_one_appends(mut store: Store, expenses: Vec<Expense>) {
        let extra = Expense::new(2, "Lunch", 12, "");
        store.store_one(&extra).unwrap();
        let mut expected = expenses;
        expected.push(extra);
        assert_eq!(store.load(), expected);
    }

    #[rstest]
    fn update_one_replaces_match(mut store: Store) {
        store.update_one(&Expense::new(0, "Tea", 3, "later")).unwrap();
        let loaded = store.load();
        assert_eq!(loaded[0], Expense::new(0, "Tea", 3, "later"));
        assert_eq!(loaded[1].name, "Book");
    }

    #[rstest]
    fn update_one_unknown_is_noop(mut store: Store) {
        let before = raw(&store);
        store.update_one(&Expense::new(9, "Ghost", 1, "")).unwrap();
        assert_eq!(raw(&store), before);
    }

    #[test]
    fn update_one_without_entry_writes_nothing() {
        let mut store = PersistentStore::new(MemoryStorage::new());
        store.update_one(&Expense::new(0, "Tea", 3, "")).unwrap();
        assert!(store.storage().is_empty());
    }

    #[rstest]
    fn delete_one(mut store: Store) {
        store.delete_one(0).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);

        store.delete_one(0).unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[rstest]
    fn clear_removes_entry(mut store: Store) {
        store.clear().unwrap();
        assert!(raw(&store).is_none());
        assert!(store.load().is_empty());
    }

    #[test]
    fn custom_key() {
        let mut store = PersistentStore::with_key(MemoryStorage::new(), "household");
        store.store_one(&Expense::new(0, "Milk", 2, "")).unwrap();
        assert!(store.storage().get_item("expenses").is_none());
        assert!(store.storage().get_item("household").is_some());
    }
}
