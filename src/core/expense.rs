use std::fmt;

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use colored::Colorize;
use serde::{Serialize, Deserialize};

pub type ExpenseId = u64;
pub type Cost = i64;

/// A single recorded cost entry.
///
/// The serialised field names follow the stored layout
/// (`id`, `name`, `cost`, `timestamp`); the older
/// `expenseName`/`expenseCost`/`expenseDate` names are
/// accepted when reading.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    #[serde(alias = "expenseName")]
    pub name: String,
    #[serde(alias = "expenseCost")]
    pub cost: Cost,
    #[serde(alias = "expenseDate")]
    pub timestamp: String,
}

impl Expense {
    pub fn new(id: ExpenseId, name: &str, cost: Cost, timestamp: &str) -> Expense {
        Expense {
            id,
            name: name.to_owned(),
            cost,
            timestamp: timestamp.to_owned()
        }
    }

    /// Creates an expense stamped with the current local time.
    pub fn now(id: ExpenseId, name: &str, cost: Cost) -> Expense {
        Expense::new(id, name, cost, &current_timestamp())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {} ({})", self.id, self.name.bold(), self.cost, self.timestamp)
    }
}

pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
    format!("Date: {}/{}/{}, Time: {}:{}",
        time.day(), time.month(), time.year(), time.hour(), time.minute())
}

pub fn current_timestamp() -> String {
    format_timestamp(&Local::now())
}
