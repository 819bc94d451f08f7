use expense_tracker::{ExpenseTracker, Expense, ExpenseId, Cost,
    backend::KeyValueStorage,
    config::TrackerConfig};

use std::path::PathBuf;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(version, about, propagate_version = true)]
struct Cli {
    /// Path to a TOML config file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Path to the expense store file, overriding the config
    #[clap(short, long, value_parser)]
    store: Option<PathBuf>,

    /// Action to perform
    #[clap(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// List all expenses
    List,
    /// Show the total of all expenses
    Total,
    /// Add a new expense
    Add(AddExpense),
    /// Change the name or cost of an expense
    Edit(EditExpense),
    /// Delete one expense
    Delete(DeleteExpense),
    /// Delete all expenses
    Clear
}

#[derive(Args, Debug)]
struct AddExpense {
    /// What the money was spent on
    #[clap(value_parser)]
    name: String,

    #[clap(value_parser, allow_hyphen_values = true)]
    cost: Cost
}

#[derive(Args, Debug)]
struct EditExpense {
    /// Id of the expense to edit
    #[clap(value_parser)]
    id: ExpenseId,

    /// New name, keeps the current one when omitted
    #[clap(short, long, value_parser)]
    name: Option<String>,

    /// New cost, keeps the current one when omitted
    #[clap(short, long, value_parser, allow_hyphen_values = true)]
    cost: Option<Cost>
}

impl EditExpense {
    fn apply<S: KeyValueStorage>(&self, tracker: &mut ExpenseTracker<S>) -> anyhow::Result<Expense> {
        let current = tracker.begin_edit(self.id)?.clone();
        let name = self.name.as_deref().unwrap_or(&current.name);
        let cost = self.cost.unwrap_or(current.cost);

        let result = tracker.update_expense(name, cost);
        if result.is_err() {
            tracker.cancel_edit();
        }
        return Ok(result?);
    }
}

#[derive(Args, Debug)]
struct DeleteExpense {
    /// Id of the expense to delete
    #[clap(value_parser)]
    id: ExpenseId
}

fn print_expenses(expenses: &[Expense]) {
    if expenses.is_empty() {
        println!("{}", "No expenses present. Add an expense".italic());
        return;
    }
    for expense in expenses {
        println!("{}", expense);
    }
}

fn print_total(total: Cost) {
    let fmt_total = if total > 0 {
        total.to_string().bright_red()
    } else {
        total.to_string().normal()
    };
    println!("{}: {}", "Total".bold(), fmt_total);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => TrackerConfig::read(path)?,
        None => TrackerConfig::default()
    };
    if let Some(store) = args.store {
        config.storage.path = store;
    }

    let mut tracker = ExpenseTracker::open(config.storage.open_store()?);

    match args.action {
        Subcommands::List => {
            print_expenses(tracker.expenses());
        },
        Subcommands::Total => {
            print_total(tracker.total());
        },
        Subcommands::Add(add) => {
            let expense = tracker.add_expense(&add.name, add.cost)
                .context("failed to add expense")?;
            println!("{} {}", "Expense added:".green(), expense);
        },
        Subcommands::Edit(edit) => {
            let expense = edit.apply(&mut tracker)
                .with_context(|| format!("failed to edit expense {}", edit.id))?;
            println!("{} {}", "Expense updated:".green(), expense);
        },
        Subcommands::Delete(delete) => {
            match tracker.delete_expense(delete.id)? {
                Some(expense) => println!("{} {}", "Expense deleted:".green(), expense),
                None => println!("No expense with id {}", delete.id)
            }
        },
        Subcommands::Clear => {
            tracker.clear_all()?;
            println!("{}", "All expenses cleared".green());
        }
    }

    Ok(())
}
