// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON collections kept in a SQLite key-value table.
//!
//! Records written by the browser app load as-is, but fields this crate does
//! not model are dropped on the next save: `totalOwed`, `totalOwing` and
//! `recentExpenses` on groups, `groupName` and `members` on expenses. Nothing
//! is lost for netting, since group names and members are read from the group
//! itself. The migration is one way.

use crate::book::SplitBook;
use crate::models::{Expense, Group, NettingScope};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};

pub const GROUPS_KEY: &str = "splitGroups";
pub const EXPENSES_KEY: &str = "splitExpenses";

/// String key-value storage holding the JSON-encoded collections.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl KeyValueStore for Connection {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let v: Option<String> = self
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
            .with_context(|| format!("Read key '{}'", key))?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )
        .with_context(|| format!("Write key '{}'", key))?;
        Ok(())
    }
}

fn load_list<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt JSON stored under '{}'", key)),
        _ => Ok(Vec::new()),
    }
}

fn save_list<T: Serialize>(store: &impl KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    store.set(key, &serde_json::to_string(items)?)
}

pub fn load_groups(store: &impl KeyValueStore) -> Result<Vec<Group>> {
    load_list(store, GROUPS_KEY)
}

pub fn load_expenses(store: &impl KeyValueStore) -> Result<Vec<Expense>> {
    load_list(store, EXPENSES_KEY)
}

pub fn save_groups(store: &impl KeyValueStore, groups: &[Group]) -> Result<()> {
    save_list(store, GROUPS_KEY, groups)
}

pub fn save_expenses(store: &impl KeyValueStore, expenses: &[Expense]) -> Result<()> {
    save_list(store, EXPENSES_KEY, expenses)
}

pub fn load_book(store: &impl KeyValueStore, scope: NettingScope) -> Result<SplitBook> {
    let groups = load_groups(store)?;
    let expenses = load_expenses(store)?;
    Ok(SplitBook::new(groups, expenses).with_scope(scope))
}

pub fn save_book(store: &impl KeyValueStore, book: &SplitBook) -> Result<()> {
    save_groups(store, book.groups())?;
    save_expenses(store, book.expenses())?;
    Ok(())
}
