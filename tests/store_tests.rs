// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use splitwallet::book::{NewExpense, SplitBook};
use splitwallet::models::NettingScope;
use splitwallet::store::{self, EXPENSES_KEY, GROUPS_KEY, KeyValueStore};
use splitwallet::{db, utils};
use tempfile::tempdir;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

#[test]
fn missing_keys_load_as_empty() {
    let conn = setup();
    assert!(store::load_groups(&conn).unwrap().is_empty());
    assert!(store::load_expenses(&conn).unwrap().is_empty());
}

#[test]
fn book_round_trips_through_sqlite() {
    let conn = setup();
    let mut book = SplitBook::new(Vec::new(), Vec::new());
    book.create_group("Trip", &["Alice", "Bob"]).unwrap();
    book.record_split(NewExpense {
        group_id: 1,
        description: "Taxi".to_string(),
        amount: Decimal::new(1000, 2),
        paid_by: "Alice".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
    })
    .unwrap();
    store::save_book(&conn, &book).unwrap();

    let loaded = store::load_book(&conn, NettingScope::Group).unwrap();
    assert_eq!(loaded.groups(), book.groups());
    assert_eq!(loaded.expenses(), book.expenses());
    assert_eq!(loaded.balances(), book.balances());

    let raw = conn.get(EXPENSES_KEY).unwrap().unwrap();
    assert!(raw.contains("\"groupId\":1"));
    assert!(raw.contains("\"paidBy\":\"Alice\""));
}

#[test]
fn legacy_browser_records_load() {
    let conn = setup();
    conn.set(
        GROUPS_KEY,
        r#"[{"id":1741000000000,"name":"Trip","members":["You","Alice","Bob"],"totalOwed":60,"totalOwing":0,"recentExpenses":[]}]"#,
    )
    .unwrap();
    conn.set(
        EXPENSES_KEY,
        r#"[{"id":1741000000001,"groupId":"1741000000000","groupName":"Trip","description":"Dinner","amount":90,"paidBy":"You","splitAmount":30,"date":"2025-03-01","members":["You","Alice","Bob"]}]"#,
    )
    .unwrap();

    let book = store::load_book(&conn, NettingScope::Group).unwrap();
    assert_eq!(book.expenses()[0].group_id, 1_741_000_000_000);
    assert_eq!(book.expenses()[0].split_amount, Decimal::from(30));
    let balances = book.balances();
    assert_eq!(balances.len(), 2);
    assert!(balances.iter().all(|b| b.to == "You" && b.amount == Decimal::from(30)));
}

#[test]
fn resaving_legacy_records_drops_unmodelled_fields() {
    let conn = setup();
    conn.set(
        GROUPS_KEY,
        r#"[{"id":7,"name":"Trip","members":["You","Alice"],"totalOwed":10,"totalOwing":0,"recentExpenses":[]}]"#,
    )
    .unwrap();
    conn.set(
        EXPENSES_KEY,
        r#"[{"id":8,"groupId":"7","groupName":"Trip","description":"Taxi","amount":20,"paidBy":"You","splitAmount":10,"date":"2025-03-01","members":["You","Alice"]}]"#,
    )
    .unwrap();
    let before = store::load_book(&conn, NettingScope::Global).unwrap();
    store::save_book(&conn, &before).unwrap();

    let groups = conn.get(GROUPS_KEY).unwrap().unwrap();
    let expenses = conn.get(EXPENSES_KEY).unwrap().unwrap();
    assert!(!groups.contains("totalOwed"));
    assert!(!groups.contains("recentExpenses"));
    assert!(!expenses.contains("groupName"));
    assert!(!expenses.contains("\"members\""));

    let after = store::load_book(&conn, NettingScope::Global).unwrap();
    assert_eq!(after.groups(), before.groups());
    assert_eq!(after.balances(), before.balances());
    assert_eq!(after.balances()[0].group_name, "Trip");
}

#[test]
fn corrupt_json_names_the_key() {
    let conn = setup();
    conn.set(GROUPS_KEY, "{not json").unwrap();
    let err = store::load_groups(&conn).unwrap_err();
    assert!(err.to_string().contains(GROUPS_KEY));
}

#[test]
fn set_overwrites_previous_value() {
    let conn = setup();
    conn.set("k", "one").unwrap();
    conn.set("k", "two").unwrap();
    assert_eq!(conn.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn settings_default_and_validate() {
    let conn = setup();
    assert_eq!(utils::get_owner(&conn).unwrap(), "You");
    assert_eq!(utils::get_scope(&conn).unwrap(), NettingScope::Global);

    utils::set_setting(&conn, "scope", " Group ").unwrap();
    assert_eq!(utils::get_scope(&conn).unwrap(), NettingScope::Group);
    assert!(utils::set_setting(&conn, "scope", "galaxy").is_err());
    assert!(utils::set_setting(&conn, "owner", "  ").is_err());
    assert!(utils::set_setting(&conn, "currency", "USD").is_err());
}

#[test]
fn open_at_creates_schema_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("splitwallet.sqlite");
    {
        let conn = db::open_at(&path).unwrap();
        conn.set(GROUPS_KEY, "[]").unwrap();
    }
    let conn = db::open_at(&path).unwrap();
    assert_eq!(conn.get(GROUPS_KEY).unwrap().as_deref(), Some("[]"));
}
