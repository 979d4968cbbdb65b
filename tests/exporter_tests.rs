// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use splitwallet::book::{NewExpense, SplitBook};
use splitwallet::commands::exporter;
use splitwallet::{cli, db, store};
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut book = SplitBook::new(Vec::new(), Vec::new());
    book.create_group("Trip", &["Alice", "Bob"]).unwrap();
    book.record_split(NewExpense {
        group_id: 1,
        description: "Dinner".to_string(),
        amount: Decimal::from(90),
        paid_by: "You".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
    })
    .unwrap();
    store::save_book(&conn, &book).unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["splitwallet", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_expenses_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["expenses", "--format", "json", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "group": "Trip",
                "description": "Dinner",
                "amount": "90",
                "paidBy": "You",
                "splitAmount": "30"
            }
        ])
    );
}

#[test]
fn export_balances_csv() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("balances.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["balances", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec!["group,from,to,amount", "Trip,Alice,You,30", "Trip,Bob,You,30"]
    );
}

#[test]
fn export_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&conn, &["expenses", "--format", "xml", "--out", &out_str]).is_err());
    assert!(!out_path.exists());
}
