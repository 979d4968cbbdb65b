// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_book;
use crate::book::{NewExpense, SplitBook};
use crate::models::Expense;
use crate::store::save_book;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_id, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let group_id = parse_id(sub.get_one::<String>("group").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let paid_by = sub.get_one::<String>("paid_by").unwrap().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };

    let mut book = open_book(conn)?;
    let expense = book
        .record_split(NewExpense {
            group_id,
            description,
            amount,
            paid_by,
            date,
        })?
        .clone();
    save_book(conn, &book)?;
    println!(
        "Recorded '{}' {} paid by {} ({} each)",
        expense.description,
        fmt_money(&expense.amount),
        expense.paid_by,
        fmt_money(&expense.split_amount)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let book = open_book(conn)?;
    let data = query_rows(&book, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                let group = book
                    .group(e.group_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| format!("#{} (missing)", e.group_id));
                vec![
                    e.date.to_string(),
                    group,
                    e.description.clone(),
                    fmt_money(&e.amount),
                    e.paid_by.clone(),
                    fmt_money(&e.split_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Group", "Description", "Amount", "Paid By", "Each"],
                rows
            )
        );
    }
    Ok(())
}

/// Expenses newest first, optionally restricted to one group.
pub fn query_rows(book: &SplitBook, sub: &clap::ArgMatches) -> Result<Vec<Expense>> {
    let group = sub
        .get_one::<String>("group")
        .map(|g| parse_id(g))
        .transpose()?;
    let mut data: Vec<Expense> = book
        .expenses()
        .iter()
        .filter(|e| group.is_none_or(|g| e.group_id == g))
        .cloned()
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    Ok(data)
}
