// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_book;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        Some(("balances", sub)) => export_balances(conn, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> Result<(Format, String)> {
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim().to_string();
    let fmt = match fmt.as_str() {
        "csv" => Format::Csv,
        "json" => Format::Json,
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    };
    Ok((fmt, out))
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let book = open_book(conn)?;
    let group_name = |id: i64| {
        book.group(id)
            .map(|g| g.name.clone())
            .unwrap_or_default()
    };

    match fmt {
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "date",
                "group",
                "description",
                "amount",
                "paid_by",
                "split_amount",
            ])?;
            for e in book.expenses() {
                wtr.write_record([
                    e.date.to_string(),
                    group_name(e.group_id),
                    e.description.clone(),
                    e.amount.normalize().to_string(),
                    e.paid_by.clone(),
                    e.split_amount.normalize().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = book
                .expenses()
                .iter()
                .map(|e| {
                    json!({
                        "date": e.date.to_string(),
                        "group": group_name(e.group_id),
                        "description": e.description,
                        "amount": e.amount.normalize().to_string(),
                        "paidBy": e.paid_by,
                        "splitAmount": e.split_amount.normalize().to_string(),
                    })
                })
                .collect();
            std::fs::write(&out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} expense(s) to {}", book.expenses().len(), out);
    Ok(())
}

fn export_balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let book = open_book(conn)?;
    match fmt {
        Format::Csv => {
            let mut wtr =
                csv::Writer::from_path(&out).with_context(|| format!("Create {}", out))?;
            wtr.write_record(["group", "from", "to", "amount"])?;
            for b in book.balances() {
                wtr.write_record([
                    b.group_name.as_str(),
                    b.from.as_str(),
                    b.to.as_str(),
                    b.amount.normalize().to_string().as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = book
                .balances()
                .iter()
                .map(|b| {
                    json!({
                        "group": b.group_name,
                        "from": b.from,
                        "to": b.to,
                        "amount": b.amount.normalize().to_string(),
                    })
                })
                .collect();
            std::fs::write(&out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} balance(s) to {}", book.balances().len(), out);
    Ok(())
}
