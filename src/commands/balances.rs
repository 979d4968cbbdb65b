// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_book;
use crate::ledger::compute_balances_in;
use crate::models::{Balance, OWNER, Summary};
use crate::utils::{fmt_money, get_owner, maybe_print_json, parse_id, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_balances(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|b| {
                vec![
                    b.group_name.clone(),
                    b.from.clone(),
                    b.to.clone(),
                    fmt_money(&b.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Group", "From", "To", "Amount"], rows));
    }
    Ok(())
}

/// Current balances, optionally restricted to the expenses of one group.
pub fn query_balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Balance>> {
    let book = open_book(conn)?;
    match sub.get_one::<String>("group") {
        Some(raw) => {
            let id = parse_id(raw)?;
            let group = book
                .group(id)
                .ok_or_else(|| anyhow!("Group {} not found", id))?;
            Ok(compute_balances_in(
                book.scope(),
                std::slice::from_ref(group),
                book.expenses(),
            ))
        }
        None => Ok(book.balances().to_vec()),
    }
}

pub fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = match sub.get_one::<String>("owner") {
        Some(o) => o.trim().to_string(),
        None => get_owner(conn)?,
    };
    let book = open_book(conn)?;
    let s = book.summary(&owner);
    if !maybe_print_json(sub.get_flag("json"), false, &s)? {
        let rows = summary_rows(&owner, &s);
        println!("{}", pretty_table(&[owner.as_str(), ""], rows));
    }
    Ok(())
}

/// Label/value rows for the summary table, worded for `owner`.
pub fn summary_rows(owner: &str, s: &Summary) -> Vec<Vec<String>> {
    let (owed, owes) = if owner == OWNER {
        ("Owed to you".to_string(), "You owe".to_string())
    } else {
        (format!("Owed to {}", owner), format!("{} owes", owner))
    };
    vec![
        vec![owed, fmt_money(&s.owed_to_owner)],
        vec![owes, fmt_money(&s.owner_owes)],
        vec!["Net".to_string(), fmt_money(&s.net)],
        vec![
            "Active groups".to_string(),
            s.active_groups.unwrap_or_default().to_string(),
        ],
    ]
}
