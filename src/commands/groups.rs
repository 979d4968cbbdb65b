// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::open_book;
use crate::store::save_book;
use crate::utils::{maybe_print_json, parse_id, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn create(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let members: Vec<&String> = sub
        .get_many::<String>("member")
        .map(|v| v.collect())
        .unwrap_or_default();

    let mut book = open_book(conn)?;
    let group = book.create_group(name, &members)?.clone();
    save_book(conn, &book)?;
    println!(
        "Created group {} '{}' with {}",
        group.id,
        group.name,
        group.members.join(", ")
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let book = open_book(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &book.groups())? {
        let rows: Vec<Vec<String>> = book
            .groups()
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    g.members.join(", "),
                    book.expenses_for(g.id).count().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Members", "Expenses"], rows)
        );
    }
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(sub.get_one::<String>("id").unwrap())?;
    let mut book = open_book(conn)?;
    let before = book.expenses().len();
    let group = book.delete_group(id)?;
    save_book(conn, &book)?;
    println!(
        "Removed group '{}' and {} expense(s)",
        group.name,
        before - book.expenses().len()
    );
    Ok(())
}
