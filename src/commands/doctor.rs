// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, Group};
use crate::store::{load_expenses, load_groups};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub issue: &'static str,
    pub detail: String,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows = findings(&load_groups(conn)?, &load_expenses(conn)?);
    if maybe_print_json(sub.get_flag("json"), false, &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        let data = rows
            .into_iter()
            .map(|f| vec![f.issue.to_string(), f.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], data));
    }
    Ok(())
}

pub fn findings(groups: &[Group], expenses: &[Expense]) -> Vec<Finding> {
    let mut rows = Vec::new();

    // 1) Groups: duplicate ids, repeated members, nobody to split with
    let mut ids = HashSet::new();
    for g in groups {
        if !ids.insert(g.id) {
            rows.push(Finding {
                issue: "duplicate_group_id",
                detail: g.id.to_string(),
            });
        }
        let mut seen = HashSet::new();
        for m in &g.members {
            if !seen.insert(m.as_str()) {
                rows.push(Finding {
                    issue: "duplicate_member",
                    detail: format!("{} in '{}'", m, g.name),
                });
            }
        }
        if g.members.len() < 2 {
            rows.push(Finding {
                issue: "group_too_small",
                detail: format!("'{}' has {} member(s)", g.name, g.members.len()),
            });
        }
    }

    // 2) Expenses: stale references, bad amounts, payer and share consistency
    for e in expenses {
        if e.amount <= Decimal::ZERO {
            rows.push(Finding {
                issue: "non_positive_amount",
                detail: format!("expense {} amount {}", e.id, e.amount),
            });
        }
        let Some(g) = groups.iter().find(|g| g.id == e.group_id) else {
            rows.push(Finding {
                issue: "orphaned_expense",
                detail: format!("expense {} -> group {}", e.id, e.group_id),
            });
            continue;
        };
        if !g.has_member(&e.paid_by) {
            rows.push(Finding {
                issue: "unknown_payer",
                detail: format!("expense {} paid by '{}' not in '{}'", e.id, e.paid_by, g.name),
            });
        }
        if !g.members.is_empty() {
            let expected = e.amount / Decimal::from(g.members.len());
            if expected.round_dp(2) != e.split_amount.round_dp(2) {
                rows.push(Finding {
                    issue: "split_mismatch",
                    detail: format!(
                        "expense {} split {} expected {}",
                        e.id,
                        e.split_amount.round_dp(2),
                        expected.round_dp(2)
                    ),
                });
            }
        }
    }
    rows
}
