// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debt netting over group expenses.
//!
//! Balances are a pure function of the expense history: every call starts from
//! an empty map and replays the expenses in the order given. Each unordered
//! pair of members holds at most one directed record, and a record whose net
//! reaches zero is dropped.

use crate::models::{Balance, Expense, Group, Member, NettingScope, Summary};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, btree_map::Entry};
use tracing::{debug, warn};

/// Unordered pair of members, stored in sorted order so that `(a, b)` and
/// `(b, a)` resolve to the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberPair {
    low: Member,
    high: Member,
}

impl MemberPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            MemberPair {
                low: a.to_string(),
                high: b.to_string(),
            }
        } else {
            MemberPair {
                low: b.to_string(),
                high: a.to_string(),
            }
        }
    }

    pub fn members(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }
}

#[derive(Debug, Clone)]
struct Record {
    from: Member,
    to: Member,
    amount: Decimal,
    group_name: String,
}

// Group id is None when netting across groups.
type Key = (Option<i64>, MemberPair);

/// Net pairwise balances across all groups: one entry per unordered pair.
pub fn compute_balances(groups: &[Group], expenses: &[Expense]) -> Vec<Balance> {
    compute_balances_in(NettingScope::Global, groups, expenses)
}

/// Net pairwise balances under the given scope.
///
/// Expenses whose group cannot be found are skipped. Output is sorted by group
/// id (per-group scope) and then by member pair.
pub fn compute_balances_in(
    scope: NettingScope,
    groups: &[Group],
    expenses: &[Expense],
) -> Vec<Balance> {
    let mut by_id: HashMap<i64, &Group> = HashMap::with_capacity(groups.len());
    for g in groups {
        by_id.entry(g.id).or_insert(g);
    }

    let mut map: BTreeMap<Key, Record> = BTreeMap::new();
    for expense in expenses {
        let Some(group) = by_id.get(&expense.group_id) else {
            debug!(
                expense_id = expense.id,
                group_id = expense.group_id,
                "skipping expense for unknown group"
            );
            continue;
        };
        let payer = expense.paid_by.as_str();
        for member in group.members.iter().filter(|m| m.as_str() != payer) {
            let scope_id = match scope {
                NettingScope::Group => Some(group.id),
                NettingScope::Global => None,
            };
            let key = (scope_id, MemberPair::new(member, payer));
            apply_debt(
                &mut map,
                key,
                member,
                payer,
                expense.split_amount,
                &group.name,
            );
        }
    }

    map.into_values()
        .map(|r| Balance {
            from: r.from,
            to: r.to,
            amount: r.amount,
            group_name: r.group_name,
        })
        .collect()
}

// `debtor` owes `creditor` an additional `delta`.
fn apply_debt(
    map: &mut BTreeMap<Key, Record>,
    key: Key,
    debtor: &str,
    creditor: &str,
    delta: Decimal,
    group_name: &str,
) {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            if !delta.is_zero() {
                slot.insert(Record {
                    from: debtor.to_string(),
                    to: creditor.to_string(),
                    amount: delta,
                    group_name: group_name.to_string(),
                });
            }
        }
        Entry::Occupied(mut slot) => {
            let rec = slot.get_mut();
            if rec.to == creditor {
                rec.amount = rec.amount.checked_add(delta).unwrap_or_else(|| {
                    warn!(from = %rec.from, to = %rec.to, "balance overflow, capped at maximum");
                    Decimal::MAX
                });
                rec.group_name = group_name.to_string();
                return;
            }
            let Some(remaining) = rec.amount.checked_sub(delta) else {
                warn!(from = %rec.from, to = %rec.to, %delta, "balance overflow, share skipped");
                return;
            };
            if remaining > Decimal::ZERO {
                rec.amount = remaining;
                rec.group_name = group_name.to_string();
            } else if remaining.is_zero() {
                slot.remove();
            } else {
                *rec = Record {
                    from: debtor.to_string(),
                    to: creditor.to_string(),
                    amount: -remaining,
                    group_name: group_name.to_string(),
                };
            }
        }
    }
}

/// Totals from the point of view of `owner`. Sums saturate at the
/// `Decimal` limits.
pub fn summarize(balances: &[Balance], owner: &str) -> Summary {
    let mut owed_to_owner = Decimal::ZERO;
    let mut owner_owes = Decimal::ZERO;
    for b in balances {
        if b.to == owner {
            owed_to_owner = owed_to_owner.saturating_add(b.amount);
        }
        if b.from == owner {
            owner_owes = owner_owes.saturating_add(b.amount);
        }
    }
    Summary {
        owed_to_owner,
        owner_owes,
        net: owed_to_owner.saturating_sub(owner_owes),
        active_groups: None,
    }
}
