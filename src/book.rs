// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner of the group and expense collections.
//!
//! Every mutation recomputes the balances from scratch and then tells each
//! subscriber what changed, handing it the fresh balance list.

use crate::error::SplitError;
use crate::ledger::{compute_balances_in, summarize};
use crate::models::{Balance, Expense, Group, Member, NettingScope, OWNER, Summary};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    GroupsUpdated,
    ExpensesUpdated,
}

impl Change {
    pub fn name(&self) -> &'static str {
        match self {
            Change::GroupsUpdated => "groupsUpdated",
            Change::ExpensesUpdated => "expensesUpdated",
        }
    }
}

/// Largest amount a single split may carry; keeps running balances far from
/// the `Decimal` range limit.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x38D7E, 0, false, 0); // 1e15

pub type Subscriber = Box<dyn FnMut(Change, &[Balance])>;

/// A split as entered by the user, before the per-member share is computed.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub group_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub paid_by: Member,
    pub date: NaiveDate,
}

pub struct SplitBook {
    groups: Vec<Group>,
    expenses: Vec<Expense>,
    scope: NettingScope,
    balances: Vec<Balance>,
    subscribers: Vec<Subscriber>,
}

impl SplitBook {
    pub fn new(groups: Vec<Group>, expenses: Vec<Expense>) -> Self {
        let mut book = SplitBook {
            groups,
            expenses,
            scope: NettingScope::default(),
            balances: Vec::new(),
            subscribers: Vec::new(),
        };
        book.recompute();
        book
    }

    pub fn with_scope(mut self, scope: NettingScope) -> Self {
        self.scope = scope;
        self.recompute();
        self
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(Change, &[Balance]) + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expenses_for(&self, group_id: i64) -> impl Iterator<Item = &Expense> {
        self.expenses.iter().filter(move |e| e.group_id == group_id)
    }

    pub fn scope(&self) -> NettingScope {
        self.scope
    }

    pub fn balances(&self) -> &[Balance] {
        &self.balances
    }

    /// Owner totals plus the number of groups on the book.
    pub fn summary(&self, owner: &str) -> Summary {
        let mut s = summarize(&self.balances, owner);
        s.active_groups = Some(self.groups.len());
        s
    }

    /// Creates a group of the owner plus `others`. Blank member entries are
    /// dropped; names are trimmed.
    pub fn create_group<S: AsRef<str>>(
        &mut self,
        name: &str,
        others: &[S],
    ) -> Result<&Group, SplitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SplitError::BlankGroupName);
        }
        let others: Vec<Member> = others
            .iter()
            .map(|m| m.as_ref().trim())
            .filter(|m| !m.is_empty())
            .map(|m| m.to_string())
            .collect();
        if others.is_empty() {
            return Err(SplitError::NoOtherMembers(name.to_string()));
        }

        let mut members = Vec::with_capacity(others.len() + 1);
        members.push(OWNER.to_string());
        members.extend(others);
        let mut seen = HashSet::new();
        for m in &members {
            if !seen.insert(m.as_str()) {
                return Err(SplitError::DuplicateMember {
                    group: name.to_string(),
                    member: m.clone(),
                });
            }
        }

        let group = Group {
            id: next_id(self.groups.iter().map(|g| g.id)),
            name: name.to_string(),
            members,
        };
        info!(group_id = group.id, name = %group.name, members = group.members.len(), "created group");
        self.groups.push(group);
        let idx = self.groups.len() - 1;
        self.commit(&[Change::GroupsUpdated]);
        Ok(&self.groups[idx])
    }

    /// Records an even split of `new.amount` across the group's members.
    pub fn record_split(&mut self, new: NewExpense) -> Result<&Expense, SplitError> {
        let group = self
            .group(new.group_id)
            .ok_or(SplitError::UnknownGroup(new.group_id))?;
        let description = new.description.trim();
        if description.is_empty() {
            return Err(SplitError::BlankDescription);
        }
        if new.amount <= Decimal::ZERO {
            return Err(SplitError::NonPositiveAmount(new.amount));
        }
        if new.amount > MAX_AMOUNT {
            return Err(SplitError::AmountTooLarge(new.amount, MAX_AMOUNT));
        }
        let payer = new.paid_by.trim();
        if !group.has_member(payer) {
            return Err(SplitError::UnknownPayer {
                group: group.name.clone(),
                payer: payer.to_string(),
            });
        }

        let split_amount = new.amount / Decimal::from(group.members.len());
        let expense = Expense {
            id: next_id(self.expenses.iter().map(|e| e.id)),
            group_id: group.id,
            description: description.to_string(),
            amount: new.amount,
            paid_by: payer.to_string(),
            split_amount,
            date: new.date,
        };
        info!(
            expense_id = expense.id,
            group_id = expense.group_id,
            amount = %expense.amount,
            paid_by = %expense.paid_by,
            "recorded split"
        );
        self.expenses.push(expense);
        let idx = self.expenses.len() - 1;
        self.commit(&[Change::GroupsUpdated, Change::ExpensesUpdated]);
        Ok(&self.expenses[idx])
    }

    /// Removes a group together with every expense recorded against it.
    pub fn delete_group(&mut self, id: i64) -> Result<Group, SplitError> {
        let pos = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(SplitError::UnknownGroup(id))?;
        let group = self.groups.remove(pos);
        let before = self.expenses.len();
        self.expenses.retain(|e| e.group_id != id);
        info!(
            group_id = id,
            expenses_removed = before - self.expenses.len(),
            "deleted group"
        );
        self.commit(&[Change::GroupsUpdated, Change::ExpensesUpdated]);
        Ok(group)
    }

    fn recompute(&mut self) {
        self.balances = compute_balances_in(self.scope, &self.groups, &self.expenses);
        debug!(balances = self.balances.len(), scope = self.scope.as_str(), "recomputed balances");
    }

    fn commit(&mut self, changes: &[Change]) {
        self.recompute();
        for &change in changes {
            for sub in self.subscribers.iter_mut() {
                sub(change, &self.balances);
            }
        }
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |m| m + 1)
}
