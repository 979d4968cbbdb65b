// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use splitwallet::ledger::{MemberPair, compute_balances};
use splitwallet::models::{Expense, Group};
use std::collections::{HashMap, HashSet};

const MEMBERS: [&str; 5] = ["You", "Alice", "Bob", "Carol", "Dan"];

fn group(size: usize) -> Group {
    Group {
        id: 1,
        name: "Trip".to_string(),
        members: MEMBERS[..size].iter().map(|m| m.to_string()).collect(),
    }
}

// Shares are whole cents so every split is exact.
fn expenses(size: usize, raw: &[(usize, i64)]) -> Vec<Expense> {
    raw.iter()
        .enumerate()
        .map(|(i, (payer, cents))| {
            let split = Decimal::new(*cents, 2);
            Expense {
                id: i as i64 + 1,
                group_id: 1,
                description: format!("e{}", i),
                amount: split * Decimal::from(size),
                paid_by: MEMBERS[payer % size].to_string(),
                split_amount: split,
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            }
        })
        .collect()
}

fn raw_expenses() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((0usize..5, 1i64..100_000), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: any permutation of the same expenses nets to the same balances.
    #[test]
    fn order_does_not_change_final_balances(
        size in 2usize..=5,
        (raw, shuffled) in raw_expenses().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
    ) {
        let g = vec![group(size)];
        let a = compute_balances(&g, &expenses(size, &raw));
        let b = compute_balances(&g, &expenses(size, &shuffled));
        prop_assert_eq!(a, b);
    }

    /// Property: at most one positive balance per unordered pair.
    #[test]
    fn one_positive_balance_per_pair(size in 2usize..=5, raw in raw_expenses()) {
        let out = compute_balances(&[group(size)], &expenses(size, &raw));
        let mut pairs = HashSet::new();
        for b in &out {
            prop_assert!(b.amount > Decimal::ZERO);
            prop_assert_ne!(&b.from, &b.to);
            prop_assert!(pairs.insert(MemberPair::new(&b.from, &b.to)));
        }
    }

    /// Property: the pair guarantee also holds when groups share members.
    #[test]
    fn one_positive_balance_per_pair_across_groups(
        raw in raw_expenses(),
        in_second in prop::collection::vec(any::<bool>(), 20),
    ) {
        let mut flat = group(5);
        flat.id = 2;
        flat.name = "Flat".to_string();
        let groups = vec![group(5), flat];
        let exps: Vec<Expense> = expenses(5, &raw)
            .into_iter()
            .zip(in_second)
            .map(|(mut e, second)| {
                if second {
                    e.group_id = 2;
                }
                e
            })
            .collect();

        let out = compute_balances(&groups, &exps);
        let mut pairs = HashSet::new();
        for b in &out {
            prop_assert!(b.amount > Decimal::ZERO);
            prop_assert!(pairs.insert(MemberPair::new(&b.from, &b.to)));
        }
    }

    /// Property: each member's net position equals what they paid for others
    /// minus their shares of what others paid.
    #[test]
    fn net_positions_match_expense_history(size in 2usize..=5, raw in raw_expenses()) {
        let g = group(size);
        let exps = expenses(size, &raw);
        let out = compute_balances(std::slice::from_ref(&g), &exps);

        let mut from_balances: HashMap<&str, Decimal> = HashMap::new();
        for b in &out {
            *from_balances.entry(b.to.as_str()).or_default() += b.amount;
            *from_balances.entry(b.from.as_str()).or_default() -= b.amount;
        }

        for m in &g.members {
            let mut expected = Decimal::ZERO;
            for e in &exps {
                if &e.paid_by == m {
                    expected += e.amount - e.split_amount;
                } else {
                    expected -= e.split_amount;
                }
            }
            let actual = from_balances.get(m.as_str()).copied().unwrap_or_default();
            prop_assert_eq!(actual, expected);
        }

        let total: Decimal = from_balances.values().copied().sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }
}
