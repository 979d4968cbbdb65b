// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Display name of a group participant. Unique within its group.
pub type Member = String;

/// Name under which the ledger owner appears in every group.
pub const OWNER: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub members: Vec<Member>, // members[0] is the owner
}

impl Group {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    #[serde(deserialize_with = "group_ref")]
    pub group_id: i64,
    pub description: String,
    pub amount: Decimal,
    pub paid_by: Member,
    pub split_amount: Decimal,
    pub date: NaiveDate,
}

/// `from` owes `to` exactly `amount` within the context of `group_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub from: Member,
    pub to: Member,
    pub amount: Decimal,
    pub group_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub owed_to_owner: Decimal,
    pub owner_owes: Decimal,
    pub net: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_groups: Option<usize>,
}

/// Whether pair balances are kept apart per group or netted across groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NettingScope {
    Group,
    #[default]
    Global,
}

impl NettingScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            NettingScope::Group => "group",
            NettingScope::Global => "global",
        }
    }
}

impl std::str::FromStr for NettingScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "group" => Ok(NettingScope::Group),
            "global" => Ok(NettingScope::Global),
            other => Err(anyhow::anyhow!(
                "Invalid netting scope '{}', expected group|global",
                other
            )),
        }
    }
}

// Stored expenses may reference their group as a number or as a numeric string.
fn group_ref<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ref {
        Num(i64),
        Text(String),
    }

    match Ref::deserialize(d)? {
        Ref::Num(n) => Ok(n),
        Ref::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("Invalid group id '{}'", s))),
    }
}
