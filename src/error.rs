// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised when a mutation of the split book is not well formed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("Group name must not be blank")]
    BlankGroupName,
    #[error("Group '{0}' needs at least one member besides the owner")]
    NoOtherMembers(String),
    #[error("Member '{member}' appears more than once in group '{group}'")]
    DuplicateMember { group: String, member: String },
    #[error("Group {0} not found")]
    UnknownGroup(i64),
    #[error("Expense description must not be blank")]
    BlankDescription,
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Expense amount {0} exceeds the limit of {1}")]
    AmountTooLarge(Decimal, Decimal),
    #[error("'{payer}' is not a member of group '{group}'")]
    UnknownPayer { group: String, payer: String },
}
