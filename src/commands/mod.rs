// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balances;
pub mod config;
pub mod doctor;
pub mod exporter;
pub mod groups;
pub mod splits;

use crate::book::SplitBook;
use crate::{store, utils};
use anyhow::Result;
use rusqlite::Connection;

/// Loads the book under the configured netting scope, with change
/// notifications routed to the log.
pub fn open_book(conn: &Connection) -> Result<SplitBook> {
    let scope = utils::get_scope(conn)?;
    let mut book = store::load_book(conn, scope)?;
    book.subscribe(|change, balances| {
        tracing::debug!(event = change.name(), balances = balances.len(), "book changed");
    });
    Ok(book)
}
