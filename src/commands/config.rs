// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{
    OWNER_SETTING, SCOPE_SETTING, get_owner, get_scope, pretty_table, set_setting,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let owner = get_owner(conn)?;
            let scope = get_scope(conn)?.as_str().to_string();
            match sub.get_one::<String>("key").map(|k| k.trim()) {
                Some(OWNER_SETTING) => println!("{}", owner),
                Some(SCOPE_SETTING) => println!("{}", scope),
                Some(other) => return Err(anyhow!("Unknown setting '{}' (use owner|scope)", other)),
                None => {
                    let rows = vec![
                        vec![OWNER_SETTING.to_string(), owner],
                        vec![SCOPE_SETTING.to_string(), scope],
                    ];
                    println!("{}", pretty_table(&["Key", "Value"], rows));
                }
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {}
    }
    Ok(())
}
