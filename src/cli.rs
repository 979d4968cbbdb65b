// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn group_filter(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("group")
            .long("group")
            .help("Only show this group id"),
    )
}

pub fn build_cli() -> Command {
    Command::new("splitwallet")
        .version(crate_version!())
        .about("Split group expenses and track who owes whom")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("group")
                .about("Manage split groups")
                .subcommand(
                    Command::new("create")
                        .about("Create a group; you are added as the first member")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("member")
                                .long("member")
                                .required(true)
                                .action(ArgAction::Append)
                                .help("Other member (repeatable)"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List groups")))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a group and its expenses")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("split")
                .about("Record and list split expenses")
                .subcommand(
                    Command::new("add")
                        .about("Split an expense evenly across a group")
                        .arg(Arg::new("group").long("group").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("paid_by")
                                .long("paid-by")
                                .default_value("You")
                                .help("Member who paid"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        ),
                )
                .subcommand(json_flags(group_filter(
                    Command::new("list").about("List recorded expenses"),
                ))),
        )
        .subcommand(json_flags(group_filter(
            Command::new("balances").about("Show net pairwise balances"),
        )))
        .subcommand(
            Command::new("summary")
                .about("Totals owed to and by the owner")
                .arg(
                    Arg::new("owner")
                        .long("owner")
                        .help("Member to summarize for (defaults to the owner setting)"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("export")
                .about("Write expenses or balances to a file")
                .subcommand(export_target("expenses"))
                .subcommand(export_target("balances")),
        )
        .subcommand(
            Command::new("config")
                .about("Read or change settings (owner, scope)")
                .subcommand(Command::new("get").arg(Arg::new("key").long("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check stored splits for inconsistencies")
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
}

fn export_target(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true))
}
