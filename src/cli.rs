// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn loan_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("principal")
            .long("principal")
            .help("Amount financed"),
    )
    .arg(
        Arg::new("rate")
            .long("rate")
            .help("Nominal annual interest rate in percent (0 = interest-free)"),
    )
    .arg(
        Arg::new("count")
            .long("count")
            .help("Number of amortization installments, excluding grace periods"),
    )
    .arg(
        Arg::new("frequency")
            .long("frequency")
            .help("monthly|bimonthly|quarterly|quadrimester|semiannual|annual"),
    )
    .arg(
        Arg::new("first-date")
            .long("first-date")
            .help("Due date of installment #1, YYYY-MM-DD"),
    )
    .arg(
        Arg::new("regime")
            .long("regime")
            .help("graduated|sac|price"),
    )
    .arg(
        Arg::new("grace")
            .long("grace")
            .help("Grace periods before amortization (0-10)"),
    )
    .arg(
        Arg::new("capitalize")
            .long("capitalize")
            .action(ArgAction::SetTrue)
            .help("Capitalize grace-period interest instead of paying it"),
    )
}

fn project_arg() -> Arg {
    Arg::new("project")
        .long("project")
        .required(true)
        .help("Owning project identifier")
}

pub fn build_cli() -> Command {
    Command::new("agrifin")
        .version(crate_version!())
        .about("Installment schedules for agricultural financing projects")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("schedule")
                .about("Compute and store installment schedules")
                .subcommand(json_args(loan_args(
                    Command::new("preview").about("Compute a schedule without saving it"),
                )))
                .subcommand(loan_args(
                    Command::new("save")
                        .about("Compute a schedule and replace the project's installments")
                        .arg(project_arg()),
                ))
                .subcommand(json_args(
                    Command::new("show")
                        .about("Show the stored installments of a project")
                        .arg(project_arg()),
                )),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(json_args(Command::new("show").about("Show settings")))
                .subcommand(
                    Command::new("set-currency")
                        .about("Set the currency label used for amounts")
                        .arg(Arg::new("currency").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored schedules for inconsistencies"))
}
