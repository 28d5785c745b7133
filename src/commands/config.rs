// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_currency, maybe_print_json, pretty_table, set_currency};
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ccy = get_currency(conn)?;
            let v = json!({ "currency": ccy });
            if !maybe_print_json(json_flag, jsonl_flag, &v)? {
                println!(
                    "{}",
                    pretty_table(&["Key", "Value"], vec![vec!["currency".into(), ccy]])
                );
            }
        }
        Some(("set-currency", sub)) => {
            let ccy = sub
                .get_one::<String>("currency")
                .unwrap()
                .trim()
                .to_uppercase();
            if ccy.len() != 3 || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("Invalid currency '{}', expected a 3-letter code", ccy);
            }
            set_currency(conn, &ccy)?;
            println!("Currency set to {}", ccy);
        }
        _ => {}
    }
    Ok(())
}
