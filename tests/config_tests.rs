// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use agrifin::{cli, commands::config, db, utils};
use rusqlite::Connection;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["agrifin", "config"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("config", sub)) = matches.subcommand() {
        config::handle(conn, sub)
    } else {
        panic!("config command not parsed");
    }
}

#[test]
fn currency_defaults_and_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("agrifin.sqlite");
    {
        let mut conn = Connection::open(&path).unwrap();
        db::init_schema(&mut conn).unwrap();
        assert_eq!(utils::get_currency(&conn).unwrap(), "BRL");
        run(&conn, &["set-currency", " usd "]).unwrap();
    }
    let mut conn = Connection::open(&path).unwrap();
    db::init_schema(&mut conn).unwrap();
    assert_eq!(utils::get_currency(&conn).unwrap(), "USD");
    run(&conn, &["show", "--json"]).unwrap();
}

#[test]
fn set_currency_rejects_garbage() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    let err = run(&conn, &["set-currency", "dollars"]).unwrap_err();
    assert!(err.to_string().contains("3-letter"));
    assert_eq!(utils::get_currency(&conn).unwrap(), "BRL");
}

#[test]
fn money_formatting_uses_currency_label() {
    assert_eq!(utils::fmt_money(&dec!(45333.33), "BRL"), "BRL 45333.33");
    assert_eq!(utils::fmt_money(&dec!(12), "USD"), "USD 12.00");
}
