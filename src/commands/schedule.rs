// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::amortization;
use crate::models::{
    InstallmentRecord, LoanDraft, PaymentFrequency, Regime, STATUS_PENDING, ScheduleEntry,
};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_count, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::{Context, Result, anyhow, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("preview", sub)) => preview(conn, sub)?,
        Some(("save", sub)) => save(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Collect whatever loan fields were given. Malformed text is an error;
/// absent fields stay `None`.
pub fn draft_from_args(sub: &clap::ArgMatches) -> Result<LoanDraft> {
    let opt = |name: &str| arg_str(sub, name);
    Ok(LoanDraft {
        principal: opt("principal").map(parse_decimal).transpose()?,
        annual_rate_percent: opt("rate").map(parse_decimal).transpose()?,
        installment_count: opt("count").map(parse_count).transpose()?,
        frequency: opt("frequency").map(str::parse::<PaymentFrequency>).transpose()?,
        first_installment_date: opt("first-date").map(parse_date).transpose()?,
        regime: opt("regime").map(str::parse::<Regime>).transpose()?,
        grace_periods: opt("grace").map(parse_count).transpose()?,
        capitalize_grace_interest: Some(sub.get_flag("capitalize")),
    })
}

fn arg_str<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn preview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let draft = draft_from_args(sub)?;
    let entries = amortization::preview(&draft);
    if maybe_print_json(json_flag, jsonl_flag, &entries)? {
        return Ok(());
    }
    if entries.is_empty() {
        println!("Schedule not computable yet: loan parameters incomplete or invalid");
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    print_entries(&entries, &ccy);
    Ok(())
}

fn save(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let project = sub.get_one::<String>("project").unwrap().trim().to_string();
    let draft = draft_from_args(sub)?;
    let entries = amortization::preview(&draft);
    if entries.is_empty() {
        bail!(
            "Loan parameters incomplete or invalid; nothing saved for project '{}'",
            project
        );
    }
    let n = replace_installments(conn, &project, &entries)?;
    println!("Saved {} schedule entries for project '{}'", n, project);
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let project = sub.get_one::<String>("project").unwrap().trim().to_string();
    let records = load_installments(conn, &project)?;
    if maybe_print_json(json_flag, jsonl_flag, &records)? {
        return Ok(());
    }
    if records.is_empty() {
        println!("No installments stored for project '{}'", project);
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.sequence_number.to_string(),
                r.kind.to_string(),
                r.due_date.to_string(),
                fmt_money(&r.amount, &ccy),
                r.status.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["#", "Kind", "Due", "Amount", "Status"], rows)
    );
    Ok(())
}

fn print_entries(entries: &[ScheduleEntry], ccy: &str) {
    let total: Decimal = entries.iter().map(|e| e.amount).sum();
    let mut rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.sequence_number.to_string(),
                e.kind.to_string(),
                e.due_date.to_string(),
                fmt_money(&e.amount, ccy),
            ]
        })
        .collect();
    rows.push(vec![
        String::new(),
        "total".into(),
        String::new(),
        fmt_money(&total, ccy),
    ]);
    println!("{}", pretty_table(&["#", "Kind", "Due", "Amount"], rows));
}

/// Persisted form of a computed schedule; every record starts out pending.
pub fn to_records(project_id: &str, entries: &[ScheduleEntry]) -> Vec<InstallmentRecord> {
    entries
        .iter()
        .map(|e| InstallmentRecord {
            project_id: project_id.to_string(),
            sequence_number: e.sequence_number,
            kind: e.kind,
            amount: e.amount,
            due_date: e.due_date,
            status: STATUS_PENDING.to_string(),
        })
        .collect()
}

/// Replace every stored installment of `project_id` with `entries`.
/// Delete and inserts run in one transaction, so a failed insert keeps the
/// previous schedule.
pub fn replace_installments(
    conn: &mut Connection,
    project_id: &str,
    entries: &[ScheduleEntry],
) -> Result<usize> {
    let tx = conn.transaction()?;
    let removed = tx.execute(
        "DELETE FROM installments WHERE project_id=?1",
        params![project_id],
    )?;
    let mut insert = tx.prepare_cached(
        "INSERT INTO installments(project_id, seq, kind, amount, due_date, status)
         VALUES (?1,?2,?3,?4,?5,?6)",
    )?;
    let records = to_records(project_id, entries);
    for r in &records {
        insert
            .execute(params![
                r.project_id,
                r.sequence_number,
                r.kind.as_str(),
                r.amount.to_string(),
                r.due_date.to_string(),
                r.status
            ])
            .with_context(|| {
                format!(
                    "Insert installment #{} for project '{}'",
                    r.sequence_number, project_id
                )
            })?;
    }
    drop(insert);
    tx.commit()?;
    info!(
        project = project_id,
        removed,
        inserted = records.len(),
        "installments replaced"
    );
    Ok(records.len())
}

pub fn load_installments(conn: &Connection, project_id: &str) -> Result<Vec<InstallmentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT seq, kind, amount, due_date, status FROM installments
         WHERE project_id=?1 ORDER BY seq",
    )?;
    let rows = stmt.query_map(params![project_id], |r| {
        Ok((
            r.get::<_, u32>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (seq, kind, amount, due, status) = row?;
        out.push(InstallmentRecord {
            project_id: project_id.to_string(),
            sequence_number: seq,
            kind: kind
                .parse()
                .map_err(|e| anyhow!("Installment #{} of '{}': {}", seq, project_id, e))?,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in installments", amount))?,
            due_date: parse_date(&due)?,
            status,
        });
    }
    Ok(out)
}
