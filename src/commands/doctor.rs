// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::EntryKind;
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Project", "Detail"], rows));
    }
    Ok(())
}

/// Inspect every stored schedule: sequence numbers must run 1..n without
/// gaps, due dates must strictly increase, and kinds and amounts must parse.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare("SELECT DISTINCT project_id FROM installments ORDER BY project_id")?;
    let projects = stmt
        .query_map([], |r| r.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt_i = conn.prepare(
        "SELECT seq, kind, amount, due_date FROM installments WHERE project_id=?1 ORDER BY seq",
    )?;
    for project in projects {
        let mut cur = stmt_i.query(params![&project])?;
        let mut expected: i64 = 1;
        let mut prev_due: Option<NaiveDate> = None;
        while let Some(r) = cur.next()? {
            let seq: i64 = r.get(0)?;
            let kind: String = r.get(1)?;
            let amount: String = r.get(2)?;
            let due_s: String = r.get(3)?;

            // 1) Sequence gaps left by an interrupted save
            if seq != expected {
                rows.push(vec![
                    "sequence_gap".into(),
                    project.clone(),
                    format!("expected #{}, found #{}", expected, seq),
                ]);
            }
            expected = seq + 1;

            if kind.parse::<EntryKind>().is_err() {
                rows.push(vec![
                    "unknown_kind".into(),
                    project.clone(),
                    format!("#{} {}", seq, kind),
                ]);
            }
            if amount.parse::<rust_decimal::Decimal>().is_err() {
                rows.push(vec![
                    "bad_amount".into(),
                    project.clone(),
                    format!("#{} {}", seq, amount),
                ]);
            }

            // 2) Due dates out of order
            match NaiveDate::parse_from_str(&due_s, "%Y-%m-%d") {
                Ok(due) => {
                    if let Some(prev) = prev_due {
                        if due <= prev {
                            rows.push(vec![
                                "due_date_order".into(),
                                project.clone(),
                                format!("#{} due {} not after {}", seq, due, prev),
                            ]);
                        }
                    }
                    prev_due = Some(due);
                }
                Err(_) => rows.push(vec![
                    "bad_due_date".into(),
                    project.clone(),
                    format!("#{} {}", seq, due_s),
                ]),
            }
        }
    }
    Ok(rows)
}
