// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Installment schedule generation.
//!
//! [`compute_schedule`] is a pure function of [`LoanParameters`]: grace-period
//! entries first, anchored so that installment #1 falls on the first
//! installment date, then the amortization installments of the selected
//! regime. Inputs that cannot produce a schedule yet (non-positive principal,
//! no installments, too many grace periods) yield an empty schedule rather
//! than an error, so callers can recompute on every change of a half-filled
//! form.

pub mod graduated;
pub mod price;
pub mod rates;
pub mod sac;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{EntryKind, LoanDraft, LoanParameters, Regime, ScheduleEntry};
use rates::{add_months, round2, sub_months};

pub const MAX_GRACE_PERIODS: u32 = 10;

pub fn compute_schedule(params: &LoanParameters) -> Vec<ScheduleEntry> {
    if params.principal <= Decimal::ZERO
        || params.installment_count == 0
        || params.grace_periods > MAX_GRACE_PERIODS
    {
        debug!(?params, "loan parameters not computable");
        return Vec::new();
    }
    match build(params) {
        Some(entries) => {
            debug!(
                regime = %params.regime,
                entries = entries.len(),
                "schedule computed"
            );
            entries
        }
        None => {
            warn!(?params, "schedule arithmetic or dates out of range; returning empty schedule");
            Vec::new()
        }
    }
}

/// Schedule for a possibly incomplete set of loan fields.
pub fn preview(draft: &LoanDraft) -> Vec<ScheduleEntry> {
    match draft.complete() {
        Some(params) => compute_schedule(&params),
        None => Vec::new(),
    }
}

/// Rate applicable to one period of the given parameters.
pub fn periodic_rate_for(params: &LoanParameters) -> Option<Decimal> {
    rates::periodic_rate(
        params.annual_rate_percent,
        params.frequency.months_per_period(),
    )
}

fn build(params: &LoanParameters) -> Option<Vec<ScheduleEntry>> {
    let months = params.frequency.months_per_period();
    let rate = periodic_rate_for(params)?;
    let count = params.installment_count;

    let mut entries = Vec::with_capacity(params.grace_periods as usize + count as usize);
    let balance = grace_phase(params, months, rate, &mut entries)?;

    let amounts = match params.regime {
        Regime::ConstantAmortization => sac::installments(balance, rate, count)?,
        Regime::ConstantPayment => price::installments(balance, rate, count)?,
        Regime::Graduated => graduated::installments(balance, rate, count)?,
    };

    let mut due = params.first_installment_date;
    for (k, amount) in amounts.into_iter().enumerate() {
        if k > 0 {
            due = add_months(due, months)?;
        }
        push_entry(&mut entries, EntryKind::Installment, amount, due);
    }
    Some(entries)
}

/// Emits the grace entries and returns the balance carried into amortization.
fn grace_phase(
    params: &LoanParameters,
    months: u32,
    rate: Decimal,
    entries: &mut Vec<ScheduleEntry>,
) -> Option<Decimal> {
    let mut balance = params.principal;
    if params.grace_periods == 0 {
        return Some(balance);
    }

    let mut due = sub_months(params.first_installment_date, params.grace_periods * months)?;
    for p in 0..params.grace_periods {
        if p > 0 {
            due = add_months(due, months)?;
        }
        if params.capitalize_grace_interest {
            push_entry(entries, EntryKind::GracePeriod, Decimal::new(0, 2), due);
            balance = balance.checked_mul(Decimal::ONE + rate)?;
        } else {
            let interest = round2(balance.checked_mul(rate)?);
            push_entry(entries, EntryKind::GracePeriodInterest, interest, due);
        }
    }
    Some(balance)
}

/// Balance entering amortization after the grace phase.
pub fn grace_balance(params: &LoanParameters) -> Option<Decimal> {
    let months = params.frequency.months_per_period();
    let rate = periodic_rate_for(params)?;
    let mut scratch = Vec::new();
    grace_phase(params, months, rate, &mut scratch)
}

fn push_entry(
    entries: &mut Vec<ScheduleEntry>,
    kind: EntryKind,
    amount: Decimal,
    due: NaiveDate,
) {
    entries.push(ScheduleEntry {
        sequence_number: entries.len() as u32 + 1,
        kind,
        amount,
        due_date: due,
    });
}
