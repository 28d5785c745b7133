// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use agrifin::amortization::{self, price, rates};
use agrifin::compute_schedule;
use agrifin::models::{
    EntryKind, LoanDraft, LoanParameters, PaymentFrequency, Regime, ScheduleEntry,
};
use chrono::{Months, NaiveDate};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn loan(
    principal: Decimal,
    rate: Decimal,
    count: u32,
    frequency: PaymentFrequency,
    regime: Regime,
) -> LoanParameters {
    LoanParameters {
        principal,
        annual_rate_percent: rate,
        installment_count: count,
        frequency,
        first_installment_date: date(2026, 1, 10),
        regime,
        grace_periods: 0,
        capitalize_grace_interest: false,
    }
}

fn installments(entries: &[ScheduleEntry]) -> Vec<Decimal> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::Installment)
        .map(|e| e.amount)
        .collect()
}

/// Installment amounts discounted back to the start of amortization.
fn present_value(amounts: &[Decimal], rate: Decimal) -> Decimal {
    let mut factor = Decimal::ONE;
    let mut total = Decimal::ZERO;
    for a in amounts {
        factor *= Decimal::ONE + rate;
        total += *a / factor;
    }
    total
}

fn assert_conserves(params: &LoanParameters) {
    let entries = compute_schedule(params);
    let rate = amortization::periodic_rate_for(params).unwrap();
    let balance = amortization::grace_balance(params).unwrap();
    let pv = present_value(&installments(&entries), rate);
    // Interest is rounded to cents at every step, so the discounted total can
    // drift by up to a cent per installment; a flat one-cent bound is not
    // reachable for long schedules.
    let tolerance = dec!(0.01) * Decimal::from(params.installment_count);
    assert!(
        (pv - balance).abs() <= tolerance,
        "{:?}: pv {} vs balance {}",
        params.regime,
        pv,
        balance
    );
}

#[test]
fn sac_example_matches_hand_computation() {
    let p = loan(
        dec!(100000),
        dec!(12),
        3,
        PaymentFrequency::Annual,
        Regime::ConstantAmortization,
    );
    let entries = compute_schedule(&p);
    assert_eq!(
        entries,
        vec![
            ScheduleEntry {
                sequence_number: 1,
                kind: EntryKind::Installment,
                amount: dec!(45333.33),
                due_date: date(2026, 1, 10),
            },
            ScheduleEntry {
                sequence_number: 2,
                kind: EntryKind::Installment,
                amount: dec!(41333.33),
                due_date: date(2027, 1, 10),
            },
            ScheduleEntry {
                sequence_number: 3,
                kind: EntryKind::Installment,
                amount: dec!(37333.34),
                due_date: date(2028, 1, 10),
            },
        ]
    );
}

#[test]
fn every_regime_conserves_the_financed_balance() {
    for regime in [
        Regime::ConstantAmortization,
        Regime::ConstantPayment,
        Regime::Graduated,
    ] {
        assert_conserves(&loan(dec!(100000), dec!(12), 3, PaymentFrequency::Annual, regime));
        assert_conserves(&loan(dec!(250000), dec!(12), 60, PaymentFrequency::Monthly, regime));
        assert_conserves(&loan(dec!(80000), dec!(9), 10, PaymentFrequency::Semiannual, regime));
        assert_conserves(&loan(dec!(45000.50), dec!(6.5), 9, PaymentFrequency::Quadrimester, regime));

        let mut with_grace = loan(dec!(60000), dec!(8), 8, PaymentFrequency::Quarterly, regime);
        with_grace.grace_periods = 3;
        with_grace.capitalize_grace_interest = true;
        assert_conserves(&with_grace);
    }
}

#[test]
fn entry_count_includes_grace_periods() {
    let mut p = loan(
        dec!(30000),
        dec!(10),
        7,
        PaymentFrequency::Semiannual,
        Regime::ConstantPayment,
    );
    p.grace_periods = 4;
    let entries = compute_schedule(&p);
    assert_eq!(entries.len(), 11);
    let seqs: Vec<u32> = entries.iter().map(|e| e.sequence_number).collect();
    assert_eq!(seqs, (1..=11).collect::<Vec<u32>>());
}

#[test]
fn due_dates_step_by_calendar_months() {
    let mut p = loan(
        dec!(12000),
        dec!(5),
        6,
        PaymentFrequency::Monthly,
        Regime::Graduated,
    );
    p.first_installment_date = date(2025, 1, 31);
    let entries = compute_schedule(&p);
    assert_eq!(entries[0].due_date, date(2025, 1, 31));
    assert_eq!(entries[1].due_date, date(2025, 2, 28));
    for pair in entries.windows(2) {
        assert!(pair[1].due_date > pair[0].due_date);
        assert_eq!(
            pair[0].due_date.checked_add_months(Months::new(1)),
            Some(pair[1].due_date)
        );
    }
}

#[test]
fn grace_entries_end_before_first_installment_date() {
    let mut p = loan(
        dec!(40000),
        dec!(10),
        4,
        PaymentFrequency::Bimonthly,
        Regime::ConstantAmortization,
    );
    p.first_installment_date = date(2025, 9, 15);
    p.grace_periods = 3;
    let entries = compute_schedule(&p);
    let dates: Vec<NaiveDate> = entries.iter().map(|e| e.due_date).take(4).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 3, 15),
            date(2025, 5, 15),
            date(2025, 7, 15),
            date(2025, 9, 15)
        ]
    );
    assert_eq!(entries[3].kind, EntryKind::Installment);
}

#[test]
fn capitalized_grace_grows_the_balance() {
    let mut p = loan(
        dec!(50000),
        dec!(10),
        5,
        PaymentFrequency::Annual,
        Regime::ConstantAmortization,
    );
    p.grace_periods = 2;
    p.capitalize_grace_interest = true;
    p.first_installment_date = date(2027, 6, 30);

    let entries = compute_schedule(&p);
    assert_eq!(entries.len(), 7);
    for e in &entries[..2] {
        assert_eq!(e.kind, EntryKind::GracePeriod);
        assert_eq!(e.amount, Decimal::ZERO);
    }
    assert_eq!(entries[0].due_date, date(2025, 6, 30));
    assert_eq!(entries[1].due_date, date(2026, 6, 30));
    assert_eq!(entries[2].due_date, date(2027, 6, 30));
    assert_eq!(amortization::grace_balance(&p), Some(dec!(60500.00)));
    // SAC portion 12100.00 plus interest on 60500
    assert_eq!(entries[2].amount, dec!(18150.00));
}

#[test]
fn paid_grace_interest_keeps_the_balance() {
    let mut p = loan(
        dec!(50000),
        dec!(10),
        5,
        PaymentFrequency::Annual,
        Regime::ConstantPayment,
    );
    p.grace_periods = 2;
    let entries = compute_schedule(&p);
    for e in &entries[..2] {
        assert_eq!(e.kind, EntryKind::GracePeriodInterest);
        assert_eq!(e.amount, dec!(5000.00));
    }
    assert_eq!(amortization::grace_balance(&p), Some(dec!(50000)));
}

#[test]
fn zero_rate_gives_equal_installments() {
    for regime in [Regime::Graduated, Regime::ConstantPayment] {
        let p = loan(dec!(120000), Decimal::ZERO, 12, PaymentFrequency::Monthly, regime);
        let amounts = installments(&compute_schedule(&p));
        assert_eq!(amounts, vec![dec!(10000.00); 12]);
    }
}

#[test]
fn zero_rate_rounding_lands_on_last_installment() {
    for regime in [
        Regime::Graduated,
        Regime::ConstantPayment,
        Regime::ConstantAmortization,
    ] {
        let p = loan(dec!(1000), Decimal::ZERO, 3, PaymentFrequency::Annual, regime);
        let amounts = installments(&compute_schedule(&p));
        assert_eq!(amounts, vec![dec!(333.33), dec!(333.33), dec!(333.34)]);
    }
}

#[test]
fn sac_payments_never_increase() {
    let p = loan(
        dec!(500000),
        dec!(7.5),
        24,
        PaymentFrequency::Monthly,
        Regime::ConstantAmortization,
    );
    let amounts = installments(&compute_schedule(&p));
    assert_eq!(amounts.len(), 24);
    for pair in amounts.windows(2) {
        assert!(pair[1] <= pair[0], "{} then {}", pair[0], pair[1]);
    }
}

#[test]
fn price_payments_are_level_until_the_last() {
    let p = loan(
        dec!(100000),
        dec!(10),
        5,
        PaymentFrequency::Annual,
        Regime::ConstantPayment,
    );
    let amounts = installments(&compute_schedule(&p));
    assert_eq!(
        amounts,
        vec![
            dec!(26379.75),
            dec!(26379.75),
            dec!(26379.75),
            dec!(26379.75),
            dec!(26379.74)
        ]
    );
    let pmt = price::level_payment(dec!(100000), dec!(0.1), 5).unwrap();
    assert_eq!(rates::round2(pmt), dec!(26379.75));
}

#[test]
fn graduated_values_grow_geometrically() {
    let p = loan(
        dec!(100000),
        dec!(12),
        3,
        PaymentFrequency::Annual,
        Regime::Graduated,
    );
    let amounts = installments(&compute_schedule(&p));
    assert_eq!(
        amounts,
        vec![dec!(37333.33), dec!(41813.33), dec!(46830.94)]
    );
}

#[test]
fn incomplete_or_invalid_input_yields_empty_schedule() {
    let base = loan(
        dec!(10000),
        dec!(10),
        4,
        PaymentFrequency::Annual,
        Regime::ConstantPayment,
    );

    let mut zero_principal = base.clone();
    zero_principal.principal = Decimal::ZERO;
    assert!(compute_schedule(&zero_principal).is_empty());

    let mut negative = base.clone();
    negative.principal = dec!(-5);
    assert!(compute_schedule(&negative).is_empty());

    let mut no_installments = base.clone();
    no_installments.installment_count = 0;
    assert!(compute_schedule(&no_installments).is_empty());

    let mut long_grace = base.clone();
    long_grace.grace_periods = 11;
    assert!(compute_schedule(&long_grace).is_empty());

    let mut max_grace = base.clone();
    max_grace.grace_periods = 10;
    assert_eq!(compute_schedule(&max_grace).len(), 14);

    assert!(!compute_schedule(&base).is_empty());
}

#[test]
fn negative_rate_is_treated_as_interest_free() {
    let p = loan(
        dec!(900),
        dec!(-4),
        3,
        PaymentFrequency::Annual,
        Regime::ConstantPayment,
    );
    let amounts = installments(&compute_schedule(&p));
    assert_eq!(amounts, vec![dec!(300.00); 3]);
}

#[test]
fn draft_previews_only_when_complete() {
    let full = LoanDraft {
        principal: Some(dec!(10000)),
        annual_rate_percent: Some(dec!(10)),
        installment_count: Some(4),
        frequency: Some(PaymentFrequency::Annual),
        first_installment_date: Some(date(2026, 3, 1)),
        regime: Some(Regime::ConstantAmortization),
        grace_periods: None,
        capitalize_grace_interest: None,
    };
    assert_eq!(amortization::preview(&full).len(), 4);

    let mut no_regime = full.clone();
    no_regime.regime = None;
    assert!(amortization::preview(&no_regime).is_empty());

    let mut no_date = full.clone();
    no_date.first_installment_date = None;
    assert!(amortization::preview(&no_date).is_empty());

    let mut no_frequency = full.clone();
    no_frequency.frequency = None;
    assert!(amortization::preview(&no_frequency).is_empty());

    assert!(amortization::preview(&LoanDraft::default()).is_empty());
}

#[test]
fn schedule_serializes_with_snake_case_kinds() {
    let mut p = loan(
        dec!(1000),
        dec!(10),
        1,
        PaymentFrequency::Annual,
        Regime::ConstantPayment,
    );
    p.grace_periods = 1;
    let v = serde_json::to_value(compute_schedule(&p)).unwrap();
    assert_eq!(v[0]["kind"], "grace_period_interest");
    assert_eq!(v[0]["due_date"], "2025-01-10");
    assert_eq!(v[1]["kind"], "installment");
    assert_eq!(v[1]["amount"], "1100.00");
}

#[test]
fn capitalized_grace_compounds_without_intermediate_rounding() {
    let mut p = loan(
        dec!(12345.67),
        dec!(13),
        12,
        PaymentFrequency::Monthly,
        Regime::ConstantPayment,
    );
    p.grace_periods = 10;
    p.capitalize_grace_interest = true;

    let rate = amortization::periodic_rate_for(&p).unwrap();
    let compounded = p.principal * rates::checked_pow(Decimal::ONE + rate, 10).unwrap();
    let balance = amortization::grace_balance(&p).unwrap();
    assert!(
        (balance - compounded).abs() < dec!(0.0000001),
        "{} vs {}",
        balance,
        compounded
    );
    // rounding each month's interest to cents would land on 13669.30
    assert!((balance - dec!(13669.3134)).abs() < dec!(0.001), "got {}", balance);
}

#[test]
fn overflowing_schedules_come_back_empty() {
    for (regime, expected) in [
        (Regime::ConstantPayment, 0),
        (Regime::Graduated, 0),
        (Regime::ConstantAmortization, 600),
    ] {
        let p = loan(dec!(10000), dec!(1000), 600, PaymentFrequency::Monthly, regime);
        assert_eq!(compute_schedule(&p).len(), expected, "{:?}", regime);
    }
}
