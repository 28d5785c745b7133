// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rate, rounding and calendar helpers shared by the regime calculators.

use chrono::{Months, NaiveDate};
use rust_decimal::prelude::*;

const MONTHS_PER_YEAR: u32 = 12;

/// Round a currency amount to cents, halves away from zero. The result
/// always carries two decimal places.
pub fn round2(d: Decimal) -> Decimal {
    let mut r = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    r.rescale(2);
    r
}

/// `base^n` by repeated multiplication; `None` on overflow.
pub fn checked_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Effective rate for one period of `months` months, compounding the
/// annual percentage `(1 + A/100)^(months/12) - 1`. Non-positive rates give zero.
pub fn periodic_rate(annual_rate_percent: Decimal, months: u32) -> Option<Decimal> {
    if annual_rate_percent <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    let base = Decimal::ONE + annual_rate_percent / Decimal::ONE_HUNDRED;
    let grown = if months % MONTHS_PER_YEAR == 0 {
        checked_pow(base, months / MONTHS_PER_YEAR)?
    } else {
        let exponent = Decimal::from(months) / Decimal::from(MONTHS_PER_YEAR);
        base.checked_powd(exponent)?
    };
    Some(grown - Decimal::ONE)
}

pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

pub fn sub_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(months))
}
