// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::rates::{checked_pow, round2};

/// Level payment for `balance` over `count` periods at `rate`.
pub fn level_payment(balance: Decimal, rate: Decimal, count: u32) -> Option<Decimal> {
    if rate.is_zero() {
        return balance.checked_div(Decimal::from(count));
    }
    let growth = checked_pow(Decimal::ONE + rate, count)?;
    let discount = Decimal::ONE - Decimal::ONE.checked_div(growth)?;
    balance.checked_mul(rate)?.checked_div(discount)
}

/// Constant payment (PRICE). Every installment but the last is the rounded
/// level payment; the last one settles the remaining balance plus interest.
pub fn installments(balance: Decimal, rate: Decimal, count: u32) -> Option<Vec<Decimal>> {
    let level = round2(level_payment(balance, rate, count)?);
    let mut running = balance;
    let mut out = Vec::with_capacity(count as usize);
    for k in 1..=count {
        let interest = round2(running.checked_mul(rate)?);
        if k == count {
            out.push(round2(running + interest).max(Decimal::ZERO));
        } else {
            out.push(level);
            running -= level - interest;
        }
    }
    Some(out)
}
