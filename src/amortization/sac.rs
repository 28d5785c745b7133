// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::rates::round2;

/// Constant amortization (SAC): an equal principal portion every period plus
/// interest on the outstanding balance. The last installment pays off
/// whatever balance remains after the rounded portions.
pub fn installments(balance: Decimal, rate: Decimal, count: u32) -> Option<Vec<Decimal>> {
    let portion = balance.checked_div(Decimal::from(count))?;
    let step = round2(portion);
    let mut running = balance;
    let mut out = Vec::with_capacity(count as usize);
    for k in 1..=count {
        let interest = round2(running.checked_mul(rate)?);
        if k == count {
            out.push(round2(running + interest).max(Decimal::ZERO));
        } else {
            out.push(round2(portion + interest));
            running -= step;
        }
    }
    Some(out)
}
