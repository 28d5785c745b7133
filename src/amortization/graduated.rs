// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Graduated (posfixadas) series: face values grow geometrically at the
//! periodic rate so that their present value equals the financed balance.

use rust_decimal::Decimal;
use tracing::warn;

use super::rates::round2;

const TAIL_LEN: usize = 3;

pub fn installments(balance: Decimal, rate: Decimal, count: u32) -> Option<Vec<Decimal>> {
    let growth = Decimal::ONE + rate;
    // PV of P1 * growth^(k-1) discounted by growth^k is P1 * n / growth.
    let first = balance.checked_mul(growth)?.checked_div(Decimal::from(count))?;

    let mut values = Vec::with_capacity(count as usize);
    let mut present_value = Decimal::ZERO;
    let mut factor = Decimal::ONE;
    for _ in 0..count {
        let value = round2(first.checked_mul(factor)?);
        factor = factor.checked_mul(growth)?;
        present_value += value.checked_div(factor)?;
        values.push(value);
    }

    let residual = round2(balance - present_value);
    apply_residual(&mut values, residual);
    Some(values)
}

/// Push the rounding residual onto the last installment. If that would leave
/// it non-positive, spread the residual over the last three face values in
/// proportion to their size instead; with zero total weight the residual
/// lands on the last installment whatever its sign.
fn apply_residual(values: &mut [Decimal], residual: Decimal) {
    let len = values.len();
    let Some(last) = values.last_mut() else {
        return;
    };
    let adjusted = *last + residual;
    if adjusted > Decimal::ZERO || len < TAIL_LEN {
        *last = adjusted;
        return;
    }

    let start = len - TAIL_LEN;
    let tail = &mut values[start..];
    let weight: Decimal = tail.iter().sum();
    if weight.is_zero() {
        warn!(%residual, "graduated tail has zero weight; residual applied to last installment");
        tail[TAIL_LEN - 1] += residual;
        return;
    }

    let mut allotted = Decimal::ZERO;
    for value in tail.iter_mut().take(TAIL_LEN - 1) {
        let share = round2(residual * *value / weight);
        *value += share;
        allotted += share;
    }
    // remainder keeps the tail total exact
    tail[TAIL_LEN - 1] += residual - allotted;
}
