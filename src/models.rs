// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFrequency {
    Monthly,
    Bimonthly,
    Quarterly,
    Quadrimester,
    Semiannual,
    Annual,
}

impl PaymentFrequency {
    pub fn months_per_period(self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 1,
            PaymentFrequency::Bimonthly => 2,
            PaymentFrequency::Quarterly => 3,
            PaymentFrequency::Quadrimester => 4,
            PaymentFrequency::Semiannual => 6,
            PaymentFrequency::Annual => 12,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Bimonthly => "bimonthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::Quadrimester => "quadrimester",
            PaymentFrequency::Semiannual => "semiannual",
            PaymentFrequency::Annual => "annual",
        }
    }
}

impl FromStr for PaymentFrequency {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "bimonthly" => Ok(PaymentFrequency::Bimonthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "quadrimester" => Ok(PaymentFrequency::Quadrimester),
            "semiannual" => Ok(PaymentFrequency::Semiannual),
            "annual" => Ok(PaymentFrequency::Annual),
            other => Err(ModelError::UnknownFrequency(other.to_string())),
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Amortization regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Geometric series growing at the periodic rate (posfixadas).
    Graduated,
    /// SAC: equal principal portions, declining payments.
    ConstantAmortization,
    /// PRICE: level payments.
    ConstantPayment,
}

impl Regime {
    pub fn as_str(self) -> &'static str {
        match self {
            Regime::Graduated => "graduated",
            Regime::ConstantAmortization => "sac",
            Regime::ConstantPayment => "price",
        }
    }
}

impl FromStr for Regime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graduated" | "posfixadas" => Ok(Regime::Graduated),
            "sac" | "constant-amortization" | "constant_amortization" => {
                Ok(Regime::ConstantAmortization)
            }
            "price" | "constant-payment" | "constant_payment" => Ok(Regime::ConstantPayment),
            other => Err(ModelError::UnknownRegime(other.to_string())),
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    GracePeriod,
    GracePeriodInterest,
    Installment,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::GracePeriod => "grace_period",
            EntryKind::GracePeriodInterest => "grace_period_interest",
            EntryKind::Installment => "installment",
        }
    }
}

impl FromStr for EntryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grace_period" => Ok(EntryKind::GracePeriod),
            "grace_period_interest" => Ok(EntryKind::GracePeriodInterest),
            "installment" => Ok(EntryKind::Installment),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub installment_count: u32,
    pub frequency: PaymentFrequency,
    pub first_installment_date: NaiveDate,
    pub regime: Regime,
    pub grace_periods: u32,
    pub capitalize_grace_interest: bool,
}

/// Loan fields as they arrive from a partially filled form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub principal: Option<Decimal>,
    pub annual_rate_percent: Option<Decimal>,
    pub installment_count: Option<u32>,
    pub frequency: Option<PaymentFrequency>,
    pub first_installment_date: Option<NaiveDate>,
    pub regime: Option<Regime>,
    pub grace_periods: Option<u32>,
    pub capitalize_grace_interest: Option<bool>,
}

impl LoanDraft {
    /// Returns the parameters once every required field is filled in.
    /// Rate, grace periods and the capitalization flag fall back to zero/false.
    pub fn complete(&self) -> Option<LoanParameters> {
        Some(LoanParameters {
            principal: self.principal?,
            annual_rate_percent: self.annual_rate_percent.unwrap_or(Decimal::ZERO),
            installment_count: self.installment_count?,
            frequency: self.frequency?,
            first_installment_date: self.first_installment_date?,
            regime: self.regime?,
            grace_periods: self.grace_periods.unwrap_or(0),
            capitalize_grace_interest: self.capitalize_grace_interest.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub sequence_number: u32,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRecord {
    pub project_id: String,
    pub sequence_number: u32,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: String,
}
