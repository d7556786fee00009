use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::{percent_label, round_whole, TaxPolicy};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single assessed duty: the rounded amount, the rate it was levied at,
/// and whether the duty applies to this transaction at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyAssessment {
    pub amount: Money,
    pub rate_label: String,
    pub applicable: bool,
}

impl DutyAssessment {
    fn not_applicable(rate_label: String) -> Self {
        DutyAssessment {
            amount: Decimal::ZERO,
            rate_label,
            applicable: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Incentive eligibility
// ---------------------------------------------------------------------------

/// Value test only: the registered value sits at or under the published cap.
pub fn incentive_qualifies(policy: &TaxPolicy, registered_value: Money) -> bool {
    registered_value <= policy.incentive_value_cap
}

/// Whether the reduced rates actually apply: the caller must have requested
/// the incentive and the value cap must hold. The deadline is only enforced
/// when the caller supplies an as-of date; the engine never consults the
/// clock itself.
pub fn incentive_effective(
    policy: &TaxPolicy,
    registered_value: Money,
    requested: bool,
    as_of: Option<NaiveDate>,
) -> bool {
    requested
        && incentive_qualifies(policy, registered_value)
        && as_of.is_none_or(|date| date <= policy.incentive_deadline)
}

// ---------------------------------------------------------------------------
// Per-duty calculators
// ---------------------------------------------------------------------------

/// Transfer fee on the registered value. Always applicable.
pub fn transfer_fee(policy: &TaxPolicy, registered_value: Money, incentive: bool) -> DutyAssessment {
    let rate = if incentive {
        policy.transfer_fee_incentive_rate
    } else {
        policy.transfer_fee_rate
    };
    DutyAssessment {
        amount: round_whole(registered_value * rate),
        rate_label: percent_label(rate),
        applicable: true,
    }
}

/// Specific Business Tax: levied when the seller held the property for fewer
/// than the cutoff (five) years, on the higher of price and registered value.
pub fn specific_business_tax(
    policy: &TaxPolicy,
    purchase_price: Money,
    registered_value: Money,
    years_owned: u32,
) -> DutyAssessment {
    let rate_label = percent_label(policy.sbt_rate);
    if years_owned >= policy.sbt_holding_years_cutoff {
        return DutyAssessment::not_applicable(rate_label);
    }
    let tax_base = purchase_price.max(registered_value);
    DutyAssessment {
        amount: round_whole(tax_base * policy.sbt_rate),
        rate_label,
        applicable: true,
    }
}

/// Stamp duty: the lower-rate alternative levied exactly when SBT is not.
/// Thai law never charges both on the same transfer.
pub fn stamp_duty(
    policy: &TaxPolicy,
    purchase_price: Money,
    registered_value: Money,
    years_owned: u32,
) -> DutyAssessment {
    let rate_label = percent_label(policy.stamp_duty_rate);
    if years_owned < policy.sbt_holding_years_cutoff {
        return DutyAssessment::not_applicable(rate_label);
    }
    let tax_base = purchase_price.max(registered_value);
    DutyAssessment {
        amount: round_whole(tax_base * policy.stamp_duty_rate),
        rate_label,
        applicable: true,
    }
}

/// Mortgage registration fee on the loan amount. Cash purchases owe nothing.
pub fn mortgage_registration(
    policy: &TaxPolicy,
    loan_amount: Money,
    incentive: bool,
) -> DutyAssessment {
    let rate = if incentive {
        policy.mortgage_fee_incentive_rate
    } else {
        policy.mortgage_fee_rate
    };
    if loan_amount <= Decimal::ZERO {
        return DutyAssessment::not_applicable(percent_label(rate));
    }
    DutyAssessment {
        amount: round_whole(loan_amount * rate),
        rate_label: percent_label(rate),
        applicable: true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
