use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::policy::{percent_label, round_whole, IncomeBracket, TaxPolicy};
use crate::types::{Money, Rate, SellerType};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Withholding tax owed by the seller, with the intermediate figures the
/// progressive method produces. The flat company method leaves those `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingAssessment {
    pub amount: Money,
    pub rate_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessable_income_per_year: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_per_year: Option<Money>,
}

// ---------------------------------------------------------------------------
// Deduction rate resolver
// ---------------------------------------------------------------------------

/// Expense-deduction percentage for a holding period. The published schedule
/// covers years 1 through 8; anything longer stays at the year-8 rate. The
/// clamp here is lookup-only and does not alter the caller's year count.
pub fn deduction_rate(policy: &TaxPolicy, years_owned: u32) -> Rate {
    let idx = years_owned.clamp(1, 8) as usize - 1;
    policy.deduction_schedule[idx]
}

// ---------------------------------------------------------------------------
// Progressive method (individual sellers)
// ---------------------------------------------------------------------------

/// Walk the progressive brackets in order, taxing the slice of income that
/// falls inside each band, until the income is exhausted.
fn progressive_tax(brackets: &[IncomeBracket], income: Money) -> Money {
    let mut tax = Decimal::ZERO;
    let mut floor = Decimal::ZERO;

    for bracket in brackets {
        if income <= floor {
            break;
        }
        let portion = match bracket.up_to {
            Some(ceiling) => income.min(ceiling) - floor,
            None => income - floor,
        };
        tax += portion * bracket.rate;
        match bracket.up_to {
            Some(ceiling) => floor = ceiling,
            None => break,
        }
    }

    tax
}

/// Progressive withholding tax for an individual seller.
///
/// The registered value, reduced by the ownership-year deduction, is spread
/// over the holding period, taxed per year at personal-income rates, then
/// multiplied back up. A zero holding period would divide by zero, so the
/// divisor is clamped to 1 independently of the schedule lookup.
pub fn individual_withholding(
    policy: &TaxPolicy,
    registered_value: Money,
    years_owned: u32,
) -> WithholdingAssessment {
    let deduction = deduction_rate(policy, years_owned);
    let divisor_years = Money::from(years_owned.max(1));

    let assessable_per_year = registered_value * deduction / divisor_years;
    let tax_per_year = progressive_tax(&policy.income_brackets, assessable_per_year);
    let amount = round_whole(tax_per_year * divisor_years);

    WithholdingAssessment {
        amount,
        rate_label: "progressive".to_string(),
        deduction_rate: Some(deduction),
        assessable_income_per_year: Some(assessable_per_year),
        tax_per_year: Some(tax_per_year),
    }
}

// ---------------------------------------------------------------------------
// Flat method (company and developer sellers)
// ---------------------------------------------------------------------------

/// Flat withholding on the higher of purchase price and registered value.
pub fn flat_withholding(policy: &TaxPolicy, tax_base: Money) -> WithholdingAssessment {
    WithholdingAssessment {
        amount: round_whole(tax_base * policy.flat_withholding_rate),
        rate_label: format!("{} flat", percent_label(policy.flat_withholding_rate)),
        deduction_rate: None,
        assessable_income_per_year: None,
        tax_per_year: None,
    }
}

/// Withholding tax for any seller type. Always applicable.
pub fn withholding_tax(
    policy: &TaxPolicy,
    seller_type: SellerType,
    purchase_price: Money,
    registered_value: Money,
    years_owned: u32,
) -> WithholdingAssessment {
    match seller_type {
        SellerType::Individual => individual_withholding(policy, registered_value, years_owned),
        SellerType::Company | SellerType::Developer => {
            flat_withholding(policy, purchase_price.max(registered_value))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
