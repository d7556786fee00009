use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One progressive personal-income-tax band. `up_to` is the cumulative upper
/// bound of the band; `None` marks the open-ended top band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeBracket {
    pub up_to: Option<Money>,
    pub rate: Rate,
}

/// The full set of policy constants the engine runs against.
///
/// Injected into every calculation rather than read from module-level state,
/// so alternate policy years can be tested without code changes. `Default`
/// encodes the currently published Thai schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Transfer fee on the registered (appraised) value
    pub transfer_fee_rate: Rate,
    /// Reduced transfer fee under the government incentive
    pub transfer_fee_incentive_rate: Rate,
    /// Specific Business Tax, incl. municipal surcharge
    pub sbt_rate: Rate,
    /// SBT applies when the seller held the property fewer than this many years
    pub sbt_holding_years_cutoff: u32,
    /// Stamp duty, levied only when SBT does not apply
    pub stamp_duty_rate: Rate,
    /// Flat withholding rate for company and developer sellers
    pub flat_withholding_rate: Rate,
    /// Mortgage registration fee on the loan amount
    pub mortgage_fee_rate: Rate,
    /// Reduced mortgage registration fee under the incentive
    pub mortgage_fee_incentive_rate: Rate,
    /// Expense deduction by ownership year (index 0 = year 1, index 7 = year 8+)
    pub deduction_schedule: [Rate; 8],
    /// Progressive personal-income brackets, ascending, last band open-ended
    pub income_brackets: Vec<IncomeBracket>,
    /// Maximum registered value for the incentive to qualify
    pub incentive_value_cap: Money,
    /// Published end date of the incentive measure, carried for display
    pub incentive_deadline: NaiveDate,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy {
            transfer_fee_rate: dec!(0.02),
            transfer_fee_incentive_rate: dec!(0.0001),
            sbt_rate: dec!(0.033),
            sbt_holding_years_cutoff: 5,
            stamp_duty_rate: dec!(0.005),
            flat_withholding_rate: dec!(0.01),
            mortgage_fee_rate: dec!(0.01),
            mortgage_fee_incentive_rate: dec!(0.0001),
            deduction_schedule: [
                dec!(0.92),
                dec!(0.84),
                dec!(0.77),
                dec!(0.71),
                dec!(0.65),
                dec!(0.60),
                dec!(0.55),
                dec!(0.50),
            ],
            income_brackets: vec![
                IncomeBracket { up_to: Some(dec!(150_000)), rate: Decimal::ZERO },
                IncomeBracket { up_to: Some(dec!(300_000)), rate: dec!(0.05) },
                IncomeBracket { up_to: Some(dec!(500_000)), rate: dec!(0.10) },
                IncomeBracket { up_to: Some(dec!(750_000)), rate: dec!(0.15) },
                IncomeBracket { up_to: Some(dec!(1_000_000)), rate: dec!(0.20) },
                IncomeBracket { up_to: Some(dec!(2_000_000)), rate: dec!(0.25) },
                IncomeBracket { up_to: Some(dec!(4_000_000)), rate: dec!(0.30) },
                IncomeBracket { up_to: None, rate: dec!(0.35) },
            ],
            incentive_value_cap: dec!(7_000_000),
            // Royal Decree reduction measure, extended through mid-2026
            incentive_deadline: NaiveDate::from_ymd_opt(2026, 6, 30)
                .expect("static date is valid"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round to whole currency units, midpoint away from zero. All published
/// amounts in a breakdown are whole baht.
pub fn round_whole(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Human-readable percentage label for a decimal rate ("0.0001" -> "0.01%").
pub fn percent_label(rate: Rate) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
