use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TransferTaxError;
use crate::foreigner::{foreigner_guidance, ForeignerInfo};
use crate::policy::TaxPolicy;
use crate::split::{Distribution, FeeSplitConfig, FeeSplitPreset};
use crate::taxes::duties;
use crate::taxes::withholding;
use crate::types::{
    BuyerNationality, Currency, Money, PropertyType, ResultMetadata, SellerType, TaxCategory,
};
use crate::TransferTaxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything the engine needs to cost one ownership transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferInput {
    /// Negotiated sale price, whole currency units
    pub purchase_price: Money,
    /// Land Department appraised value, typically at or below the price
    pub registered_value: Money,
    /// Seller's holding period in whole years
    pub years_owned: u32,
    #[serde(default)]
    pub seller_type: SellerType,
    #[serde(default)]
    pub buyer_nationality: BuyerNationality,
    #[serde(default)]
    pub property_type: PropertyType,
    /// Caller requests the reduced-rate government incentive
    #[serde(default)]
    pub apply_incentive: bool,
    /// Zero means a cash purchase
    #[serde(default)]
    pub loan_amount: Money,
    #[serde(default)]
    pub fee_split_preset: FeeSplitPreset,
    /// Required when the preset is `custom`, ignored otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fee_split: Option<FeeSplitConfig>,
    /// Transfer date used to test the incentive deadline. Absent means the
    /// deadline is not checked here; that decision stays with the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// Display currency stamped on the result metadata (defaults to THB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

/// One line of the cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBreakdownItem {
    pub category: TaxCategory,
    pub label: String,
    pub amount: Money,
    pub rate_label: String,
    pub applicable: bool,
    pub buyer_amount: Money,
    pub seller_amount: Money,
    pub distribution: Distribution,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTotals {
    pub grand_total: Money,
    pub buyer_pays: Money,
    pub seller_pays: Money,
}

/// Comparison of the transaction with and without the incentive rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveSavings {
    /// Value test only: registered value at or under the published cap
    pub qualifies: bool,
    pub total_without_incentive: Money,
    pub total_with_incentive: Money,
    /// Zero unless the incentive was requested and qualifies
    pub amount_saved: Money,
    pub deadline: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub breakdown: Vec<TaxBreakdownItem>,
    pub totals: TransferTotals,
    pub incentive_savings: IncentiveSavings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreigner_info: Option<ForeignerInfo>,
    pub fee_split: FeeSplitConfig,
    pub warnings: Vec<String>,
    pub metadata: ResultMetadata,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &TransferInput, warnings: &mut Vec<String>) -> TransferTaxResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(TransferTaxError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if input.registered_value <= Decimal::ZERO {
        return Err(TransferTaxError::InvalidInput {
            field: "registered_value".into(),
            reason: "Registered value must be positive".into(),
        });
    }

    if input.registered_value > input.purchase_price {
        warnings.push(format!(
            "Registered value {} exceeds purchase price {} — appraisals usually sit below \
             the negotiated price, verify the figures",
            input.registered_value, input.purchase_price
        ));
    }

    if input.loan_amount > input.purchase_price {
        warnings.push(format!(
            "Loan amount {} exceeds purchase price {}",
            input.loan_amount, input.purchase_price
        ));
    }

    if input.years_owned == 0 {
        warnings.push(
            "Holding period of 0 years treated as 1 year for the withholding-tax division"
                .to_string(),
        );
    }

    Ok(())
}

/// Resolve the effective fee-split configuration, never failing closed:
/// a missing custom config falls back to the standard split with a warning.
fn resolve_fee_split(
    input: &TransferInput,
    warnings: &mut Vec<String>,
) -> TransferTaxResult<FeeSplitConfig> {
    match input.fee_split_preset {
        FeeSplitPreset::Custom => match &input.custom_fee_split {
            Some(config) => {
                config.validate()?;
                Ok(config.clone())
            }
            None => {
                warnings.push(
                    "Preset 'custom' selected without a custom fee split — using the \
                     standard 50/50 split"
                        .to_string(),
                );
                Ok(FeeSplitConfig::for_preset(FeeSplitPreset::Standard))
            }
        },
        preset => {
            if input.custom_fee_split.is_some() {
                warnings.push(format!(
                    "Custom fee split ignored because the preset is {:?}",
                    preset
                ));
            }
            Ok(FeeSplitConfig::for_preset(preset))
        }
    }
}

// ---------------------------------------------------------------------------
// Per-tax pass
// ---------------------------------------------------------------------------

/// Amounts for all five categories under one incentive setting, in the fixed
/// breakdown order.
struct TaxPass {
    items: [(TaxCategory, Money, String, bool); 5],
}

impl TaxPass {
    fn total(&self) -> Money {
        self.items.iter().map(|(_, amount, _, _)| *amount).sum()
    }
}

fn run_taxes(policy: &TaxPolicy, input: &TransferInput, incentive: bool) -> TaxPass {
    let fee = duties::transfer_fee(policy, input.registered_value, incentive);
    let sbt = duties::specific_business_tax(
        policy,
        input.purchase_price,
        input.registered_value,
        input.years_owned,
    );
    let stamp = duties::stamp_duty(
        policy,
        input.purchase_price,
        input.registered_value,
        input.years_owned,
    );
    let wht = withholding::withholding_tax(
        policy,
        input.seller_type,
        input.purchase_price,
        input.registered_value,
        input.years_owned,
    );
    let mortgage = duties::mortgage_registration(policy, input.loan_amount, incentive);

    TaxPass {
        items: [
            (
                TaxCategory::TransferFee,
                fee.amount,
                fee.rate_label,
                fee.applicable,
            ),
            (
                TaxCategory::SpecificBusinessTax,
                sbt.amount,
                sbt.rate_label,
                sbt.applicable,
            ),
            (
                TaxCategory::StampDuty,
                stamp.amount,
                stamp.rate_label,
                stamp.applicable,
            ),
            (TaxCategory::WithholdingTax, wht.amount, wht.rate_label, true),
            (
                TaxCategory::MortgageRegistration,
                mortgage.amount,
                mortgage.rate_label,
                mortgage.applicable,
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Cost one ownership transfer: five taxes, buyer/seller distribution,
/// incentive comparison, and foreign-buyer guidance where relevant.
///
/// A single synchronous pass over call-local values; nothing is shared or
/// mutated across invocations.
pub fn calculate_transfer_costs(
    policy: &TaxPolicy,
    input: &TransferInput,
) -> TransferTaxResult<TransferResult> {
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input, &mut warnings)?;
    let fee_split = resolve_fee_split(input, &mut warnings)?;

    let qualifies = duties::incentive_qualifies(policy, input.registered_value);
    let effective = duties::incentive_effective(
        policy,
        input.registered_value,
        input.apply_incentive,
        input.as_of,
    );

    if input.apply_incentive && !qualifies {
        warnings.push(format!(
            "Incentive requested but the registered value exceeds the {} cap — standard \
             rates applied",
            policy.incentive_value_cap
        ));
    }
    if let Some(date) = input.as_of {
        if input.apply_incentive && qualifies && date > policy.incentive_deadline {
            warnings.push(format!(
                "Incentive measure ended {} — standard rates applied as of {}",
                policy.incentive_deadline, date
            ));
        }
    }

    // The effective pass feeds the breakdown; the forced-off pass exists only
    // for the savings comparison.
    let effective_pass = run_taxes(policy, input, effective);
    let baseline_pass = run_taxes(policy, input, false);

    let mut breakdown = Vec::with_capacity(5);
    let mut buyer_pays = Decimal::ZERO;
    let mut seller_pays = Decimal::ZERO;

    for (category, amount, rate_label, applicable) in effective_pass.items.iter().cloned() {
        let distribution = fee_split.distribution(category);
        let (buyer_amount, seller_amount) = distribution.split(amount);
        buyer_pays += buyer_amount;
        seller_pays += seller_amount;
        breakdown.push(TaxBreakdownItem {
            category,
            label: category.label().to_string(),
            amount,
            rate_label,
            applicable,
            buyer_amount,
            seller_amount,
            distribution,
        });
    }

    let grand_total = effective_pass.total();
    let total_without_incentive = baseline_pass.total();
    let amount_saved = if effective {
        total_without_incentive - grand_total
    } else {
        Decimal::ZERO
    };

    let foreigner_info = match input.buyer_nationality {
        BuyerNationality::Foreigner => Some(foreigner_guidance(input.property_type)),
        BuyerNationality::Thai => None,
    };

    Ok(TransferResult {
        breakdown,
        totals: TransferTotals {
            grand_total,
            buyer_pays,
            seller_pays,
        },
        incentive_savings: IncentiveSavings {
            qualifies,
            total_without_incentive,
            total_with_incentive: grand_total,
            amount_saved,
            deadline: policy.incentive_deadline,
        },
        foreigner_info,
        fee_split,
        warnings,
        metadata: ResultMetadata::now(input.currency.clone().unwrap_or_default()),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_input() -> TransferInput {
        TransferInput {
            purchase_price: dec!(5_000_000),
            registered_value: dec!(4_500_000),
            years_owned: 3,
            seller_type: SellerType::Individual,
            buyer_nationality: BuyerNationality::Thai,
            property_type: PropertyType::Condo,
            apply_incentive: true,
            loan_amount: dec!(0),
            fee_split_preset: FeeSplitPreset::Standard,
            custom_fee_split: None,
            as_of: None,
            currency: None,
        }
    }

    fn item(result: &TransferResult, category: TaxCategory) -> &TaxBreakdownItem {
        result
            .breakdown
            .iter()
            .find(|i| i.category == category)
            .unwrap()
    }

    #[test]
    fn reference_scenario() {
        // 5M price / 4.5M registered / 3 years / individual / incentive / cash
        let result = calculate_transfer_costs(&TaxPolicy::default(), &base_input()).unwrap();

        assert_eq!(item(&result, TaxCategory::TransferFee).amount, dec!(450));
        assert_eq!(
            item(&result, TaxCategory::SpecificBusinessTax).amount,
            dec!(165_000)
        );
        assert!(!item(&result, TaxCategory::StampDuty).applicable);
        assert_eq!(item(&result, TaxCategory::StampDuty).amount, dec!(0));
        assert_eq!(
            item(&result, TaxCategory::WithholdingTax).amount,
            dec!(461_250)
        );
        assert_eq!(item(&result, TaxCategory::MortgageRegistration).amount, dec!(0));

        assert_eq!(result.totals.grand_total, dec!(626_700));
        assert_eq!(result.incentive_savings.total_without_incentive, dec!(716_250));
        assert_eq!(result.incentive_savings.amount_saved, dec!(89_550));
        assert!(result.incentive_savings.qualifies);

        // Standard 50/50 split
        assert_eq!(result.totals.buyer_pays, dec!(313_350));
        assert_eq!(result.totals.seller_pays, dec!(313_350));
    }

    #[test]
    fn grand_total_is_sum_of_items() {
        let mut input = base_input();
        input.loan_amount = dec!(3_000_000);
        input.years_owned = 7;
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        let sum: Money = result.breakdown.iter().map(|i| i.amount).sum();
        assert_eq!(result.totals.grand_total, sum);
    }

    #[test]
    fn exactly_one_of_sbt_and_stamp_applies() {
        for years in 0..10 {
            let mut input = base_input();
            input.years_owned = years;
            let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
            let sbt = item(&result, TaxCategory::SpecificBusinessTax).applicable;
            let stamp = item(&result, TaxCategory::StampDuty).applicable;
            assert_ne!(sbt, stamp, "years = {years}");
        }
    }

    #[test]
    fn cash_purchase_has_no_mortgage_fee() {
        let result = calculate_transfer_costs(&TaxPolicy::default(), &base_input()).unwrap();
        let mortgage = item(&result, TaxCategory::MortgageRegistration);
        assert!(!mortgage.applicable);
        assert_eq!(mortgage.amount, dec!(0));
    }

    #[test]
    fn incentive_not_requested_saves_nothing() {
        let mut input = base_input();
        input.apply_incentive = false;
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert_eq!(result.incentive_savings.amount_saved, dec!(0));
        assert!(result.incentive_savings.qualifies); // value test still true
        assert_eq!(result.totals.grand_total, dec!(716_250));
    }

    #[test]
    fn incentive_over_cap_saves_nothing() {
        let mut input = base_input();
        input.purchase_price = dec!(9_500_000);
        input.registered_value = dec!(9_000_000);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert!(!result.incentive_savings.qualifies);
        assert_eq!(result.incentive_savings.amount_saved, dec!(0));
        assert!(result.warnings.iter().any(|w| w.contains("cap")));
        // Transfer fee at the standard 2%
        assert_eq!(item(&result, TaxCategory::TransferFee).amount, dec!(180_000));
    }

    #[test]
    fn as_of_past_deadline_disables_incentive() {
        let mut input = base_input();
        input.as_of = NaiveDate::from_ymd_opt(2027, 1, 15);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert_eq!(result.incentive_savings.amount_saved, dec!(0));
        assert_eq!(item(&result, TaxCategory::TransferFee).amount, dec!(90_000));
        assert!(result.warnings.iter().any(|w| w.contains("measure ended")));
    }

    #[test]
    fn incentive_reduces_mortgage_fee_too() {
        let mut input = base_input();
        input.loan_amount = dec!(2_000_000);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert_eq!(item(&result, TaxCategory::MortgageRegistration).amount, dec!(200));
        // Saved: transfer fee (90,000 - 450) + mortgage (20,000 - 200)
        assert_eq!(result.incentive_savings.amount_saved, dec!(109_350));
    }

    #[test]
    fn foreigner_info_only_for_foreign_buyers() {
        let thai = calculate_transfer_costs(&TaxPolicy::default(), &base_input()).unwrap();
        assert!(thai.foreigner_info.is_none());

        let mut input = base_input();
        input.buyer_nationality = BuyerNationality::Foreigner;
        input.property_type = PropertyType::HouseWithLand;
        let foreign = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        let info = foreign.foreigner_info.unwrap();
        assert!(info.fet_required);
    }

    #[test]
    fn developer_preset_shifts_seller_taxes() {
        let mut input = base_input();
        input.seller_type = SellerType::Developer;
        input.fee_split_preset = FeeSplitPreset::DeveloperStandard;
        input.loan_amount = dec!(4_000_000);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();

        let wht = item(&result, TaxCategory::WithholdingTax);
        assert_eq!(wht.buyer_amount, dec!(0));
        assert_eq!(wht.seller_amount, wht.amount);

        let mortgage = item(&result, TaxCategory::MortgageRegistration);
        assert_eq!(mortgage.seller_amount, dec!(0));
        assert_eq!(mortgage.buyer_amount, mortgage.amount);
    }

    #[test]
    fn custom_preset_without_config_falls_back() {
        let mut input = base_input();
        input.fee_split_preset = FeeSplitPreset::Custom;
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("custom")));
        assert_eq!(result.fee_split.transfer_fee.buyer_percent, dec!(50));
    }

    #[test]
    fn invalid_custom_split_rejected() {
        let mut config = FeeSplitConfig::uniform(dec!(50));
        config.transfer_fee = Distribution {
            buyer_percent: dec!(70),
            seller_percent: dec!(40),
        };
        let mut input = base_input();
        input.fee_split_preset = FeeSplitPreset::Custom;
        input.custom_fee_split = Some(config);
        let err = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap_err();
        match err {
            TransferTaxError::InvalidInput { field, .. } => {
                assert!(field.contains("custom_fee_split"));
            }
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut input = base_input();
        input.purchase_price = dec!(0);
        assert!(calculate_transfer_costs(&TaxPolicy::default(), &input).is_err());
    }

    #[test]
    fn loan_above_price_warns_but_computes() {
        let mut input = base_input();
        input.loan_amount = dec!(6_000_000);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("exceeds purchase price")));
        assert!(item(&result, TaxCategory::MortgageRegistration).applicable);
    }

    #[test]
    fn buyer_and_seller_sides_sum_within_rounding() {
        let mut input = base_input();
        input.custom_fee_split = Some(FeeSplitConfig::uniform(dec!(33)));
        input.fee_split_preset = FeeSplitPreset::Custom;
        input.loan_amount = dec!(1_234_567);
        let result = calculate_transfer_costs(&TaxPolicy::default(), &input).unwrap();
        for item in &result.breakdown {
            let drift = (item.buyer_amount + item.seller_amount - item.amount).abs();
            assert!(drift <= dec!(1), "{}: drift {}", item.label, drift);
        }
    }

    #[test]
    fn metadata_defaults_to_thb() {
        let result = calculate_transfer_costs(&TaxPolicy::default(), &base_input()).unwrap();
        assert_eq!(result.metadata.currency, Currency::THB);
        assert!(!result.metadata.engine_version.is_empty());
    }
}
