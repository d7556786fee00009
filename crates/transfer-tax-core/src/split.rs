use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TransferTaxError;
use crate::policy::round_whole;
use crate::types::{Money, TaxCategory};
use crate::TransferTaxResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Named buyer/seller split conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeSplitPreset {
    #[default]
    Standard,
    BuyerPaysAll,
    SellerPaysAll,
    DeveloperStandard,
    Custom,
}

impl FromStr for FeeSplitPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(FeeSplitPreset::Standard),
            "buyer_pays_all" => Ok(FeeSplitPreset::BuyerPaysAll),
            "seller_pays_all" => Ok(FeeSplitPreset::SellerPaysAll),
            "developer_standard" => Ok(FeeSplitPreset::DeveloperStandard),
            "custom" => Ok(FeeSplitPreset::Custom),
            other => Err(format!("unknown fee split preset '{other}'")),
        }
    }
}

/// Percentage division of one tax between buyer and seller.
/// Invariant: the two percentages sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub buyer_percent: Decimal,
    pub seller_percent: Decimal,
}

impl Distribution {
    /// Build a distribution from the buyer's share; the seller takes the rest.
    pub fn buyer_share(buyer_percent: Decimal) -> Self {
        Distribution {
            buyer_percent,
            seller_percent: dec!(100) - buyer_percent,
        }
    }

    /// Split an amount into (buyer, seller) portions. Each side is rounded
    /// independently, so the pair may drift from the original amount by up
    /// to one currency unit. That drift is accepted, not reconciled.
    pub fn split(&self, amount: Money) -> (Money, Money) {
        let buyer = round_whole(amount * self.buyer_percent / dec!(100));
        let seller = round_whole(amount * self.seller_percent / dec!(100));
        (buyer, seller)
    }

    fn sums_to_hundred(&self) -> bool {
        self.buyer_percent + self.seller_percent == dec!(100)
    }
}

/// One distribution per tax category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplitConfig {
    pub transfer_fee: Distribution,
    pub specific_business_tax: Distribution,
    pub stamp_duty: Distribution,
    pub withholding_tax: Distribution,
    pub mortgage_registration: Distribution,
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

impl FeeSplitConfig {
    /// Same buyer share on all five categories.
    pub fn uniform(buyer_percent: Decimal) -> Self {
        let d = Distribution::buyer_share(buyer_percent);
        FeeSplitConfig {
            transfer_fee: d,
            specific_business_tax: d,
            stamp_duty: d,
            withholding_tax: d,
            mortgage_registration: d,
        }
    }

    /// Typical new-build convention: the developer carries the seller-side
    /// taxes, the transfer fee is shared, and the buyer registers the loan.
    pub fn developer_standard() -> Self {
        FeeSplitConfig {
            transfer_fee: Distribution::buyer_share(dec!(50)),
            specific_business_tax: Distribution::buyer_share(dec!(0)),
            stamp_duty: Distribution::buyer_share(dec!(0)),
            withholding_tax: Distribution::buyer_share(dec!(0)),
            mortgage_registration: Distribution::buyer_share(dec!(100)),
        }
    }

    /// Resolve a non-custom preset to its configuration. `Custom` falls back
    /// to the standard 50/50 split; the caller supplies the real config.
    pub fn for_preset(preset: FeeSplitPreset) -> Self {
        match preset {
            FeeSplitPreset::Standard | FeeSplitPreset::Custom => Self::uniform(dec!(50)),
            FeeSplitPreset::BuyerPaysAll => Self::uniform(dec!(100)),
            FeeSplitPreset::SellerPaysAll => Self::uniform(dec!(0)),
            FeeSplitPreset::DeveloperStandard => Self::developer_standard(),
        }
    }

    pub fn distribution(&self, category: TaxCategory) -> Distribution {
        match category {
            TaxCategory::TransferFee => self.transfer_fee,
            TaxCategory::SpecificBusinessTax => self.specific_business_tax,
            TaxCategory::StampDuty => self.stamp_duty,
            TaxCategory::WithholdingTax => self.withholding_tax,
            TaxCategory::MortgageRegistration => self.mortgage_registration,
        }
    }

    /// Every category's percentages must sum to 100.
    pub fn validate(&self) -> TransferTaxResult<()> {
        for category in TaxCategory::ALL {
            let d = self.distribution(category);
            if !d.sums_to_hundred() {
                return Err(TransferTaxError::InvalidInput {
                    field: format!("custom_fee_split.{category}"),
                    reason: format!(
                        "buyer {} + seller {} must sum to 100",
                        d.buyer_percent, d.seller_percent
                    ),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_even_amount() {
        let d = Distribution::buyer_share(dec!(50));
        assert_eq!(d.split(dec!(90_000)), (dec!(45_000), dec!(45_000)));
    }

    #[test]
    fn split_rounds_each_side_independently() {
        let d = Distribution::buyer_share(dec!(50));
        let (buyer, seller) = d.split(dec!(101));
        // Both halves are 50.5 and round away from zero
        assert_eq!(buyer, dec!(51));
        assert_eq!(seller, dec!(51));
        assert!((buyer + seller - dec!(101)).abs() <= dec!(1));
    }

    #[test]
    fn split_drift_is_bounded_for_odd_percentages() {
        let d = Distribution::buyer_share(dec!(33));
        for amount in [dec!(1), dec!(99), dec!(12_345), dec!(165_000)] {
            let (buyer, seller) = d.split(amount);
            assert!((buyer + seller - amount).abs() <= dec!(1), "amount = {amount}");
        }
    }

    #[test]
    fn preset_configs() {
        let all_buyer = FeeSplitConfig::for_preset(FeeSplitPreset::BuyerPaysAll);
        assert_eq!(all_buyer.withholding_tax.buyer_percent, dec!(100));
        assert_eq!(all_buyer.withholding_tax.seller_percent, dec!(0));

        let all_seller = FeeSplitConfig::for_preset(FeeSplitPreset::SellerPaysAll);
        assert_eq!(all_seller.transfer_fee.buyer_percent, dec!(0));

        let dev = FeeSplitConfig::for_preset(FeeSplitPreset::DeveloperStandard);
        assert_eq!(dev.transfer_fee.buyer_percent, dec!(50));
        assert_eq!(dev.specific_business_tax.buyer_percent, dec!(0));
        assert_eq!(dev.mortgage_registration.buyer_percent, dec!(100));
    }

    #[test]
    fn presets_always_validate() {
        for preset in [
            FeeSplitPreset::Standard,
            FeeSplitPreset::BuyerPaysAll,
            FeeSplitPreset::SellerPaysAll,
            FeeSplitPreset::DeveloperStandard,
        ] {
            assert!(FeeSplitConfig::for_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn custom_config_must_sum_to_hundred() {
        let mut config = FeeSplitConfig::uniform(dec!(50));
        config.stamp_duty = Distribution {
            buyer_percent: dec!(60),
            seller_percent: dec!(50),
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Stamp Duty"));
    }

    #[test]
    fn preset_from_str() {
        assert_eq!("standard".parse(), Ok(FeeSplitPreset::Standard));
        assert_eq!("buyer_pays_all".parse(), Ok(FeeSplitPreset::BuyerPaysAll));
        assert!("fifty_fifty".parse::<FeeSplitPreset>().is_err());
    }
}
