use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use transfer_tax_core::policy::TaxPolicy;
use transfer_tax_core::split::FeeSplitPreset;
use transfer_tax_core::transfer::{calculate_transfer_costs, TransferInput};
use transfer_tax_core::types::{BuyerNationality, PropertyType, SellerType};

use crate::input;

/// Arguments for the transfer cost calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalculateArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Negotiated purchase price in whole currency units
    #[arg(long, alias = "price")]
    pub purchase_price: Option<Decimal>,

    /// Land Department appraised value
    #[arg(long, alias = "registered")]
    pub registered_value: Option<Decimal>,

    /// Seller's holding period in whole years
    #[arg(long, alias = "years", default_value = "1")]
    pub years_owned: u32,

    /// Seller type: individual, company, or developer
    #[arg(long, default_value = "individual")]
    pub seller: SellerType,

    /// Buyer nationality: thai or foreigner
    #[arg(long, default_value = "thai")]
    pub nationality: BuyerNationality,

    /// Property type: condo, house_with_land, or land_only
    #[arg(long, default_value = "condo")]
    pub property: PropertyType,

    /// Request the reduced-rate government incentive
    #[arg(long)]
    pub incentive: bool,

    /// Loan amount (0 for a cash purchase)
    #[arg(long, default_value = "0")]
    pub loan: Decimal,

    /// Fee split preset: standard, buyer_pays_all, seller_pays_all,
    /// developer_standard (custom requires --input)
    #[arg(long, default_value = "standard")]
    pub split: FeeSplitPreset,

    /// Transfer date used to test the incentive deadline (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let transfer_input: TransferInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TransferInput {
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            registered_value: args
                .registered_value
                .ok_or("--registered-value is required (or provide --input)")?,
            years_owned: args.years_owned,
            seller_type: args.seller,
            buyer_nationality: args.nationality,
            property_type: args.property,
            apply_incentive: args.incentive,
            loan_amount: args.loan,
            fee_split_preset: args.split,
            custom_fee_split: None,
            as_of: args.as_of,
            currency: None,
        }
    };

    let result = calculate_transfer_costs(&TaxPolicy::default(), &transfer_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn flags_build_a_working_input() {
        let args = CalculateArgs {
            input: None,
            purchase_price: Some(dec!(5_000_000)),
            registered_value: Some(dec!(4_500_000)),
            years_owned: 3,
            seller: SellerType::Individual,
            nationality: BuyerNationality::Thai,
            property: PropertyType::Condo,
            incentive: true,
            loan: dec!(0),
            split: FeeSplitPreset::Standard,
            as_of: None,
        };
        let value = run_calculate(args).unwrap();
        assert_eq!(value["totals"]["grand_total"], "626700");
    }

    #[test]
    fn missing_price_is_a_flag_error() {
        let args = CalculateArgs {
            input: None,
            purchase_price: None,
            registered_value: Some(dec!(1_000_000)),
            years_owned: 1,
            seller: SellerType::Individual,
            nationality: BuyerNationality::Thai,
            property: PropertyType::Condo,
            incentive: false,
            loan: dec!(0),
            split: FeeSplitPreset::Standard,
            as_of: None,
        };
        assert!(run_calculate(args).is_err());
    }
}
