//! Shareable-state encoding: a `TransferInput` flattened to query-string
//! parameters so a calculation can travel in a link. Decoding is total —
//! every missing or unparseable field falls back to a documented default,
//! never an error.

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::split::FeeSplitPreset;
use crate::transfer::TransferInput;
use crate::types::{BuyerNationality, Money, PropertyType, SellerType};

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn seller_token(seller: SellerType) -> &'static str {
    match seller {
        SellerType::Individual => "individual",
        SellerType::Company => "company",
        SellerType::Developer => "developer",
    }
}

fn nationality_token(nationality: BuyerNationality) -> &'static str {
    match nationality {
        BuyerNationality::Thai => "thai",
        BuyerNationality::Foreigner => "foreigner",
    }
}

fn property_token(property: PropertyType) -> &'static str {
    match property {
        PropertyType::Condo => "condo",
        PropertyType::HouseWithLand => "house_with_land",
        PropertyType::LandOnly => "land_only",
    }
}

fn preset_token(preset: FeeSplitPreset) -> &'static str {
    match preset {
        FeeSplitPreset::Standard => "standard",
        FeeSplitPreset::BuyerPaysAll => "buyer_pays_all",
        FeeSplitPreset::SellerPaysAll => "seller_pays_all",
        FeeSplitPreset::DeveloperStandard => "developer_standard",
        FeeSplitPreset::Custom => "custom",
    }
}

fn money_token(amount: Money) -> String {
    amount.normalize().to_string()
}

/// Flatten an input to `key=value` pairs joined with `&`. A custom fee-split
/// configuration has no flat representation; only its preset name travels.
pub fn encode_share_state(input: &TransferInput) -> String {
    let newbuild = u8::from(input.seller_type == SellerType::Developer);
    let pairs = [
        ("price", money_token(input.purchase_price)),
        ("registered", money_token(input.registered_value)),
        ("years", input.years_owned.to_string()),
        ("seller", seller_token(input.seller_type).to_string()),
        (
            "nationality",
            nationality_token(input.buyer_nationality).to_string(),
        ),
        ("property", property_token(input.property_type).to_string()),
        ("newbuild", newbuild.to_string()),
        ("loan", money_token(input.loan_amount)),
        ("incentive", u8::from(input.apply_incentive).to_string()),
        ("split", preset_token(input.fee_split_preset).to_string()),
    ];

    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn parse_money(params: &HashMap<&str, &str>, key: &str) -> Money {
    params
        .get(key)
        .and_then(|v| v.parse::<Decimal>().ok())
        .unwrap_or(Decimal::ZERO)
}

fn parse_flag(params: &HashMap<&str, &str>, key: &str, default: bool) -> bool {
    match params.get(key) {
        Some(&"0") => false,
        Some(&"1") => true,
        _ => default,
    }
}

/// Rebuild a `TransferInput` from a query string (with or without a leading
/// `?`). Defaults: price/registered/loan 0, years 1, individual Thai condo,
/// incentive applied, standard split. `buyer` is honoured as a legacy alias
/// of `nationality`, and `newbuild=1` implies a developer seller when no
/// explicit seller type is present. A `split=custom` value decodes to the
/// standard preset because the distributions themselves do not travel.
pub fn decode_share_state(query: &str) -> TransferInput {
    let query = query.strip_prefix('?').unwrap_or(query);
    let params: HashMap<&str, &str> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();

    let newbuild = parse_flag(&params, "newbuild", false);
    let seller_type = params
        .get("seller")
        .and_then(|v| v.parse::<SellerType>().ok())
        .unwrap_or(if newbuild {
            SellerType::Developer
        } else {
            SellerType::Individual
        });

    let buyer_nationality = params
        .get("nationality")
        .or_else(|| params.get("buyer"))
        .and_then(|v| v.parse::<BuyerNationality>().ok())
        .unwrap_or_default();

    let property_type = params
        .get("property")
        .and_then(|v| v.parse::<PropertyType>().ok())
        .unwrap_or_default();

    let fee_split_preset = params
        .get("split")
        .and_then(|v| v.parse::<FeeSplitPreset>().ok())
        .map(|preset| match preset {
            // No flat encoding exists for the custom distributions
            FeeSplitPreset::Custom => FeeSplitPreset::Standard,
            other => other,
        })
        .unwrap_or_default();

    TransferInput {
        purchase_price: parse_money(&params, "price"),
        registered_value: parse_money(&params, "registered"),
        years_owned: params
            .get("years")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1),
        seller_type,
        buyer_nationality,
        property_type,
        apply_incentive: parse_flag(&params, "incentive", true),
        loan_amount: parse_money(&params, "loan"),
        fee_split_preset,
        custom_fee_split: None,
        as_of: None,
        currency: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_input() -> TransferInput {
        TransferInput {
            purchase_price: dec!(5_000_000),
            registered_value: dec!(4_500_000),
            years_owned: 3,
            seller_type: SellerType::Individual,
            buyer_nationality: BuyerNationality::Foreigner,
            property_type: PropertyType::Condo,
            apply_incentive: true,
            loan_amount: dec!(2_000_000),
            fee_split_preset: FeeSplitPreset::DeveloperStandard,
            custom_fee_split: None,
            as_of: None,
            currency: None,
        }
    }

    #[test]
    fn encode_produces_flat_pairs() {
        let encoded = encode_share_state(&sample_input());
        assert_eq!(
            encoded,
            "price=5000000&registered=4500000&years=3&seller=individual&\
             nationality=foreigner&property=condo&newbuild=0&loan=2000000&\
             incentive=1&split=developer_standard"
        );
    }

    #[test]
    fn round_trip() {
        let input = sample_input();
        let decoded = decode_share_state(&encode_share_state(&input));
        assert_eq!(decoded.purchase_price, input.purchase_price);
        assert_eq!(decoded.registered_value, input.registered_value);
        assert_eq!(decoded.years_owned, input.years_owned);
        assert_eq!(decoded.seller_type, input.seller_type);
        assert_eq!(decoded.buyer_nationality, input.buyer_nationality);
        assert_eq!(decoded.property_type, input.property_type);
        assert_eq!(decoded.apply_incentive, input.apply_incentive);
        assert_eq!(decoded.loan_amount, input.loan_amount);
        assert_eq!(decoded.fee_split_preset, input.fee_split_preset);
    }

    #[test]
    fn re_encoding_is_idempotent() {
        let encoded = encode_share_state(&sample_input());
        let re_encoded = encode_share_state(&decode_share_state(&encoded));
        assert_eq!(encoded, re_encoded);
    }

    #[test]
    fn empty_query_yields_defaults() {
        let input = decode_share_state("");
        assert_eq!(input.purchase_price, dec!(0));
        assert_eq!(input.years_owned, 1);
        assert_eq!(input.seller_type, SellerType::Individual);
        assert_eq!(input.buyer_nationality, BuyerNationality::Thai);
        assert_eq!(input.fee_split_preset, FeeSplitPreset::Standard);
        assert!(input.apply_incentive);
    }

    #[test]
    fn garbage_values_fall_back_without_error() {
        let input =
            decode_share_state("price=abc&years=-3&seller=alien&property=boat&split=weird&&=");
        assert_eq!(input.purchase_price, dec!(0));
        assert_eq!(input.years_owned, 1);
        assert_eq!(input.seller_type, SellerType::Individual);
        assert_eq!(input.property_type, PropertyType::Condo);
        assert_eq!(input.fee_split_preset, FeeSplitPreset::Standard);
    }

    #[test]
    fn leading_question_mark_accepted() {
        let input = decode_share_state("?price=1000000&registered=900000");
        assert_eq!(input.purchase_price, dec!(1_000_000));
        assert_eq!(input.registered_value, dec!(900_000));
    }

    #[test]
    fn buyer_is_a_legacy_alias_for_nationality() {
        let input = decode_share_state("buyer=foreigner");
        assert_eq!(input.buyer_nationality, BuyerNationality::Foreigner);
        // Explicit nationality wins over the alias
        let input = decode_share_state("nationality=thai&buyer=foreigner");
        assert_eq!(input.buyer_nationality, BuyerNationality::Thai);
    }

    #[test]
    fn newbuild_implies_developer_when_seller_absent() {
        let input = decode_share_state("newbuild=1");
        assert_eq!(input.seller_type, SellerType::Developer);
        // An explicit seller type takes precedence
        let input = decode_share_state("newbuild=1&seller=individual");
        assert_eq!(input.seller_type, SellerType::Individual);
    }

    #[test]
    fn incentive_zero_decodes_to_false() {
        let input = decode_share_state("incentive=0");
        assert!(!input.apply_incentive);
    }

    #[test]
    fn custom_split_token_falls_back_to_standard() {
        let input = decode_share_state("split=custom");
        assert_eq!(input.fee_split_preset, FeeSplitPreset::Standard);
    }
}
