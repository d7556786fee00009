use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.02 = 2%). Never as percentages.
pub type Rate = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    THB,
    USD,
    EUR,
    GBP,
    JPY,
    CNY,
    SGD,
    AUD,
    Other(String),
}

impl Currency {
    /// Display symbol used by the formatter.
    pub fn symbol(&self) -> &str {
        match self {
            Currency::THB => "฿",
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CNY => "¥",
            Currency::SGD => "S$",
            Currency::AUD => "A$",
            Currency::Other(code) => code.as_str(),
        }
    }
}

impl FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "THB" => Currency::THB,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "GBP" => Currency::GBP,
            "JPY" => Currency::JPY,
            "CNY" => Currency::CNY,
            "SGD" => Currency::SGD,
            "AUD" => Currency::AUD,
            other => Currency::Other(other.to_string()),
        })
    }
}

/// Who is selling the property. Drives the withholding-tax method and the
/// developer fee-split conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SellerType {
    #[default]
    Individual,
    Company,
    Developer,
}

impl FromStr for SellerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(SellerType::Individual),
            "company" => Ok(SellerType::Company),
            "developer" => Ok(SellerType::Developer),
            other => Err(format!("unknown seller type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyerNationality {
    #[default]
    Thai,
    Foreigner,
}

impl FromStr for BuyerNationality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thai" => Ok(BuyerNationality::Thai),
            "foreigner" | "foreign" => Ok(BuyerNationality::Foreigner),
            other => Err(format!("unknown nationality '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Condo,
    HouseWithLand,
    LandOnly,
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "condo" => Ok(PropertyType::Condo),
            "house_with_land" | "house" => Ok(PropertyType::HouseWithLand),
            "land_only" | "land" => Ok(PropertyType::LandOnly),
            other => Err(format!("unknown property type '{other}'")),
        }
    }
}

/// The five government charges levied on an ownership transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    TransferFee,
    SpecificBusinessTax,
    StampDuty,
    WithholdingTax,
    MortgageRegistration,
}

impl TaxCategory {
    /// Breakdown order is fixed: fee, SBT, stamp, WHT, mortgage.
    pub const ALL: [TaxCategory; 5] = [
        TaxCategory::TransferFee,
        TaxCategory::SpecificBusinessTax,
        TaxCategory::StampDuty,
        TaxCategory::WithholdingTax,
        TaxCategory::MortgageRegistration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaxCategory::TransferFee => "Transfer Fee",
            TaxCategory::SpecificBusinessTax => "Specific Business Tax",
            TaxCategory::StampDuty => "Stamp Duty",
            TaxCategory::WithholdingTax => "Withholding Tax",
            TaxCategory::MortgageRegistration => "Mortgage Registration",
        }
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata stamped on every calculation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub timestamp: DateTime<Utc>,
    pub currency: Currency,
    pub engine_version: String,
}

impl ResultMetadata {
    pub fn now(currency: Currency) -> Self {
        ResultMetadata {
            timestamp: Utc::now(),
            currency,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
