use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use transfer_tax_core::currency::{convert, format_money_with, RateTable};
use transfer_tax_core::types::Currency;

use crate::input;

/// Arguments for currency conversion and formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ConvertArgs {
    /// Amount to convert
    #[arg(long)]
    pub amount: Decimal,

    /// Source currency code
    #[arg(long, default_value = "THB")]
    pub from: Currency,

    /// Target currency code
    #[arg(long, default_value = "THB")]
    pub to: Currency,

    /// Path to a JSON rate table ({"rates": [{"currency": "USD", "thb_per_unit": "36"}]})
    #[arg(long)]
    pub rates: Option<String>,

    /// Decimal places in the formatted output
    #[arg(long, default_value = "0")]
    pub decimals: u32,
}

pub fn run_convert(args: ConvertArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table: RateTable = match args.rates {
        Some(ref path) => input::file::read_json(path)?,
        None => RateTable::default(),
    };

    let converted = convert(&table, args.amount, &args.from, &args.to)?;

    Ok(json!({
        "amount": args.amount.to_string(),
        "from": args.from,
        "to": args.to,
        "converted": converted.to_string(),
        "formatted": format_money_with(converted, &args.to, args.decimals),
    }))
}
