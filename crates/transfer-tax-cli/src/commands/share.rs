use clap::Args;
use serde_json::{json, Value};

use transfer_tax_core::share::{decode_share_state, encode_share_state};
use transfer_tax_core::transfer::TransferInput;

use crate::input;

/// Arguments for encoding an input to shareable query parameters
#[derive(Args)]
pub struct ShareArgs {
    /// Path to JSON input file (otherwise read from stdin)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for decoding shareable query parameters
#[derive(Args)]
pub struct DecodeArgs {
    /// The query string, with or without a leading '?'
    pub query: String,
}

pub fn run_share(args: ShareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let transfer_input: TransferInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("provide --input or pipe an input JSON on stdin".into());
    };

    Ok(json!({ "query": encode_share_state(&transfer_input) }))
}

pub fn run_decode(args: DecodeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let decoded = decode_share_state(&args.query);
    Ok(serde_json::to_value(decoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_total() {
        let value = run_decode(DecodeArgs {
            query: "?price=1000000&years=oops".to_string(),
        })
        .unwrap();
        assert_eq!(value["purchase_price"], "1000000");
        assert_eq!(value["years_owned"], 1);
    }
}
