use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Transfer costs
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_transfer_costs(input_json: String) -> NapiResult<String> {
    let input: transfer_tax_core::transfer::TransferInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = transfer_tax_core::transfer::calculate_transfer_costs(
        &transfer_tax_core::policy::TaxPolicy::default(),
        &input,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn foreigner_guidance(property_type_json: String) -> NapiResult<String> {
    let property: transfer_tax_core::types::PropertyType =
        serde_json::from_str(&property_type_json).map_err(to_napi_error)?;
    let output = transfer_tax_core::foreigner::foreigner_guidance(property);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Shareable state
// ---------------------------------------------------------------------------

#[napi]
pub fn encode_share_state(input_json: String) -> NapiResult<String> {
    let input: transfer_tax_core::transfer::TransferInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(transfer_tax_core::share::encode_share_state(&input))
}

#[napi]
pub fn decode_share_state(query: String) -> NapiResult<String> {
    let input = transfer_tax_core::share::decode_share_state(&query);
    serde_json::to_string(&input).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Currency helpers
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct FormatBindingInput {
    amount: rust_decimal::Decimal,
    currency: transfer_tax_core::types::Currency,
    #[serde(default)]
    decimals: u32,
}

#[napi]
pub fn format_money(input_json: String) -> NapiResult<String> {
    let input: FormatBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(transfer_tax_core::currency::format_money_with(
        input.amount,
        &input.currency,
        input.decimals,
    ))
}

#[derive(serde::Deserialize)]
struct ConvertBindingInput {
    #[serde(flatten)]
    table: transfer_tax_core::currency::RateTable,
    amount: rust_decimal::Decimal,
    from: transfer_tax_core::types::Currency,
    to: transfer_tax_core::types::Currency,
}

#[napi]
pub fn convert_money(input_json: String) -> NapiResult<String> {
    let input: ConvertBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let converted =
        transfer_tax_core::currency::convert(&input.table, input.amount, &input.from, &input.to)
            .map_err(to_napi_error)?;
    Ok(converted.to_string())
}
