//! JSON-string bindings for the Next.js back office. Each function takes the
//! core input type serialized as JSON and returns the full computation
//! envelope the host persists on the case record.

use std::sync::OnceLock;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use precatorio_core::indices::tables::IndexTables;
use precatorio_core::settlement::proposal::HeirQuota;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// The embedded index dataset, built once per process.
fn tables() -> &'static IndexTables {
    static TABLES: OnceLock<IndexTables> = OnceLock::new();
    TABLES.get_or_init(IndexTables::brazil)
}

// ---------------------------------------------------------------------------
// Monetary correction
// ---------------------------------------------------------------------------

#[napi]
pub fn correct_value(input_json: String) -> NapiResult<String> {
    let input: precatorio_core::correction::engine::CorrectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = precatorio_core::correction::engine::correct_value(&input, tables())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax withholding
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_irpf(input_json: String) -> NapiResult<String> {
    let input: precatorio_core::tax::irpf::IrpfInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = precatorio_core::tax::irpf::calculate_irpf(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_pss(input_json: String) -> NapiResult<String> {
    let input: precatorio_core::tax::pss::PssInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = precatorio_core::tax::pss::calculate_pss(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Offers and heirs
// ---------------------------------------------------------------------------

#[napi]
pub fn derive_offers(input_json: String) -> NapiResult<String> {
    let input: precatorio_core::settlement::proposal::OfferInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        precatorio_core::settlement::proposal::derive_offers(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct SplitRequest {
    amount: Decimal,
    quotas: Vec<HeirQuota>,
}

#[napi]
pub fn split_heirs(input_json: String) -> NapiResult<String> {
    let request: SplitRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let shares = precatorio_core::settlement::proposal::split_heirs(request.amount, &request.quotas)
        .map_err(to_napi_error)?;
    serde_json::to_string(&shares).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Full settlement
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_settlement(input_json: String) -> NapiResult<String> {
    let input: precatorio_core::settlement::pipeline::SettlementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = precatorio_core::settlement::pipeline::calculate_settlement(&input, tables())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
