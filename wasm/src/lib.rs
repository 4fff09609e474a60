//! WebAssembly module for the Tranche Monitor
//!
//! Browser-side helpers for:
//! - EIP-55 address checksumming
//! - Scaling raw token amounts by their decimals
//! - Holder share of a tranche's supply

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{balance_id, validate_address, Address, TokenAmount};
use wasm_bindgen::prelude::*;

fn checksum(input: &str) -> Result<String, String> {
    validate_address(input)
        .map(|address| address.to_checksum())
        .map_err(str::to_string)
}

fn scale(raw: &str, decimals: u32) -> Result<String, String> {
    let amount: TokenAmount = raw.parse().map_err(|e| format!("{}", e))?;
    Ok(amount.display_scaled(decimals))
}

fn share_percent(balance: &str, total: &str) -> Option<f64> {
    let balance: TokenAmount = balance.parse().ok()?;
    let total: TokenAmount = total.parse().ok()?;
    if total.is_zero() {
        return None;
    }

    // Amounts past Decimal's 96-bit range fall back to the float ratio
    let share = decimal_share(balance, total)
        .unwrap_or_else(|| balance.raw() as f64 / total.raw() as f64 * 100.0);
    Some((share * 10_000.0).round() / 10_000.0)
}

fn decimal_share(balance: TokenAmount, total: TokenAmount) -> Option<f64> {
    let balance = Decimal::try_from_i128_with_scale(i128::try_from(balance.raw()).ok()?, 0).ok()?;
    let total = Decimal::try_from_i128_with_scale(i128::try_from(total.raw()).ok()?, 0).ok()?;
    balance
        .checked_div(total)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp(4)
        .to_f64()
}

fn account_balance_id(account: &str, tranche: &str) -> Result<String, String> {
    let account: Address = validate_address(account).map_err(str::to_string)?;
    let tranche: Address = validate_address(tranche).map_err(str::to_string)?;
    Ok(balance_id(&account, &tranche))
}

/// EIP-55 checksum form of an address given in any case
#[wasm_bindgen]
pub fn to_checksum_address(input: &str) -> Result<String, JsValue> {
    checksum(input).map_err(|e| JsValue::from_str(&e))
}

#[wasm_bindgen]
pub fn is_valid_address(input: &str) -> bool {
    validate_address(input).is_ok()
}

/// Raw on-chain amount divided by `10^decimals`
#[wasm_bindgen]
pub fn format_token_amount(raw: &str, decimals: u32) -> Result<String, JsValue> {
    scale(raw, decimals).map_err(|e| JsValue::from_str(&e))
}

/// Percentage of `total` held by `balance`; 0 when it cannot be computed
#[wasm_bindgen]
pub fn holder_share_percent(balance: &str, total: &str) -> f64 {
    share_percent(balance, total).unwrap_or(0.0)
}

/// Subgraph id of an account's balance in a tranche
#[wasm_bindgen]
pub fn tranche_balance_id(account: &str, tranche: &str) -> Result<String, JsValue> {
    account_balance_id(account, tranche).map_err(|e| JsValue::from_str(&e))
}
