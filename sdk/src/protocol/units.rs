//! Conversion between display amounts and on-chain integer amounts
//!
//! SOL amounts use the fixed 10^9 lamport scale. Token amounts use
//! 10^decimals. All arithmetic goes through `Decimal`, so no precision is lost
//! to floating point and every u64 survives a round trip.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{SdkError, SdkResult, LAMPORTS_PER_SOL, SOL_DECIMALS};

/// Convert SOL to lamports, rounding half away from zero
pub fn to_base_units(amount: Decimal) -> SdkResult<u64> {
    scale_up(amount, Decimal::from(LAMPORTS_PER_SOL), "SOL amount")
}

/// Convert lamports to SOL (exact)
pub fn from_base_units(amount: u64) -> Decimal {
    Decimal::from_i128_with_scale(amount as i128, SOL_DECIMALS)
}

/// Render lamports as a SOL string with at most `precision` fractional digits
pub fn format_base_units(amount: u64, precision: u32) -> String {
    from_base_units(amount)
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// 10^decimals, if it fits in a u64
pub fn scale_factor(decimals: u8) -> SdkResult<u64> {
    10u64.checked_pow(decimals as u32).ok_or_else(|| {
        SdkError::InvalidInput(vec![format!(
            "Decimals {} produce a scale factor larger than u64",
            decimals
        )])
    })
}

/// Convert a human token amount to base units for a mint with `decimals`
pub fn to_token_base_units(amount: Decimal, decimals: u8) -> SdkResult<u64> {
    scale_up(amount, Decimal::from(scale_factor(decimals)?), "token amount")
}

/// Convert token base units back to a human amount (exact)
pub fn from_token_base_units(amount: u64, decimals: u8) -> Decimal {
    Decimal::from_i128_with_scale(amount as i128, decimals as u32)
}

/// Integer human supply to base units; `None` when the result exceeds u64
pub fn scale_supply(supply: u64, decimals: u8) -> Option<u64> {
    supply.checked_mul(10u64.checked_pow(decimals as u32)?)
}

fn scale_up(amount: Decimal, factor: Decimal, what: &str) -> SdkResult<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(SdkError::InvalidInput(vec![format!(
            "{} must not be negative, got {}",
            what, amount
        )]));
    }

    amount
        .checked_mul(factor)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_u64())
        .ok_or_else(|| {
            SdkError::InvalidInput(vec![format!(
                "{} {} does not fit in a u64 after scaling",
                what, amount
            )])
        })
}
