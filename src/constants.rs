//! Constants and precision values for the SwapDesk terminal

use alloy::primitives::U256;

/// Marker bytes the engine embeds in calldata where a permit signature
/// belongs (65 bytes, the length of an EIP-712 signature).
pub const PERMIT_SIGNATURE_PLACEHOLDER: [u8; 65] = [0x11; 65];

/// Hex length of an EIP-712 signature without its `0x` prefix
pub const SIGNATURE_HEX_LEN: usize = 130;

/// Default slippage tolerance in basis points (300 = 3%)
pub const DEFAULT_SLIPPAGE_BPS: u32 = 300;

/// Native currencies (ETH, BNB) use 18 decimals
pub const NATIVE_DECIMALS: u8 = 18;

/// Balances and deltas are displayed with 6 decimal places
pub const DISPLAY_DECIMALS: usize = 6;

/// Unscale a U256 value to floating point with specified decimals
pub fn unscale_from_decimals(value: U256, decimals: u8) -> f64 {
    let divisor = 10f64.powi(decimals as i32);
    let value_u128: u128 = value.try_into().unwrap_or(u128::MAX);
    value_u128 as f64 / divisor
}

/// Format an amount for display (6 decimal places)
pub fn format_amount(value: f64) -> String {
    format!("{:.prec$}", value, prec = DISPLAY_DECIMALS)
}

/// Format a balance change for display (explicit sign, 6 decimal places)
pub fn format_delta(value: f64) -> String {
    format!("{:+.prec$}", value, prec = DISPLAY_DECIMALS)
}
