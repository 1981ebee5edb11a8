//! Order types accepted by the trade engine

use crate::constants::DEFAULT_SLIPPAGE_BPS;
use crate::error::{eyre, Report};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "buy"),
            TradeDirection::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TradeDirection {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(TradeDirection::Buy),
            "sell" => Ok(TradeDirection::Sell),
            other => Err(eyre!("Unknown direction '{}' (expected buy or sell)", other)),
        }
    }
}

/// Parameters for a new order, serialized as the engine expects
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Wallet that will sign the resulting transactions
    pub signer: Address,
    /// ERC20 token to trade
    pub token: Address,
    /// Human-readable amount, passed through verbatim
    pub amount: String,
    /// Buy or sell
    pub direction: TradeDirection,
    /// Slippage tolerance in basis points (300 = 3%)
    pub slippage_bps: u32,
    /// Route through private order flow
    pub mev_protection: bool,
    /// Target chain ID
    pub chain_id: u64,
}

impl OrderRequest {
    /// Create an order with default slippage and MEV protection on
    pub fn new(
        signer: Address,
        token: Address,
        amount: impl Into<String>,
        direction: TradeDirection,
        chain_id: u64,
    ) -> Self {
        Self {
            signer,
            token,
            amount: amount.into(),
            direction,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            mev_protection: true,
            chain_id,
        }
    }

    /// Set slippage tolerance in basis points
    pub fn with_slippage_bps(mut self, slippage_bps: u32) -> Self {
        self.slippage_bps = slippage_bps;
        self
    }
}
