//! Native and ERC20 balance snapshots around a trade

use crate::config::NetworkConfig;
use crate::constants::{format_amount, format_delta, unscale_from_decimals, NATIVE_DECIMALS};
use crate::contracts::IERC20;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::http::reqwest::Url;
use eyre::{Context, Result};
use std::sync::Arc;

/// Type alias for read-only provider
pub type ReadProvider = Arc<RootProvider<Ethereum>>;

/// Connect a read-only HTTP provider for balance lookups
pub fn connect(rpc_url: &str) -> Result<ReadProvider> {
    let url: Url = rpc_url.parse().context("Invalid RPC URL")?;
    // Read-only provider without fillers (we only do eth_call operations)
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .network::<Ethereum>()
        .connect_http(url);

    Ok(Arc::new(provider))
}

/// ERC20 portion of a snapshot
#[derive(Debug, Clone)]
pub struct TokenBalance {
    /// Token contract address
    pub address: Address,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
    /// Raw balance
    pub raw: U256,
    /// Balance at display precision
    pub formatted: String,
}

/// Balances at a point in time
#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
    /// Raw native balance in wei
    pub native_raw: U256,
    /// Native balance at display precision
    pub native_formatted: String,
    /// Native currency ticker
    pub native_symbol: &'static str,
    /// Token balance, when a token was requested and readable
    pub token: Option<TokenBalance>,
}

/// Signed difference between two snapshots of the same account
#[derive(Debug, Clone)]
pub struct BalanceDelta {
    /// Native currency ticker
    pub native_symbol: &'static str,
    /// Signed native change, e.g. "-0.050000"
    pub native_change: String,
    /// Token change, when both snapshots carry the token portion
    pub token: Option<TokenDelta>,
}

/// Signed token change
#[derive(Debug, Clone)]
pub struct TokenDelta {
    /// Token symbol
    pub symbol: String,
    /// Signed change, e.g. "+5.000000"
    pub change: String,
}

impl BalanceDelta {
    /// Compute the signed change from `before` to `after`
    pub fn between(before: &BalanceSnapshot, after: &BalanceSnapshot) -> Self {
        let native_before = unscale_from_decimals(before.native_raw, NATIVE_DECIMALS);
        let native_after = unscale_from_decimals(after.native_raw, NATIVE_DECIMALS);

        let token = match (&before.token, &after.token) {
            (Some(b), Some(a)) => {
                let change = unscale_from_decimals(a.raw, a.decimals)
                    - unscale_from_decimals(b.raw, b.decimals);
                Some(TokenDelta {
                    symbol: a.symbol.clone(),
                    change: format_delta(change),
                })
            }
            _ => None,
        };

        Self {
            native_symbol: after.native_symbol,
            native_change: format_delta(native_after - native_before),
            token,
        }
    }
}

/// Take a balance snapshot for an account
///
/// An unreadable native balance yields `None` (balances unavailable); an
/// unreadable token only drops the token portion. Neither stops a trade.
pub async fn snapshot(
    provider: &ReadProvider,
    owner: Address,
    token: Option<Address>,
    network: &NetworkConfig,
) -> Option<BalanceSnapshot> {
    let native_raw = match provider.get_balance(owner).await {
        Ok(balance) => balance,
        Err(err) => {
            tracing::warn!("Native balance unavailable on {}: {}", network.name, err);
            return None;
        }
    };

    let token = match token {
        Some(address) => match fetch_token_balance(provider, address, owner).await {
            Ok(balance) => Some(balance),
            Err(err) => {
                tracing::warn!("Token balance unavailable for {}: {}", address, err);
                None
            }
        },
        None => None,
    };

    Some(BalanceSnapshot {
        native_raw,
        native_formatted: format_amount(unscale_from_decimals(native_raw, NATIVE_DECIMALS)),
        native_symbol: network.native_symbol,
        token,
    })
}

/// Fetch balance, decimals and symbol for a token in parallel
async fn fetch_token_balance(
    provider: &ReadProvider,
    token: Address,
    owner: Address,
) -> Result<TokenBalance> {
    let (raw, decimals, symbol) = tokio::join!(
        erc20_balance_of(provider, token, owner),
        erc20_decimals(provider, token),
        erc20_symbol(provider, token),
    );
    let (raw, decimals, symbol) = (raw?, decimals?, symbol?);

    Ok(TokenBalance {
        address: token,
        symbol,
        decimals,
        raw,
        formatted: format_amount(unscale_from_decimals(raw, decimals)),
    })
}

async fn erc20_balance_of(provider: &ReadProvider, token: Address, owner: Address) -> Result<U256> {
    let call = IERC20::balanceOfCall { account: owner };

    let result: Bytes = provider
        .call(
            TransactionRequest::default()
                .with_to(token)
                .with_input(call.abi_encode()),
        )
        .await
        .context("Failed to call balanceOf")?;

    IERC20::balanceOfCall::abi_decode_returns(&result).context("Failed to decode balance")
}

async fn erc20_decimals(provider: &ReadProvider, token: Address) -> Result<u8> {
    let call = IERC20::decimalsCall {};

    let result: Bytes = provider
        .call(
            TransactionRequest::default()
                .with_to(token)
                .with_input(call.abi_encode()),
        )
        .await
        .context("Failed to call decimals")?;

    IERC20::decimalsCall::abi_decode_returns(&result).context("Failed to decode decimals")
}

async fn erc20_symbol(provider: &ReadProvider, token: Address) -> Result<String> {
    let call = IERC20::symbolCall {};

    let result: Bytes = provider
        .call(
            TransactionRequest::default()
                .with_to(token)
                .with_input(call.abi_encode()),
        )
        .await
        .context("Failed to call symbol")?;

    IERC20::symbolCall::abi_decode_returns(&result).context("Failed to decode symbol")
}
