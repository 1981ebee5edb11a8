//! Trade orchestration from order request to balance delta

use crate::api::{BroadcastResult, EngineClient, SubmitOrderRequest};
use crate::balances::{self, BalanceDelta};
use crate::config::NetworkConfig;
use crate::signing;
use crate::types::{OrderRequest, TradeDirection};
use crate::wallet::TradeWallet;
use alloy::primitives::Address;
use eyre::Result;

/// User-supplied parameters for one trade
#[derive(Debug, Clone)]
pub struct TradeParams {
    /// ERC20 token to trade
    pub token: Address,
    /// Buy or sell
    pub direction: TradeDirection,
    /// Human-readable amount, passed to the engine verbatim
    pub amount: String,
    /// Slippage tolerance in basis points
    pub slippage_bps: u32,
}

/// How a trade ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Completed,
    Failed,
}

/// Outcome of one trade, ready for printing by the interactive layer
#[derive(Debug, Clone)]
pub struct TradeReport {
    /// Completed or failed
    pub outcome: TradeOutcome,
    /// Engine order id, once one was assigned
    pub order_id: Option<String>,
    /// Failure reason, for failed trades
    pub failure: Option<String>,
    /// Per-transaction broadcast outcomes from the engine
    pub broadcasts: Vec<BroadcastResult>,
    /// Balance movement over the trade, when both snapshots were readable
    pub balance_changes: Option<BalanceDelta>,
}

impl TradeReport {
    fn failed(reason: impl Into<String>) -> Self {
        Self {
            outcome: TradeOutcome::Failed,
            order_id: None,
            failure: Some(reason.into()),
            broadcasts: Vec::new(),
            balance_changes: None,
        }
    }
}

/// Run one trade end to end
///
/// Hard failures (transport, RPC, signing) stop the trade but never the
/// process; they are logged here and surfaced in the report instead of
/// propagating to the caller.
pub async fn execute_trade(
    engine: &EngineClient,
    wallet: &TradeWallet,
    network: &NetworkConfig,
    params: &TradeParams,
) -> TradeReport {
    match run_trade(engine, wallet, network, params).await {
        Ok(report) => report,
        Err(err) => {
            tracing::error!("Trade failed: {:#}", err);
            TradeReport::failed(format!("{:#}", err))
        }
    }
}

async fn run_trade(
    engine: &EngineClient,
    wallet: &TradeWallet,
    network: &NetworkConfig,
    params: &TradeParams,
) -> Result<TradeReport> {
    let provider = balances::connect(&network.rpc_url)?;
    let owner = wallet.address();

    let before = balances::snapshot(&provider, owner, Some(params.token), network).await;

    let order = OrderRequest::new(
        owner,
        params.token,
        params.amount.clone(),
        params.direction,
        network.chain_id,
    )
    .with_slippage_bps(params.slippage_bps);

    let created = engine.create_order(&order).await?;
    if !created.success {
        let reason = created
            .message
            .unwrap_or_else(|| "Order rejected by the engine".to_string());
        tracing::info!("Order rejected: {}", reason);
        return Ok(TradeReport::failed(reason));
    }

    let order_id = created
        .order_id
        .ok_or_else(|| eyre::eyre!("Engine accepted the order but returned no order id"))?;
    tracing::info!(
        "Order {} created with {} transactions",
        order_id,
        created.transactions.len()
    );

    let submissions = signing::sign_all(wallet, &created.transactions).await?;

    let submitted = engine
        .submit_order(&SubmitOrderRequest {
            order_id: order_id.clone(),
            transactions: submissions,
        })
        .await?;

    // Balances are re-checked even when the engine reports failure, since
    // part of the order may have landed on chain
    let after = balances::snapshot(&provider, owner, Some(params.token), network).await;
    let balance_changes = match (&before, &after) {
        (Some(before), Some(after)) => Some(BalanceDelta::between(before, after)),
        _ => None,
    };

    if !submitted.success {
        let reason = submitted
            .message
            .unwrap_or_else(|| "Submission rejected by the engine".to_string());
        tracing::info!("Order {} submission failed: {}", order_id, reason);
        return Ok(TradeReport {
            outcome: TradeOutcome::Failed,
            order_id: Some(order_id),
            failure: Some(reason),
            broadcasts: submitted.transactions,
            balance_changes,
        });
    }

    tracing::info!("Order {} submitted for broadcast", order_id);
    Ok(TradeReport {
        outcome: TradeOutcome::Completed,
        order_id: Some(order_id),
        failure: None,
        broadcasts: submitted.transactions,
        balance_changes,
    })
}
