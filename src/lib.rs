//! SwapDesk trading terminal
//!
//! An interactive terminal for buying and selling ERC20 tokens on Ethereum
//! and BNB Smart Chain through the SwapDesk trade engine. The engine builds
//! the transactions; this crate signs them locally (including permit-style
//! EIP-712 signatures spliced into calldata) and hands them back for
//! broadcast, reporting balance changes around the trade.
//!
//! # Example
//!
//! ```rust,ignore
//! use swapdesk::{
//!     execute_trade, AppConfig, Chain, EngineClient, TradeDirection, TradeParams, TradeWallet,
//! };
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = AppConfig::from_env()?;
//!     let wallet = TradeWallet::from_private_key(&config.private_key)?;
//!     let engine = EngineClient::new(&config.api_url, &config.api_key)?;
//!
//!     let network = config.network(Chain::Ethereum)?;
//!     let report = execute_trade(
//!         &engine,
//!         &wallet,
//!         &network,
//!         &TradeParams {
//!             token: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".parse()?,
//!             direction: TradeDirection::Buy,
//!             amount: "1.5".to_string(),
//!             slippage_bps: 300,
//!         },
//!     )
//!     .await;
//!
//!     println!("{:?}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod balances;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod signing;
pub mod trade;
pub mod types;
pub mod wallet;

// Re-export main types for convenience
pub use api::{
    BroadcastResult, CreateOrderResponse, EngineClient, SubmitOrderRequest, SubmitOrderResponse,
};
pub use balances::{BalanceDelta, BalanceSnapshot, TokenBalance};
pub use config::{AppConfig, Chain, NetworkConfig};
pub use error::{eyre, Context, Report, Result};
pub use trade::{execute_trade, TradeOutcome, TradeParams, TradeReport};
pub use types::{
    OrderRequest, PermitSignature, SubmissionContext, TradeDirection, TransactionContext,
    TypedDataPayload,
};
pub use wallet::TradeWallet;
