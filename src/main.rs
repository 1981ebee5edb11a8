//! Interactive SwapDesk trading terminal
//!
//! Run with: cargo run
//!
//! Requires PRIVATE_KEY, SWAPDESK_API_KEY and SWAPDESK_API_URL environment
//! variables; ETH_RPC_URL and BSC_RPC_URL enable their networks.

use std::io::{self, Write};

use alloy::primitives::Address;
use swapdesk::balances::{self, BalanceSnapshot};
use swapdesk::constants::DEFAULT_SLIPPAGE_BPS;
use swapdesk::{
    execute_trade, AppConfig, Chain, EngineClient, NetworkConfig, TradeDirection, TradeOutcome,
    TradeParams, TradeReport, TradeWallet,
};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let wallet = TradeWallet::from_private_key(&config.private_key)?;
    let engine = EngineClient::new(&config.api_url, &config.api_key)?;

    println!("\n========================================");
    println!("        SwapDesk Trading Terminal");
    println!("========================================");
    println!("Connected wallet: {}", wallet.address());

    // Main loop
    loop {
        println!("\n----------------------------------------");
        println!("Select an option:");
        println!("  1. New trade");
        println!("  2. View balances");
        println!("  q. Quit");
        println!("----------------------------------------");

        let choice = prompt("Enter choice: ")?;
        match choice.as_str() {
            "1" => trade_flow(&engine, &wallet, &config).await?,
            "2" => balances_flow(&wallet, &config).await?,
            "q" | "Q" => {
                println!("\nGoodbye!");
                break;
            }
            _ => println!("\nInvalid choice. Please try again."),
        }
    }

    Ok(())
}

/// Collect trade parameters, confirm, execute and report
async fn trade_flow(
    engine: &EngineClient,
    wallet: &TradeWallet,
    config: &AppConfig,
) -> eyre::Result<()> {
    println!("\n=== New Trade ===");

    let network = prompt_network(config)?;

    let token = loop {
        let input = prompt("Token address (0x...): ")?;
        match parse_token_address(&input) {
            Some(address) => break address,
            None => println!("Invalid address. Expected 0x followed by 40 hex characters."),
        }
    };

    let direction = loop {
        let input = prompt("Direction (buy/sell): ")?;
        match input.parse::<TradeDirection>() {
            Ok(direction) => break direction,
            Err(err) => println!("{}", err),
        }
    };

    let amount = loop {
        let input = prompt("Amount: ")?;
        match parse_amount(&input) {
            Some(amount) => break amount,
            None => println!("Amount must be a positive number."),
        }
    };

    println!(
        "\nAbout to {} {} of token {} on {}",
        direction, amount, token, network.name
    );
    let confirm = prompt("Proceed? (y/n): ")?;
    if !matches!(confirm.to_lowercase().as_str(), "y" | "yes") {
        println!("Trade cancelled.");
        return Ok(());
    }

    println!("\nExecuting trade...");
    let params = TradeParams {
        token,
        direction,
        amount,
        slippage_bps: DEFAULT_SLIPPAGE_BPS,
    };
    let report = execute_trade(engine, wallet, &network, &params).await;
    print_report(&report);

    Ok(())
}

/// Show native and optional token balances on a chosen network
async fn balances_flow(wallet: &TradeWallet, config: &AppConfig) -> eyre::Result<()> {
    println!("\n=== View Balances ===");

    let network = prompt_network(config)?;

    let input = prompt("Token address (optional, Enter to skip): ")?;
    let token = if input.is_empty() {
        None
    } else {
        match parse_token_address(&input) {
            Some(address) => Some(address),
            None => {
                println!("Invalid address. Showing native balance only.");
                None
            }
        }
    };

    let provider = match balances::connect(&network.rpc_url) {
        Ok(provider) => provider,
        Err(err) => {
            println!("Could not connect to {}: {}", network.name, err);
            return Ok(());
        }
    };

    match balances::snapshot(&provider, wallet.address(), token, &network).await {
        Some(snapshot) => print_snapshot(&snapshot),
        None => println!("Balances are unavailable right now."),
    }

    Ok(())
}

/// Ask for a network until a configured one is chosen
fn prompt_network(config: &AppConfig) -> eyre::Result<NetworkConfig> {
    loop {
        println!("\nSelect network:");
        println!("  1. Ethereum");
        println!("  2. BNB Smart Chain");

        let choice = prompt("Enter choice: ")?;
        let chain = match choice.as_str() {
            "1" => Chain::Ethereum,
            "2" => Chain::BnbChain,
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };

        match config.network(chain) {
            Ok(network) => return Ok(network),
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt(label: &str) -> eyre::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Validate a token address: 0x followed by exactly 40 hex characters
fn parse_token_address(input: &str) -> Option<Address> {
    let trimmed = input.trim();
    let hex_part = trimmed.strip_prefix("0x")?;
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Validate an amount: any positive number, returned as entered
fn parse_amount(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let value: f64 = trimmed.parse().ok()?;
    if value > 0.0 && value.is_finite() {
        Some(trimmed.to_string())
    } else {
        None
    }
}

fn print_report(report: &TradeReport) {
    println!("\n--- Trade Report ---");
    match report.outcome {
        TradeOutcome::Completed => println!("Status: COMPLETED"),
        TradeOutcome::Failed => println!("Status: FAILED"),
    }
    if let Some(order_id) = &report.order_id {
        println!("Order: {}", order_id);
    }
    if let Some(failure) = &report.failure {
        println!("Reason: {}", failure);
    }

    for tx in &report.broadcasts {
        println!("  Transaction {}", tx.id);
        if let Some(hash) = &tx.tx_hash {
            println!("    Hash: {}", hash);
        }
        if let Some(delta) = &tx.token_delta {
            println!("    Token delta: {}", delta);
        }
    }

    if let Some(changes) = &report.balance_changes {
        println!("\n--- Balance Changes ---");
        println!("  {}: {}", changes.native_symbol, changes.native_change);
        if let Some(token) = &changes.token {
            println!("  {}: {}", token.symbol, token.change);
        }
    }
}

fn print_snapshot(snapshot: &BalanceSnapshot) {
    println!("\n--- Balances ---");
    println!("  {}: {}", snapshot.native_symbol, snapshot.native_formatted);
    if let Some(token) = &snapshot.token {
        println!("  {} ({}): {}", token.symbol, token.address, token.formatted);
    }
}
