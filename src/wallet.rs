//! Local private-key signing identity

use crate::types::TypedDataPayload;
use alloy::eips::eip2718::Encodable2718;
use alloy::hex;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::Address;
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use eyre::{Context, Result};

/// Wallet backed by a raw EVM private key
///
/// Signs EIP-712 typed data and full transactions offline; it never talks
/// to the network. Transaction fields (nonce, gas, fees, chain id) must
/// already be filled in by the engine.
pub struct TradeWallet {
    signer: PrivateKeySigner,
    wallet: EthereumWallet,
}

impl TradeWallet {
    /// Create a wallet from a private key hex string
    ///
    /// # Arguments
    ///
    /// * `private_key` - Hex-encoded private key (with or without 0x prefix)
    pub fn from_private_key(private_key: impl AsRef<str>) -> Result<Self> {
        let key = private_key.as_ref();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse().context("Failed to parse private key")?;
        let wallet = EthereumWallet::from(signer.clone());

        Ok(Self { signer, wallet })
    }

    /// Address derived from the private key
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign an EIP-712 payload, returning the 0x-prefixed 65-byte signature
    pub async fn sign_typed_data(&self, payload: &TypedDataPayload) -> Result<String> {
        let typed_data = payload.to_typed_data()?;
        let hash = typed_data
            .eip712_signing_hash()
            .context("Failed to compute EIP-712 signing hash")?;

        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .context("Failed to sign typed data")?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    /// Sign a fully-specified transaction, returning the 0x-prefixed
    /// EIP-2718 encoding ready for broadcast
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> Result<String> {
        let envelope = tx
            .build(&self.wallet)
            .await
            .context("Failed to build and sign transaction")?;

        Ok(format!("0x{}", hex::encode(envelope.encoded_2718())))
    }
}
