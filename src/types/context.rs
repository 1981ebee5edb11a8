//! Transaction bundle types exchanged with the trade engine

use crate::error::{Context, Result};
use alloy::dyn_abi::eip712::TypedData;
use alloy::rpc::types::TransactionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One unsigned transaction from an order response
///
/// The engine pre-fills nonce, gas and fee fields; the client only signs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionContext {
    /// Engine-assigned identifier, echoed back verbatim on submission
    pub id: String,
    /// Unsigned transaction payload
    pub tx: TransactionRequest,
    /// Typed-data signing request, present when the trade needs a permit
    #[serde(default)]
    pub sign_data: Option<TypedDataPayload>,
}

/// EIP-712 payload in the engine's wire form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedDataPayload {
    /// EIP-712 domain separator fields
    pub domain: Value,
    /// Type definitions, keyed by struct name
    pub types: Value,
    /// Name of the struct being signed
    pub primary_type: String,
    /// The struct values themselves
    pub values: Value,
}

impl TypedDataPayload {
    /// Reassemble the wire fields into an alloy `TypedData` for hashing
    pub fn to_typed_data(&self) -> Result<TypedData> {
        let raw = serde_json::json!({
            "types": self.types,
            "primaryType": self.primary_type,
            "domain": self.domain,
            "message": self.values,
        });
        serde_json::from_value(raw).context("Invalid EIP-712 payload")
    }
}

/// Signed counterpart of a [`TransactionContext`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    /// Identifier copied from the originating context
    pub id: String,
    /// Permit signature, when typed data was signed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_data: Option<PermitSignature>,
    /// 0x-prefixed EIP-2718 encoding of the signed transaction
    pub signed_tx: String,
}

/// Detached permit signature returned alongside the spliced calldata
#[derive(Debug, Clone, Serialize)]
pub struct PermitSignature {
    /// 0x-prefixed 65-byte signature hex
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_deserialization() {
        let raw = serde_json::json!({
            "id": "tx-1",
            "tx": {
                "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "to": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "input": "0x095ea7b3",
                "nonce": "0x2a",
                "gas": "0x5208",
                "maxFeePerGas": "0x3b9aca00",
                "maxPriorityFeePerGas": "0x3b9aca00",
                "chainId": "0x1",
                "value": "0x0"
            }
        });

        let ctx: TransactionContext = serde_json::from_value(raw).unwrap();
        assert_eq!(ctx.id, "tx-1");
        assert!(ctx.sign_data.is_none());
        assert_eq!(ctx.tx.nonce, Some(42));
        assert_eq!(ctx.tx.gas, Some(0x5208));
        assert_eq!(ctx.tx.chain_id, Some(1));
        assert_eq!(ctx.tx.input.input().map(|b| b.len()), Some(4));
    }

    #[test]
    fn test_typed_data_conversion() {
        let payload = TypedDataPayload {
            domain: serde_json::json!({
                "name": "Token",
                "version": "1",
                "chainId": 1,
                "verifyingContract": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
            }),
            types: serde_json::json!({
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "verifyingContract", "type": "address"}
                ],
                "Permit": [
                    {"name": "owner", "type": "address"},
                    {"name": "spender", "type": "address"},
                    {"name": "value", "type": "uint256"},
                    {"name": "nonce", "type": "uint256"},
                    {"name": "deadline", "type": "uint256"}
                ]
            }),
            primary_type: "Permit".to_string(),
            values: serde_json::json!({
                "owner": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "spender": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "value": "1000000",
                "nonce": "0",
                "deadline": "1900000000"
            }),
        };

        let typed = payload.to_typed_data().unwrap();
        // Hashing exercises domain + type resolution end to end
        typed.eip712_signing_hash().unwrap();
    }

    #[test]
    fn test_submission_serialization() {
        let with_permit = SubmissionContext {
            id: "tx-1".to_string(),
            sign_data: Some(PermitSignature {
                signature: "0xabcd".to_string(),
            }),
            signed_tx: "0x02f8".to_string(),
        };
        let json = serde_json::to_value(&with_permit).unwrap();
        assert_eq!(json["id"], "tx-1");
        assert_eq!(json["signData"]["signature"], "0xabcd");
        assert_eq!(json["signedTx"], "0x02f8");

        let without_permit = SubmissionContext {
            id: "tx-2".to_string(),
            sign_data: None,
            signed_tx: "0x02f9".to_string(),
        };
        let json = serde_json::to_value(&without_permit).unwrap();
        assert!(json.get("signData").is_none());
    }
}
