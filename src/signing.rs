//! Permit signature splicing and the per-transaction signing pipeline

use crate::constants::PERMIT_SIGNATURE_PLACEHOLDER;
use crate::types::{PermitSignature, SubmissionContext, TransactionContext};
use crate::wallet::TradeWallet;
use alloy::hex;
use alloy::primitives::Bytes;
use alloy::rpc::types::TransactionInput;
use eyre::{bail, ensure, Context, Result};

/// Replace the permit placeholder in calldata with a real signature
///
/// The engine emits calldata with a fixed 65-byte placeholder marking where
/// the permit signature belongs. Zero occurrences leave the calldata
/// unchanged; more than one is ambiguous and rejected.
pub fn splice_permit_signature(calldata: &[u8], signature: &str) -> Result<Bytes> {
    let sig_hex = signature.strip_prefix("0x").unwrap_or(signature);
    let sig = hex::decode(sig_hex).context("Invalid signature hex")?;
    ensure!(
        sig.len() == PERMIT_SIGNATURE_PLACEHOLDER.len(),
        "Signature must be {} bytes, got {}",
        PERMIT_SIGNATURE_PLACEHOLDER.len(),
        sig.len()
    );

    let positions: Vec<usize> = calldata
        .windows(PERMIT_SIGNATURE_PLACEHOLDER.len())
        .enumerate()
        .filter(|(_, window)| *window == PERMIT_SIGNATURE_PLACEHOLDER)
        .map(|(i, _)| i)
        .collect();

    match positions.as_slice() {
        [] => Ok(Bytes::copy_from_slice(calldata)),
        [pos] => {
            let mut out = calldata.to_vec();
            out[*pos..*pos + sig.len()].copy_from_slice(&sig);
            Ok(out.into())
        }
        _ => bail!(
            "Calldata contains {} permit placeholders, expected at most one",
            positions.len()
        ),
    }
}

/// Sign one transaction context, splicing in a permit signature first when
/// the engine asked for one
///
/// The typed data is always signed before the transaction itself, since the
/// spliced calldata is covered by the transaction signature.
pub async fn prepare_submission(
    wallet: &TradeWallet,
    ctx: &TransactionContext,
) -> Result<SubmissionContext> {
    let mut tx = ctx.tx.clone();
    let mut permit = None;

    if let Some(sign_data) = &ctx.sign_data {
        let signature = wallet.sign_typed_data(sign_data).await?;
        tracing::debug!("Signed permit typed data for {}", ctx.id);

        let calldata = tx.input.input().cloned().unwrap_or_default();
        let spliced = splice_permit_signature(&calldata, &signature)
            .with_context(|| format!("Failed to splice permit signature into {}", ctx.id))?;
        tx.input = TransactionInput::new(spliced);

        permit = Some(PermitSignature { signature });
    }

    let signed_tx = wallet
        .sign_transaction(tx)
        .await
        .with_context(|| format!("Failed to sign transaction {}", ctx.id))?;
    tracing::debug!("Signed transaction {}", ctx.id);

    Ok(SubmissionContext {
        id: ctx.id.clone(),
        sign_data: permit,
        signed_tx,
    })
}

/// Sign every context sequentially, yielding one submission per context
/// with order and ids preserved
pub async fn sign_all(
    wallet: &TradeWallet,
    contexts: &[TransactionContext],
) -> Result<Vec<SubmissionContext>> {
    let mut submissions = Vec::with_capacity(contexts.len());
    for ctx in contexts {
        submissions.push(prepare_submission(wallet, ctx).await?);
    }
    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypedDataPayload;
    use alloy::network::TransactionBuilder;
    use alloy::primitives::{Address, U256};
    use alloy::rpc::types::TransactionRequest;
    use serde_json::json;

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_wallet() -> TradeWallet {
        TradeWallet::from_private_key(TEST_KEY).unwrap()
    }

    fn test_signature() -> String {
        format!("0x{}", "ab".repeat(65))
    }

    fn filled_tx(from: Address, input: Bytes) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_to(Address::ZERO)
            .with_nonce(7)
            .with_gas_limit(100_000)
            .with_max_fee_per_gas(2_000_000_000)
            .with_max_priority_fee_per_gas(1_000_000_000)
            .with_chain_id(1)
            .with_value(U256::ZERO)
            .with_input(input)
    }

    fn permit_payload() -> TypedDataPayload {
        TypedDataPayload {
            domain: json!({
                "name": "Token",
                "version": "1",
                "chainId": 1,
                "verifyingContract": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
            }),
            types: json!({
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
            values: json!({
                "owner": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "spender": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "value": "1000000",
                "nonce": "0",
                "deadline": "1900000000"
            }),
        }
    }

    #[test]
    fn test_splice_single_occurrence() {
        let mut calldata = vec![0xde, 0xad, 0xbe, 0xef];
        calldata.extend_from_slice(&PERMIT_SIGNATURE_PLACEHOLDER);
        calldata.extend_from_slice(&[0xca, 0xfe]);

        let spliced = splice_permit_signature(&calldata, &test_signature()).unwrap();

        assert_eq!(&spliced[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&spliced[4..69], &[0xab; 65][..]);
        assert_eq!(&spliced[69..], &[0xca, 0xfe]);
        assert_eq!(spliced.len(), calldata.len());
    }

    #[test]
    fn test_splice_no_occurrence() {
        let calldata = vec![0x01, 0x02, 0x03];
        let spliced = splice_permit_signature(&calldata, &test_signature()).unwrap();
        assert_eq!(&spliced[..], &calldata[..]);
    }

    #[test]
    fn test_splice_multiple_occurrences_rejected() {
        let mut calldata = Vec::new();
        calldata.extend_from_slice(&PERMIT_SIGNATURE_PLACEHOLDER);
        calldata.push(0x00);
        calldata.extend_from_slice(&PERMIT_SIGNATURE_PLACEHOLDER);

        let err = splice_permit_signature(&calldata, &test_signature()).unwrap_err();
        assert!(err.to_string().contains("placeholders"));
    }

    #[test]
    fn test_splice_bad_signature() {
        let calldata = PERMIT_SIGNATURE_PLACEHOLDER.to_vec();
        // Too short
        assert!(splice_permit_signature(&calldata, "0xabcd").is_err());
        // Not hex
        assert!(splice_permit_signature(&calldata, "0xzz").is_err());
    }

    #[tokio::test]
    async fn test_prepare_submission_passthrough() {
        let wallet = test_wallet();
        let ctx = TransactionContext {
            id: "tx-0".to_string(),
            tx: filled_tx(wallet.address(), Bytes::from_static(&[0x01, 0x02])),
            sign_data: None,
        };

        let submission = prepare_submission(&wallet, &ctx).await.unwrap();
        assert_eq!(submission.id, "tx-0");
        assert!(submission.sign_data.is_none());

        // Without typed data the transaction must be signed exactly as
        // received; deterministic signing makes this comparable
        let direct = wallet.sign_transaction(ctx.tx.clone()).await.unwrap();
        assert_eq!(submission.signed_tx, direct);
    }

    #[tokio::test]
    async fn test_prepare_submission_with_permit() {
        let wallet = test_wallet();

        let mut calldata = vec![0x12, 0x34, 0x56, 0x78];
        calldata.extend_from_slice(&PERMIT_SIGNATURE_PLACEHOLDER);
        let ctx = TransactionContext {
            id: "tx-1".to_string(),
            tx: filled_tx(wallet.address(), calldata.into()),
            sign_data: Some(permit_payload()),
        };

        let submission = prepare_submission(&wallet, &ctx).await.unwrap();
        let permit = submission.sign_data.as_ref().unwrap();
        assert!(permit.signature.starts_with("0x"));
        assert_eq!(permit.signature.len(), 2 + crate::constants::SIGNATURE_HEX_LEN);

        // The placeholder must not survive into the signed transaction,
        // and the permit signature bytes must appear in its place
        let placeholder_hex = "11".repeat(65);
        assert!(!submission.signed_tx.contains(&placeholder_hex));
        assert!(submission.signed_tx.contains(&permit.signature[2..]));
    }

    #[tokio::test]
    async fn test_sign_all_preserves_ids_and_order() {
        let wallet = test_wallet();

        let mut permit_calldata = vec![0xff];
        permit_calldata.extend_from_slice(&PERMIT_SIGNATURE_PLACEHOLDER);

        let contexts = vec![
            TransactionContext {
                id: "approve".to_string(),
                tx: filled_tx(wallet.address(), permit_calldata.into()),
                sign_data: Some(permit_payload()),
            },
            TransactionContext {
                id: "swap".to_string(),
                tx: filled_tx(wallet.address(), Bytes::from_static(&[0xaa, 0xbb])),
                sign_data: None,
            },
        ];

        let submissions = sign_all(&wallet, &contexts).await.unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].id, "approve");
        assert!(submissions[0].sign_data.is_some());
        assert_eq!(submissions[1].id, "swap");
        assert!(submissions[1].sign_data.is_none());
    }

    #[tokio::test]
    async fn test_sign_all_empty() {
        let wallet = test_wallet();
        let submissions = sign_all(&wallet, &[]).await.unwrap();
        assert!(submissions.is_empty());
    }
}
