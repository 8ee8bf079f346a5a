//! revoke_authority against an in-memory chain

mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use mintme_sdk::{
        derive_mint_address, derive_payment_address, derive_revoke_fee_config_address,
        program_id, ClientConfig, OperationStage, RevokeAuthorityRequest, RevokeTarget, SdkError,
    };
    use solana_sdk::{pubkey::Pubkey, signer::Signer};

    use crate::common::{self, MockChain, FEE};

    const REVOKE_FEE: u64 = 100_000_000;

    fn config() -> ClientConfig {
        ClientConfig::localnet().with_revoke_fee_lamports(REVOKE_FEE)
    }

    #[tokio::test]
    async fn test_no_authority_rejected_before_any_rpc() {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, _) = common::client(chain.clone(), config());
        let request = RevokeAuthorityRequest::new(Pubkey::new_unique(), false, false);

        let result = client.token.revoke_authority(&common::identity(), &request).await;
        assert!(!result.success);
        assert_eq!(result.failed_stage, Some(OperationStage::Validating));
        let error = result.error.unwrap();
        assert_eq!(error, SdkError::NoAuthoritySpecified);
        assert!(error.to_string().to_lowercase().contains("no authority specified"));
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_revoke_derived_mint() -> Result<()> {
        let chain = Arc::new(MockChain::with_balance(FEE + REVOKE_FEE));
        let (client, _) = common::client(chain.clone(), config());
        let owner = common::identity();
        let request = RevokeAuthorityRequest {
            target: RevokeTarget::Derived {
                name: "MINTME".to_string(),
                unique_key: None,
            },
            revoke_mint: true,
            revoke_freeze: true,
        };

        let result = client.token.revoke_authority(&owner, &request).await;
        assert!(result.success, "{:?}", result.error);

        let (mint, _) = derive_mint_address(&program_id(), &owner.pubkey(), "MINTME", None)?;
        assert_eq!(result.mint_address, Some(mint));

        let sent = chain.sent();
        assert_eq!(
            common::instruction_keys(&sent[0]),
            vec![
                owner.pubkey(),
                mint,
                spl_token::id(),
                solana_sdk::system_program::id(),
                derive_payment_address(&program_id())?.0,
                derive_revoke_fee_config_address(&program_id())?.0,
            ]
        );
        assert_eq!(
            sent[0].message.instructions[0].data,
            vec![233, 254, 239, 15, 49, 183, 105, 21, 1, 1]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_revoke_fee_is_part_of_preflight() {
        let chain = Arc::new(MockChain::with_balance(FEE + REVOKE_FEE - 1));
        let (client, _) = common::client(chain.clone(), config());
        let request = RevokeAuthorityRequest::new(Pubkey::new_unique(), true, false);

        let result = client.token.revoke_authority(&common::identity(), &request).await;
        assert_eq!(result.failed_stage, Some(OperationStage::Submitting));
        assert_eq!(
            result.error,
            Some(SdkError::InsufficientBalance {
                required: FEE + REVOKE_FEE,
                available: FEE + REVOKE_FEE - 1,
            })
        );
        assert!(chain.sent().is_empty());
    }

    #[tokio::test]
    async fn test_unset_revoke_fee_only_covers_transaction_fee() {
        let chain = Arc::new(MockChain::with_balance(FEE));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());
        let request = RevokeAuthorityRequest::new(Pubkey::new_unique(), true, true);

        let result = client.token.revoke_authority(&common::identity(), &request).await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_derived_target_rejected_locally() {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, _) = common::client(chain.clone(), config());
        let request = RevokeAuthorityRequest {
            target: RevokeTarget::Derived {
                name: String::new(),
                unique_key: Some("k".repeat(40)),
            },
            revoke_mint: false,
            revoke_freeze: true,
        };

        let result = client.token.revoke_authority(&common::identity(), &request).await;
        assert!(matches!(
            result.error,
            Some(SdkError::InvalidInput(ref errors)) if errors.len() == 2
        ));
        assert!(chain.calls().is_empty());
    }
}
