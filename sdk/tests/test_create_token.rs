//! End-to-end create_token against an in-memory chain

mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use mintme_sdk::{
        derive_metadata_address, derive_mint_address, derive_network_fee_config_address,
        derive_payment_address, metadata_program_id, program_id, ChainError, ClientConfig,
        OperationStage, SdkError, SupplyUnits, TokenCreationRequest, METADATA_ACCOUNT_LEN,
        MINT_ACCOUNT_LEN, TOKEN_ACCOUNT_LEN,
    };
    use rust_decimal::Decimal;
    use solana_sdk::{
        instruction::InstructionError, pubkey::Pubkey, signer::Signer, sysvar,
        transaction::TransactionError,
    };
    use spl_associated_token_account::get_associated_token_address;

    use crate::common::{self, MockChain, FEE};

    const URI: &str = "https://ipfs.mintme.dev/mintme.json";

    fn mintme() -> TokenCreationRequest {
        TokenCreationRequest::new("MINTME", "MTM", URI, 1_000_000u64, SupplyUnits::Human)
    }

    fn required_without_partner() -> u64 {
        FEE + common::rent(MINT_ACCOUNT_LEN)
            + common::rent(TOKEN_ACCOUNT_LEN)
            + common::rent(METADATA_ACCOUNT_LEN)
    }

    /// Minimal Borsh reader for the create_token payload
    struct Reader<'a>(&'a [u8]);

    impl<'a> Reader<'a> {
        fn take(&mut self, n: usize) -> &'a [u8] {
            let (head, tail) = self.0.split_at(n);
            self.0 = tail;
            head
        }

        fn string(&mut self) -> String {
            let len = u32::from_le_bytes(self.take(4).try_into().unwrap()) as usize;
            String::from_utf8(self.take(len).to_vec()).unwrap()
        }

        fn u64(&mut self) -> u64 {
            u64::from_le_bytes(self.take(8).try_into().unwrap())
        }
    }

    #[tokio::test]
    async fn test_create_token_account_order_and_arguments() -> Result<()> {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());
        let payer = common::identity();
        let owner = payer.pubkey();

        let result = client.token.create_token(&payer, &mintme()).await;
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.stage, OperationStage::Confirmed);

        let (mint, _) = derive_mint_address(&program_id(), &owner, "MINTME", Some("VERSION_1"))?;
        let token_account = get_associated_token_address(&owner, &mint);
        let (metadata, _) = derive_metadata_address(&mint)?;
        assert_eq!(result.mint_address, Some(mint));
        assert_eq!(result.token_account_address, Some(token_account));
        assert_eq!(result.metadata_address, Some(metadata));

        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(result.signature, Some(sent[0].signatures[0]));
        assert_eq!(
            common::instruction_keys(&sent[0]),
            vec![
                owner,
                derive_network_fee_config_address(&program_id())?.0,
                mint,
                token_account,
                metadata,
                derive_payment_address(&program_id())?.0,
                spl_token::id(),
                metadata_program_id(),
                solana_sdk::system_program::id(),
                Pubkey::default(),
                sysvar::rent::id(),
                spl_associated_token_account::id(),
            ]
        );

        let data = &sent[0].message.instructions[0].data;
        let mut reader = Reader(data);
        assert_eq!(reader.take(8), &[84, 52, 204, 228, 24, 140, 234, 75]);
        assert_eq!(reader.string(), "MINTME");
        assert_eq!(reader.string(), "MTM");
        assert_eq!(reader.string(), "VERSION_1");
        assert_eq!(reader.take(1), &[9]);
        assert_eq!(reader.u64(), 1_000_000_000_000_000);
        assert_eq!(reader.string(), URI);
        assert_eq!(reader.take(2), &[0, 0]);
        assert_eq!(reader.take(32), Pubkey::default().as_ref());
        assert_eq!(reader.u64(), 0);
        assert!(reader.0.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_base_units_pass_through_and_partner_is_paid() -> Result<()> {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());
        let partner = Pubkey::new_unique();
        let request = TokenCreationRequest::new("MINTME", "MTM", URI, "500", SupplyUnits::Base)
            .with_decimals(6)
            .with_unique_key("V2")
            .with_revoke(true, false)
            .with_partner(partner, Decimal::new(15, 1));

        let result = client.token.create_token(&common::identity(), &request).await;
        assert!(result.success, "{:?}", result.error);

        let sent = chain.sent();
        assert_eq!(common::instruction_keys(&sent[0])[9], partner);

        let data = &sent[0].message.instructions[0].data;
        let mut reader = Reader(data);
        reader.take(8);
        reader.string();
        reader.string();
        assert_eq!(reader.string(), "V2");
        assert_eq!(reader.take(1), &[6]);
        assert_eq!(reader.u64(), 500);
        reader.string();
        assert_eq!(reader.take(2), &[1, 0]);
        assert_eq!(reader.take(32), partner.as_ref());
        assert_eq!(reader.u64(), 1_500_000_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_the_chain() {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());
        let request = TokenCreationRequest::new("MINTME", "mtm", URI, -5, SupplyUnits::Base);

        let result = client.token.create_token(&common::identity(), &request).await;
        assert!(!result.success);
        assert_eq!(result.failed_stage, Some(OperationStage::Validating));
        assert_eq!(result.details().len(), 2);
        assert!(result.mint_address.is_none());
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_balance_is_local() {
        let partner = Pubkey::new_unique();
        let required = required_without_partner() + 250_000_000;
        let chain = Arc::new(MockChain::with_balance(required - 1));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());
        let request = mintme().with_partner(partner, Decimal::new(25, 2));

        let result = client.token.create_token(&common::identity(), &request).await;
        assert_eq!(result.failed_stage, Some(OperationStage::Submitting));
        assert_eq!(
            result.error,
            Some(SdkError::InsufficientBalance {
                required,
                available: required - 1,
            })
        );
        assert!(result.mint_address.is_some());
        assert!(!chain.calls().contains(&"send_and_confirm_transaction"));
    }

    #[tokio::test]
    async fn test_program_error_is_named_from_descriptor() {
        let chain = Arc::new(MockChain::failing(
            10_000_000_000,
            ChainError::Rejected(TransactionError::InstructionError(
                0,
                InstructionError::Custom(6001),
            )),
        ));
        let (client, _) = common::client(chain.clone(), ClientConfig::localnet());

        let result = client.token.create_token(&common::identity(), &mintme()).await;
        assert_eq!(result.failed_stage, Some(OperationStage::Submitting));
        assert_eq!(
            result.error,
            Some(SdkError::RemoteProgram {
                code: 6001,
                name: "InvalidPda".to_string(),
                message: "Derived address does not match the expected PDA".to_string(),
            })
        );
        assert_eq!(chain.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_timeout_is_transient() {
        let chain = Arc::new(MockChain::failing(
            10_000_000_000,
            ChainError::Timeout("unable to confirm transaction".to_string()),
        ));
        let (client, _) = common::client(chain, ClientConfig::localnet());

        let result = client.token.create_token(&common::identity(), &mintme()).await;
        let error = result.error.unwrap();
        assert!(matches!(error, SdkError::ConfirmationTimeout(_)));
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_stage_transitions_are_logged() {
        let chain = Arc::new(MockChain::with_balance(10_000_000_000));
        let (client, messages) = common::client(chain, ClientConfig::localnet());

        let result = client.token.create_token(&common::identity(), &mintme()).await;
        assert!(result.success);

        let messages = messages.lock().unwrap();
        for transition in [
            "create_token: validating -> deriving",
            "create_token: deriving -> submitting",
            "create_token: submitting -> confirmed",
        ] {
            assert!(
                messages.iter().any(|m| m == transition),
                "missing '{}' in {:?}",
                transition,
                messages
            );
        }
    }
}
