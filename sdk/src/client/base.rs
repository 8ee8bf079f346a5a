use std::sync::Arc;

use crate::prelude::*;
use solana_sdk::{
    hash::Hash, instruction::Instruction, message::Message, signature::Signature,
    transaction::Transaction,
};

use crate::client::{ChainError, ChainRpc};
use crate::core::{SdkError, SdkResult};
use crate::idl::InterfaceDescriptor;
use crate::identity::Identity;
use crate::logging::Logger;

/// Base RPC client wrapper for common operations
#[derive(Clone)]
pub struct BaseClient {
    rpc: Arc<dyn ChainRpc>,
    program_id: Pubkey,
    logger: Logger,
}

impl BaseClient {
    pub fn new(rpc: Arc<dyn ChainRpc>, program_id: Pubkey, logger: Logger) -> Self {
        Self {
            rpc,
            program_id,
            logger,
        }
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &Arc<dyn ChainRpc> {
        &self.rpc
    }

    /// Get the program ID
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Get account balance
    pub async fn get_balance(&self, address: &Pubkey) -> SdkResult<u64> {
        self.rpc
            .get_balance(address)
            .await
            .map_err(|e| e.into_sdk_error(None))
    }

    pub async fn latest_blockhash(&self) -> SdkResult<Hash> {
        self.rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| e.into_sdk_error(None))
    }

    /// Unsigned message paying from `payer`, stamped with a fresh blockhash
    pub async fn compile_message(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
    ) -> SdkResult<Message> {
        let blockhash = self.latest_blockhash().await?;
        Ok(Message::new_with_blockhash(instructions, Some(payer), &blockhash))
    }

    pub async fn fee_for_message(&self, message: &Message) -> SdkResult<u64> {
        self.rpc
            .get_fee_for_message(message)
            .await
            .map_err(|e| e.into_sdk_error(None))
    }

    /// Rent-exempt minimum for each account size, summed
    pub async fn rent_for_accounts(&self, sizes: &[usize]) -> SdkResult<u64> {
        let mut total = 0u64;
        for size in sizes {
            let rent = self
                .rpc
                .get_minimum_balance_for_rent_exemption(*size)
                .await
                .map_err(|e| e.into_sdk_error(None))?;
            total = total.saturating_add(rent);
        }
        Ok(total)
    }

    /// Fail locally when `payer` holds less than `required` lamports
    pub async fn ensure_balance(&self, payer: &Pubkey, required: u64) -> SdkResult<()> {
        let available = self.get_balance(payer).await?;
        self.logger.debug(&format!(
            "balance check for {}: required {} lamports, available {}",
            payer, required, available
        ));
        if available < required {
            return Err(SdkError::InsufficientBalance {
                required,
                available,
            });
        }
        Ok(())
    }

    /// Sign `message` with `identity`, submit it and wait for confirmation.
    ///
    /// Custom program errors are named from `descriptor`.
    pub async fn send_message(
        &self,
        message: Message,
        identity: &Identity,
        descriptor: &InterfaceDescriptor,
    ) -> SdkResult<Signature> {
        let blockhash = message.recent_blockhash;
        let mut tx = Transaction::new_unsigned(message);
        tx.try_sign(&[identity], blockhash)
            .map_err(|e| SdkError::Identity(format!("signing failed: {}", e)))?;

        self.rpc
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(|e: ChainError| e.into_sdk_error(Some(descriptor)))
    }
}
