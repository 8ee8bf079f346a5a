//! Chain access seam
//!
//! Operations only need five calls from the cluster. They go through
//! `ChainRpc` so tests can substitute an in-memory chain for the
//! nonblocking `RpcClient`.

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::RpcError;
use solana_sdk::{
    hash::Hash,
    instruction::InstructionError,
    message::Message,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use thiserror::Error;

use crate::core::SdkError;
use crate::idl::InterfaceDescriptor;
use crate::prelude::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Request never produced an answer from the cluster
    #[error("{0}")]
    Transport(String),

    /// Submitted but not confirmed in time
    #[error("{0}")]
    Timeout(String),

    /// Cluster or program refused the transaction
    #[error("{0}")]
    Rejected(TransactionError),
}

impl ChainError {
    /// Convert into the SDK error, naming custom program codes from the
    /// descriptor's error table first and the built-in table otherwise
    pub fn into_sdk_error(self, descriptor: Option<&InterfaceDescriptor>) -> SdkError {
        match self {
            ChainError::Transport(message) => SdkError::NetworkSubmission(message),
            ChainError::Timeout(message) => SdkError::ConfirmationTimeout(message),
            ChainError::Rejected(TransactionError::InstructionError(
                _,
                InstructionError::Custom(code),
            )) => match descriptor.and_then(|d| d.error_for_code(code)) {
                Some(known) => SdkError::RemoteProgram {
                    code,
                    name: known.name.clone(),
                    message: known.msg.clone().unwrap_or_else(|| known.name.clone()),
                },
                None => SdkError::from_program_code(code),
            },
            ChainError::Rejected(err) => SdkError::TransactionRejected(err.to_string()),
        }
    }
}

impl From<ClientError> for ChainError {
    fn from(err: ClientError) -> Self {
        if let Some(tx_err) = err.get_transaction_error() {
            return ChainError::Rejected(tx_err);
        }
        match err.kind() {
            ClientErrorKind::RpcError(RpcError::ForUser(message))
                if message.starts_with("unable to confirm transaction") =>
            {
                ChainError::Timeout(message.clone())
            }
            ClientErrorKind::Reqwest(e) if e.is_timeout() => ChainError::Timeout(e.to_string()),
            _ => ChainError::Transport(err.to_string()),
        }
    }
}

#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, ChainError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError>;

    /// Fee in lamports the cluster would charge for `message`
    async fn get_fee_for_message(&self, message: &Message) -> Result<u64, ChainError>;

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ChainError>;

    /// Submit and wait for the commitment the implementation was built with
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ChainError>;
}

#[async_trait]
impl ChainRpc for RpcClient {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, ChainError> {
        Ok(RpcClient::get_balance(self, address).await?)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError> {
        Ok(RpcClient::get_latest_blockhash(self).await?)
    }

    async fn get_fee_for_message(&self, message: &Message) -> Result<u64, ChainError> {
        Ok(RpcClient::get_fee_for_message(self, message).await?)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ChainError> {
        Ok(RpcClient::get_minimum_balance_for_rent_exemption(self, data_len).await?)
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ChainError> {
        Ok(RpcClient::send_and_confirm_transaction(self, transaction).await?)
    }
}
