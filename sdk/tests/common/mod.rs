//! In-memory chain shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mintme_sdk::{ChainError, ChainRpc, ClientConfig, Identity, Logger, MintMeClient};
use solana_sdk::{
    hash::Hash, message::Message, pubkey::Pubkey, signature::Keypair, signature::Signature,
    transaction::Transaction,
};

pub const FEE: u64 = 5_000;

/// Rent the way the runtime charges it with default parameters
pub fn rent(data_len: usize) -> u64 {
    (128 + data_len as u64) * 6_960
}

pub struct MockChain {
    pub balance: u64,
    send_error: Option<ChainError>,
    pub calls: Mutex<Vec<&'static str>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl MockChain {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            send_error: None,
            calls: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(balance: u64, error: ChainError) -> Self {
        Self {
            send_error: Some(error),
            ..Self::with_balance(balance)
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn get_balance(&self, _address: &Pubkey) -> Result<u64, ChainError> {
        self.record("get_balance");
        Ok(self.balance)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError> {
        self.record("get_latest_blockhash");
        Ok(Hash::new_from_array([7u8; 32]))
    }

    async fn get_fee_for_message(&self, _message: &Message) -> Result<u64, ChainError> {
        self.record("get_fee_for_message");
        Ok(FEE)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: usize,
    ) -> Result<u64, ChainError> {
        self.record("get_minimum_balance_for_rent_exemption");
        Ok(rent(data_len))
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ChainError> {
        self.record("send_and_confirm_transaction");
        self.sent.lock().unwrap().push(transaction.clone());
        match &self.send_error {
            Some(err) => Err(err.clone()),
            None => Ok(transaction.signatures[0]),
        }
    }
}

/// Client over `chain` with a logger that keeps every message
pub fn client(
    chain: Arc<MockChain>,
    config: ClientConfig,
) -> (MintMeClient, Arc<Mutex<Vec<String>>>) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = messages.clone();
    let config = config.with_logger(Logger::from_fn(move |_, message| {
        sink.lock().unwrap().push(message.to_string());
    }));
    (MintMeClient::with_rpc(chain, &config), messages)
}

pub fn identity() -> Identity {
    Identity::from_keypair(Keypair::new())
}

/// Account keys of the first instruction, in instruction order
pub fn instruction_keys(transaction: &Transaction) -> Vec<Pubkey> {
    let message = &transaction.message;
    message.instructions[0]
        .accounts
        .iter()
        .map(|index| message.account_keys[*index as usize])
        .collect()
}
