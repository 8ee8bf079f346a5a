pub mod base;
pub mod rpc;
pub mod token;

use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;

use crate::{config::ClientConfig, core::SdkResult, protocol::PdaBuilder};

pub use base::BaseClient;
pub use rpc::{ChainError, ChainRpc};
pub use token::TokenService;

/// MintMe client with service-based architecture
pub struct MintMeClient {
    /// Base RPC client
    pub base: Arc<BaseClient>,
    /// Token creation and authority revocation
    pub token: TokenService,
    /// PDA builder
    pub pda: Arc<PdaBuilder>,
}

impl MintMeClient {
    /// Connect to `config.rpc_url` with the configured commitment and timeout
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        config.validate()?;
        let rpc = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            config.timeout(),
            config.commitment_config(),
        );
        Ok(Self::with_rpc(Arc::new(rpc), config))
    }

    /// Use any `ChainRpc` implementation, e.g. an in-memory chain in tests
    pub fn with_rpc(rpc: Arc<dyn ChainRpc>, config: &ClientConfig) -> Self {
        let base = Arc::new(BaseClient::new(
            rpc,
            config.program_id,
            config.logger.clone(),
        ));
        let pda = Arc::new(PdaBuilder::new(config.program_id));

        Self {
            token: TokenService::new(
                base.clone(),
                pda.clone(),
                config.descriptor_loader(),
                config.descriptor.clone(),
                config.revoke_fee_lamports,
            ),
            base,
            pda,
        }
    }
}
