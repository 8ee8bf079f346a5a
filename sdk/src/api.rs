//! One-call entry points
//!
//! Each function builds a `MintMeClient` from a `ClientConfig`, runs one
//! operation and returns its `OperationResult`. The `_simple` variants also
//! resolve the wallet and fill defaults for optional token parameters.

use rust_decimal::Decimal;

use crate::client::MintMeClient;
use crate::config::ClientConfig;
use crate::core::{
    OperationResult, OperationStage, PartnerAddress, RevokeAuthorityRequest, RevokeTarget,
    SupplyAmount, SupplyUnits, TokenCreationRequest, DEFAULT_DECIMALS,
};
use crate::identity::{Identity, WalletSource};
use crate::prelude::*;

/// Create a token signed by `identity`
pub async fn create_token(
    config: &ClientConfig,
    identity: &Identity,
    request: &TokenCreationRequest,
) -> OperationResult {
    match MintMeClient::new(config) {
        Ok(client) => client.token.create_token(identity, request).await,
        Err(err) => OperationResult::failed(OperationStage::Validating, err),
    }
}

/// Revoke mint and/or freeze authority on a mint owned by `identity`
pub async fn revoke_authority(
    config: &ClientConfig,
    identity: &Identity,
    request: &RevokeAuthorityRequest,
) -> OperationResult {
    match MintMeClient::new(config) {
        Ok(client) => client.token.revoke_authority(identity, request).await,
        Err(err) => OperationResult::failed(OperationStage::Validating, err),
    }
}

/// Flat parameter set for `create_token_simple`.
///
/// Unset options default to 9 decimals, `SupplyUnits::Human`, the default
/// unique key, no partner and no authority revocation.
#[derive(Clone, Debug)]
pub struct SimpleTokenConfig {
    pub wallet: WalletSource,
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    pub initial_supply: SupplyAmount,
    pub decimals: Option<u8>,
    pub supply_units: Option<SupplyUnits>,
    pub unique_key: Option<String>,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    pub partner_address: Option<PartnerAddress>,
    /// SOL
    pub partner_amount: Option<Decimal>,
    pub client: ClientConfig,
}

impl SimpleTokenConfig {
    pub fn new(
        wallet: impl Into<WalletSource>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        metadata_uri: impl Into<String>,
        initial_supply: impl Into<SupplyAmount>,
    ) -> Self {
        Self {
            wallet: wallet.into(),
            name: name.into(),
            symbol: symbol.into(),
            metadata_uri: metadata_uri.into(),
            initial_supply: initial_supply.into(),
            decimals: None,
            supply_units: None,
            unique_key: None,
            revoke_mint: false,
            revoke_freeze: false,
            partner_address: None,
            partner_amount: None,
            client: ClientConfig::default(),
        }
    }

    /// Request with defaults applied
    pub fn to_request(&self) -> TokenCreationRequest {
        TokenCreationRequest {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            unique_key: self.unique_key.clone(),
            decimals: self.decimals.unwrap_or(DEFAULT_DECIMALS),
            initial_supply: self.initial_supply.clone(),
            supply_units: self.supply_units.unwrap_or(SupplyUnits::Human),
            metadata_uri: self.metadata_uri.clone(),
            revoke_mint: self.revoke_mint,
            revoke_freeze: self.revoke_freeze,
            partner_address: self.partner_address.clone(),
            partner_amount: self.partner_amount.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Flat parameter set for `revoke_authority_simple`.
///
/// Both flags default to `false`; at least one must be set explicitly.
#[derive(Clone, Debug)]
pub struct SimpleRevokeConfig {
    pub wallet: WalletSource,
    pub target: RevokeTarget,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    pub client: ClientConfig,
}

impl SimpleRevokeConfig {
    pub fn new(wallet: impl Into<WalletSource>, mint: Pubkey) -> Self {
        Self {
            wallet: wallet.into(),
            target: RevokeTarget::Mint(mint),
            revoke_mint: false,
            revoke_freeze: false,
            client: ClientConfig::default(),
        }
    }

    pub fn to_request(&self) -> RevokeAuthorityRequest {
        RevokeAuthorityRequest {
            target: self.target.clone(),
            revoke_mint: self.revoke_mint,
            revoke_freeze: self.revoke_freeze,
        }
    }
}

pub async fn create_token_simple(config: SimpleTokenConfig) -> OperationResult {
    let request = config.to_request();
    match config.wallet.resolve() {
        Ok(identity) => create_token(&config.client, &identity, &request).await,
        Err(err) => OperationResult::failed(OperationStage::Validating, err),
    }
}

pub async fn revoke_authority_simple(config: SimpleRevokeConfig) -> OperationResult {
    let request = config.to_request();
    match config.wallet.resolve() {
        Ok(identity) => revoke_authority(&config.client, &identity, &request).await,
        Err(err) => OperationResult::failed(OperationStage::Validating, err),
    }
}
