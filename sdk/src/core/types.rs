use std::fmt;

use rust_decimal::Decimal;
use solana_sdk::signature::Signature;

use crate::core::{SdkError, DEFAULT_DECIMALS, DEFAULT_UNIQUE_KEY};
use crate::prelude::*;

/// Initial supply as supplied by the caller.
///
/// Kept unparsed so the validator can report negative numbers and malformed
/// strings instead of losing them to a type conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SupplyAmount {
    Integer(i128),
    Text(String),
}

impl From<u64> for SupplyAmount {
    fn from(value: u64) -> Self {
        SupplyAmount::Integer(value as i128)
    }
}

impl From<i64> for SupplyAmount {
    fn from(value: i64) -> Self {
        SupplyAmount::Integer(value as i128)
    }
}

impl From<i32> for SupplyAmount {
    fn from(value: i32) -> Self {
        SupplyAmount::Integer(value as i128)
    }
}

impl From<&str> for SupplyAmount {
    fn from(value: &str) -> Self {
        SupplyAmount::Text(value.to_string())
    }
}

impl From<String> for SupplyAmount {
    fn from(value: String) -> Self {
        SupplyAmount::Text(value)
    }
}

impl fmt::Display for SupplyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyAmount::Integer(value) => write!(f, "{}", value),
            SupplyAmount::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Scale of `initial_supply`.
///
/// `Human` amounts are multiplied by 10^decimals before submission; `Base`
/// amounts are already in the token's smallest unit and pass through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupplyUnits {
    Human,
    Base,
}

/// Commission recipient, either still encoded or already parsed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartnerAddress {
    Encoded(String),
    Key(Pubkey),
}

impl From<Pubkey> for PartnerAddress {
    fn from(key: Pubkey) -> Self {
        PartnerAddress::Key(key)
    }
}

impl From<&str> for PartnerAddress {
    fn from(value: &str) -> Self {
        PartnerAddress::Encoded(value.to_string())
    }
}

/// Parameters of a create-token call
#[derive(Clone, Debug, PartialEq)]
pub struct TokenCreationRequest {
    pub name: String,
    pub symbol: String,
    /// Extra mint seed; `None` means `DEFAULT_UNIQUE_KEY`
    pub unique_key: Option<String>,
    pub decimals: u8,
    pub initial_supply: SupplyAmount,
    pub supply_units: SupplyUnits,
    pub metadata_uri: String,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    pub partner_address: Option<PartnerAddress>,
    /// Commission paid to the partner, in SOL
    pub partner_amount: Decimal,
}

impl TokenCreationRequest {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        metadata_uri: impl Into<String>,
        initial_supply: impl Into<SupplyAmount>,
        supply_units: SupplyUnits,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            unique_key: None,
            decimals: DEFAULT_DECIMALS,
            initial_supply: initial_supply.into(),
            supply_units,
            metadata_uri: metadata_uri.into(),
            revoke_mint: false,
            revoke_freeze: false,
            partner_address: None,
            partner_amount: Decimal::ZERO,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_unique_key(mut self, unique_key: impl Into<String>) -> Self {
        self.unique_key = Some(unique_key.into());
        self
    }

    pub fn with_revoke(mut self, revoke_mint: bool, revoke_freeze: bool) -> Self {
        self.revoke_mint = revoke_mint;
        self.revoke_freeze = revoke_freeze;
        self
    }

    pub fn with_partner(mut self, address: impl Into<PartnerAddress>, amount_sol: Decimal) -> Self {
        self.partner_address = Some(address.into());
        self.partner_amount = amount_sol;
        self
    }

    /// Unique key actually used as the mint seed
    pub fn effective_unique_key(&self) -> &str {
        self.unique_key.as_deref().unwrap_or(DEFAULT_UNIQUE_KEY)
    }
}

/// Which mint a revoke call targets
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevokeTarget {
    Mint(Pubkey),
    /// Re-derive the mint the signer created with this name and unique key
    Derived {
        name: String,
        unique_key: Option<String>,
    },
}

/// Parameters of a revoke-authority call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevokeAuthorityRequest {
    pub target: RevokeTarget,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
}

impl RevokeAuthorityRequest {
    pub fn new(mint: Pubkey, revoke_mint: bool, revoke_freeze: bool) -> Self {
        Self {
            target: RevokeTarget::Mint(mint),
            revoke_mint,
            revoke_freeze,
        }
    }
}

/// Progress of a create or revoke operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationStage {
    Validating,
    Deriving,
    Submitting,
    Confirmed,
    Failed,
}

impl fmt::Display for OperationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationStage::Validating => "validating",
            OperationStage::Deriving => "deriving",
            OperationStage::Submitting => "submitting",
            OperationStage::Confirmed => "confirmed",
            OperationStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome handed back to the caller; never retried automatically
#[derive(Clone, Debug, PartialEq)]
pub struct OperationResult {
    pub success: bool,
    /// `Confirmed` or `Failed`
    pub stage: OperationStage,
    /// Stage that was active when the failure happened
    pub failed_stage: Option<OperationStage>,
    pub mint_address: Option<Pubkey>,
    pub token_account_address: Option<Pubkey>,
    pub metadata_address: Option<Pubkey>,
    pub signature: Option<Signature>,
    pub error: Option<SdkError>,
}

impl OperationResult {
    pub fn confirmed(signature: Signature) -> Self {
        Self {
            success: true,
            stage: OperationStage::Confirmed,
            failed_stage: None,
            mint_address: None,
            token_account_address: None,
            metadata_address: None,
            signature: Some(signature),
            error: None,
        }
    }

    pub fn failed(failed_stage: OperationStage, error: SdkError) -> Self {
        Self {
            success: false,
            stage: OperationStage::Failed,
            failed_stage: Some(failed_stage),
            mint_address: None,
            token_account_address: None,
            metadata_address: None,
            signature: None,
            error: Some(error),
        }
    }

    pub fn with_addresses(mut self, mint: Pubkey, token_account: Pubkey, metadata: Pubkey) -> Self {
        self.mint_address = Some(mint);
        self.token_account_address = Some(token_account);
        self.metadata_address = Some(metadata);
        self
    }

    pub fn with_mint(mut self, mint: Pubkey) -> Self {
        self.mint_address = Some(mint);
        self
    }

    /// Error messages, one per violated rule for validation failures
    pub fn details(&self) -> Vec<String> {
        self.error.as_ref().map(SdkError::details).unwrap_or_default()
    }
}
