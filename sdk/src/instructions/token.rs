use std::str::FromStr;

use solana_sdk::instruction::Instruction;

use crate::core::{
    instruction_names, metadata_program_id, PartnerAddress, SdkError, SdkResult, SupplyUnits,
    TokenCreationRequest,
};
use crate::idl::{AccountKeys, ArgValue, ArgValues, InterfaceDescriptor};
use crate::instructions::{InstructionArgs, MintInstructionBuilder};
use crate::prelude::*;
use crate::protocol::{parse_supply, scale_supply, to_base_units};

/// Arguments of `create_token`, already in on-chain units
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTokenArgs {
    pub name: String,
    pub symbol: String,
    pub unique_key: String,
    pub decimals: u8,
    /// Base units
    pub initial_supply: u64,
    pub metadata_uri: String,
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
    /// `Pubkey::default()` when there is no partner
    pub partner_address: Pubkey,
    /// Lamports
    pub partner_amount: u64,
}

impl CreateTokenArgs {
    /// Convert a request that already passed validation.
    ///
    /// Scales the supply according to `supply_units` and the partner
    /// commission from SOL to lamports.
    pub fn from_request(request: &TokenCreationRequest) -> SdkResult<Self> {
        let invalid = |msg: String| SdkError::InvalidInput(vec![msg]);

        let supply = parse_supply(&request.initial_supply).map_err(invalid)?;
        let initial_supply = match request.supply_units {
            SupplyUnits::Base => supply,
            SupplyUnits::Human => scale_supply(supply, request.decimals).ok_or_else(|| {
                invalid(format!(
                    "Initial supply {} with {} decimals overflows u64",
                    supply, request.decimals
                ))
            })?,
        };

        let partner_address = match &request.partner_address {
            None => Pubkey::default(),
            Some(PartnerAddress::Key(key)) => *key,
            Some(PartnerAddress::Encoded(encoded)) => Pubkey::from_str(encoded)
                .map_err(|e| invalid(format!("Partner address {}: {}", encoded, e)))?,
        };

        Ok(Self {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            unique_key: request.effective_unique_key().to_string(),
            decimals: request.decimals,
            initial_supply,
            metadata_uri: request.metadata_uri.clone(),
            revoke_mint: request.revoke_mint,
            revoke_freeze: request.revoke_freeze,
            partner_address,
            partner_amount: to_base_units(request.partner_amount)?,
        })
    }
}

impl InstructionArgs for CreateTokenArgs {
    const NAME: &'static str = instruction_names::CREATE_TOKEN;

    fn arg_values(&self) -> ArgValues {
        ArgValues::from([
            ("name".to_string(), ArgValue::String(self.name.clone())),
            ("symbol".to_string(), ArgValue::String(self.symbol.clone())),
            ("unique_key".to_string(), ArgValue::String(self.unique_key.clone())),
            ("decimals".to_string(), ArgValue::U8(self.decimals)),
            ("initial_supply".to_string(), ArgValue::U64(self.initial_supply)),
            ("metadata_uri".to_string(), ArgValue::String(self.metadata_uri.clone())),
            ("revoke_mint".to_string(), ArgValue::Bool(self.revoke_mint)),
            ("revoke_freeze".to_string(), ArgValue::Bool(self.revoke_freeze)),
            ("partner_address".to_string(), ArgValue::Pubkey(self.partner_address)),
            ("partner_amount".to_string(), ArgValue::U64(self.partner_amount)),
        ])
    }
}

/// Arguments of `revoke_authority`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevokeAuthorityArgs {
    pub revoke_mint: bool,
    pub revoke_freeze: bool,
}

impl InstructionArgs for RevokeAuthorityArgs {
    const NAME: &'static str = instruction_names::REVOKE_AUTHORITY;

    fn arg_values(&self) -> ArgValues {
        ArgValues::from([
            ("revoke_mint".to_string(), ArgValue::Bool(self.revoke_mint)),
            ("revoke_freeze".to_string(), ArgValue::Bool(self.revoke_freeze)),
        ])
    }
}

/// Caller-specific accounts of `create_token`; program accounts are fixed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateTokenAccounts {
    pub payer: Pubkey,
    /// Network fee config PDA
    pub config: Pubkey,
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub metadata: Pubkey,
    pub payment_account: Pubkey,
    pub partner_wallet: Pubkey,
}

impl CreateTokenAccounts {
    pub fn keys(&self) -> AccountKeys {
        AccountKeys::from([
            ("payer".to_string(), self.payer),
            ("config".to_string(), self.config),
            ("mint".to_string(), self.mint),
            ("token_account".to_string(), self.token_account),
            ("metadata".to_string(), self.metadata),
            ("payment_account".to_string(), self.payment_account),
            ("token_program".to_string(), spl_token::id()),
            ("metadata_program".to_string(), metadata_program_id()),
            ("system_program".to_string(), solana_sdk::system_program::id()),
            ("partner_wallet".to_string(), self.partner_wallet),
            ("rent".to_string(), sysvar::rent::id()),
            (
                "associated_token_program".to_string(),
                spl_associated_token_account::id(),
            ),
        ])
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevokeAuthorityAccounts {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub payment_account: Pubkey,
    /// Revoke fee config PDA
    pub config: Pubkey,
}

impl RevokeAuthorityAccounts {
    pub fn keys(&self) -> AccountKeys {
        AccountKeys::from([
            ("owner".to_string(), self.owner),
            ("mint".to_string(), self.mint),
            ("token_program".to_string(), spl_token::id()),
            ("system_program".to_string(), solana_sdk::system_program::id()),
            ("payment_account".to_string(), self.payment_account),
            ("config".to_string(), self.config),
        ])
    }
}

/// Assembles token instructions following the account order and argument
/// layout of a loaded descriptor
pub struct TokenInstructionBuilder<'a> {
    program_id: Pubkey,
    descriptor: &'a InterfaceDescriptor,
}

impl<'a> TokenInstructionBuilder<'a> {
    pub fn new(program_id: Pubkey, descriptor: &'a InterfaceDescriptor) -> Self {
        Self {
            program_id,
            descriptor,
        }
    }

    /// Build create token instruction
    pub fn create_token(
        &self,
        accounts: &CreateTokenAccounts,
        args: &CreateTokenArgs,
    ) -> SdkResult<Instruction> {
        let metas = self
            .descriptor
            .instruction(CreateTokenArgs::NAME)?
            .resolve_accounts(&accounts.keys(), &self.program_id)?;

        Ok(MintInstructionBuilder::new(self.program_id)
            .add_accounts(metas)
            .with_data(args.build_data(self.descriptor)?)
            .build())
    }

    /// Build revoke authority instruction
    pub fn revoke_authority(
        &self,
        accounts: &RevokeAuthorityAccounts,
        args: &RevokeAuthorityArgs,
    ) -> SdkResult<Instruction> {
        let metas = self
            .descriptor
            .instruction(RevokeAuthorityArgs::NAME)?
            .resolve_accounts(&accounts.keys(), &self.program_id)?;

        Ok(MintInstructionBuilder::new(self.program_id)
            .add_accounts(metas)
            .with_data(args.build_data(self.descriptor)?)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::program_id;
    use crate::idl::embedded_descriptor;
    use rust_decimal::Decimal;

    fn request(units: SupplyUnits) -> TokenCreationRequest {
        TokenCreationRequest::new(
            "MINTME",
            "MTM",
            "https://ipfs.mintme.dev/metadata.json",
            1_000u64,
            units,
        )
        .with_decimals(6)
    }

    #[test]
    fn test_supply_units_are_explicit() {
        let human = CreateTokenArgs::from_request(&request(SupplyUnits::Human)).unwrap();
        assert_eq!(human.initial_supply, 1_000_000_000);
        let base = CreateTokenArgs::from_request(&request(SupplyUnits::Base)).unwrap();
        assert_eq!(base.initial_supply, 1_000);
    }

    #[test]
    fn test_partner_defaults_and_conversion() {
        let none = CreateTokenArgs::from_request(&request(SupplyUnits::Base)).unwrap();
        assert_eq!(none.partner_address, Pubkey::default());
        assert_eq!(none.partner_amount, 0);
        assert_eq!(none.unique_key, "VERSION_1");

        let partner = Pubkey::new_unique();
        let with = CreateTokenArgs::from_request(
            &request(SupplyUnits::Base)
                .with_partner(partner.to_string().as_str(), Decimal::new(25, 2)),
        )
        .unwrap();
        assert_eq!(with.partner_address, partner);
        assert_eq!(with.partner_amount, 250_000_000);
    }

    #[test]
    fn test_revoke_instruction_layout() {
        let descriptor = embedded_descriptor().unwrap();
        let accounts = RevokeAuthorityAccounts {
            owner: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            payment_account: Pubkey::new_unique(),
            config: Pubkey::new_unique(),
        };
        let ix = TokenInstructionBuilder::new(program_id(), &descriptor)
            .revoke_authority(
                &accounts,
                &RevokeAuthorityArgs {
                    revoke_mint: false,
                    revoke_freeze: true,
                },
            )
            .unwrap();

        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                accounts.owner,
                accounts.mint,
                spl_token::id(),
                solana_sdk::system_program::id(),
                accounts.payment_account,
                accounts.config,
            ]
        );
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.data, vec![233, 254, 239, 15, 49, 183, 105, 21, 0, 1]);
    }
}
