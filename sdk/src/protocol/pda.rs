use solana_sdk::pubkey::{MAX_SEEDS, MAX_SEED_LEN};

use crate::core::{metadata_program_id, seeds, SdkError, SdkResult, DEFAULT_UNIQUE_KEY};
use crate::prelude::*;

/// Find a PDA after checking every seed against the runtime limits.
///
/// `Pubkey::find_program_address` panics on oversized seeds; this reports the
/// offending seed instead.
fn find_address(labeled_seeds: &[(&str, &[u8])], program_id: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    if labeled_seeds.len() >= MAX_SEEDS {
        return Err(SdkError::AddressDerivation(format!(
            "{} seeds given, at most {} allowed",
            labeled_seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    for (label, seed) in labeled_seeds {
        if seed.len() > MAX_SEED_LEN {
            return Err(SdkError::AddressDerivation(format!(
                "seed '{}' is {} bytes, limit is {}",
                label,
                seed.len(),
                MAX_SEED_LEN
            )));
        }
    }

    let raw: Vec<&[u8]> = labeled_seeds.iter().map(|(_, seed)| *seed).collect();
    Pubkey::try_find_program_address(&raw, program_id).ok_or_else(|| {
        SdkError::AddressDerivation(format!(
            "no viable bump seed for [{}] under {}",
            labeled_seeds
                .iter()
                .map(|(label, _)| *label)
                .collect::<Vec<_>>()
                .join(", "),
            program_id
        ))
    })
}

/// Protocol fee / escrow account
pub fn derive_payment_address(program_id: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    find_address(&[("payment_fixed", seeds::PAYMENT)], program_id)
}

/// Mint PDA for a payer's token; `None` unique key means `DEFAULT_UNIQUE_KEY`
pub fn derive_mint_address(
    program_id: &Pubkey,
    payer: &Pubkey,
    name: &str,
    unique_key: Option<&str>,
) -> SdkResult<(Pubkey, u8)> {
    let unique_key = unique_key.unwrap_or(DEFAULT_UNIQUE_KEY);
    find_address(
        &[
            ("token-mint", seeds::TOKEN_MINT),
            ("payer", payer.as_ref()),
            ("name", name.as_bytes()),
            ("unique_key", unique_key.as_bytes()),
        ],
        program_id,
    )
}

/// Canonical associated token account of `owner` for `mint` (classic SPL token program)
pub fn derive_associated_token_account(mint: &Pubkey, owner: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    find_address(
        &[
            ("owner", owner.as_ref()),
            ("token_program", spl_token::id().as_ref()),
            ("mint", mint.as_ref()),
        ],
        &spl_associated_token_account::id(),
    )
}

/// Metaplex metadata account for `mint`
pub fn derive_metadata_address(mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    let metadata_program = metadata_program_id();
    find_address(
        &[
            ("metadata", seeds::METADATA),
            ("metadata_program", metadata_program.as_ref()),
            ("mint", mint.as_ref()),
        ],
        &metadata_program,
    )
}

pub fn derive_network_fee_config_address(program_id: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    find_address(&[("network_fee_config", seeds::NETWORK_FEE_CONFIG)], program_id)
}

pub fn derive_revoke_fee_config_address(program_id: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    find_address(&[("revoke_fee_config", seeds::REVOKE_FEE_CONFIG)], program_id)
}

/// Every address a token's lifecycle touches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivedAddressSet {
    pub mint: (Pubkey, u8),
    pub payment: (Pubkey, u8),
    pub token_account: (Pubkey, u8),
    pub metadata: (Pubkey, u8),
    pub network_fee_config: (Pubkey, u8),
    pub revoke_fee_config: (Pubkey, u8),
}

/// PDA builder bound to one program id
#[derive(Clone, Copy, Debug)]
pub struct PdaBuilder {
    pub program_id: Pubkey,
}

impl PdaBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn payment(&self) -> SdkResult<(Pubkey, u8)> {
        derive_payment_address(&self.program_id)
    }

    pub fn mint(
        &self,
        payer: &Pubkey,
        name: &str,
        unique_key: Option<&str>,
    ) -> SdkResult<(Pubkey, u8)> {
        derive_mint_address(&self.program_id, payer, name, unique_key)
    }

    pub fn network_fee_config(&self) -> SdkResult<(Pubkey, u8)> {
        derive_network_fee_config_address(&self.program_id)
    }

    pub fn revoke_fee_config(&self) -> SdkResult<(Pubkey, u8)> {
        derive_revoke_fee_config_address(&self.program_id)
    }

    /// Derive the full address set sequentially
    pub fn derive_all(
        &self,
        payer: &Pubkey,
        name: &str,
        unique_key: Option<&str>,
    ) -> SdkResult<DerivedAddressSet> {
        let mint = self.mint(payer, name, unique_key)?;
        Ok(DerivedAddressSet {
            mint,
            payment: self.payment()?,
            token_account: derive_associated_token_account(&mint.0, payer)?,
            metadata: derive_metadata_address(&mint.0)?,
            network_fee_config: self.network_fee_config()?,
            revoke_fee_config: self.revoke_fee_config()?,
        })
    }

    /// Derive the full address set, running independent derivations on the
    /// blocking pool concurrently. The token account and metadata address
    /// depend on the mint and are derived once it is known.
    pub async fn derive_for_creation(
        &self,
        payer: Pubkey,
        name: String,
        unique_key: Option<String>,
    ) -> SdkResult<DerivedAddressSet> {
        let program_id = self.program_id;

        let (mint, payment, network_fee_config, revoke_fee_config) = futures::try_join!(
            spawn_derivation(move || {
                derive_mint_address(&program_id, &payer, &name, unique_key.as_deref())
            }),
            spawn_derivation(move || derive_payment_address(&program_id)),
            spawn_derivation(move || derive_network_fee_config_address(&program_id)),
            spawn_derivation(move || derive_revoke_fee_config_address(&program_id)),
        )?;

        let mint_key = mint.0;
        let (token_account, metadata) = futures::try_join!(
            spawn_derivation(move || derive_associated_token_account(&mint_key, &payer)),
            spawn_derivation(move || derive_metadata_address(&mint_key)),
        )?;

        Ok(DerivedAddressSet {
            mint,
            payment,
            token_account,
            metadata,
            network_fee_config,
            revoke_fee_config,
        })
    }
}

async fn spawn_derivation<F>(derive: F) -> SdkResult<(Pubkey, u8)>
where
    F: FnOnce() -> SdkResult<(Pubkey, u8)> + Send + 'static,
{
    tokio::task::spawn_blocking(derive)
        .await
        .map_err(|e| SdkError::AddressDerivation(format!("derivation task failed: {}", e)))?
}
