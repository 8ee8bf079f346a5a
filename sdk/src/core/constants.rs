use crate::prelude::*;

/// Program ID of the MintMe token-issuance program
pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("MintMeTokenProgram1111111111111111111111111");

/// Get the program ID as a Pubkey
pub fn program_id() -> Pubkey {
    PROGRAM_ID
}

/// Metaplex token-metadata program that owns the metadata account
pub fn metadata_program_id() -> Pubkey {
    Pubkey::new_from_array(mpl_token_metadata::ID.to_bytes())
}

/// Seeds for protocol PDAs
pub mod seeds {
    pub const PAYMENT: &[u8] = b"payment_fixed";
    pub const TOKEN_MINT: &[u8] = b"token-mint";
    pub const METADATA: &[u8] = b"metadata";
    pub const NETWORK_FEE_CONFIG: &[u8] = b"network_fee_config";
    pub const REVOKE_FEE_CONFIG: &[u8] = b"revoke_fee_config";
}

/// Unique key used when the caller does not supply one.
///
/// Always the same value so that retries of an identical request derive the
/// identical mint address.
pub const DEFAULT_UNIQUE_KEY: &str = "VERSION_1";

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
pub const SOL_DECIMALS: u32 = 9;

/// Token metadata limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_DECIMALS: u8 = 9;
pub const DEFAULT_DECIMALS: u8 = 9;

/// Largest supply a mint can hold, as shown to callers
pub const MAX_SUPPLY: &str = "18446744073709551615";

/// Account sizes used for the creation rent estimate
pub const MINT_ACCOUNT_LEN: usize = 82;
pub const TOKEN_ACCOUNT_LEN: usize = 165;
pub const METADATA_ACCOUNT_LEN: usize = 679;

/// Instruction names as they appear in the program IDL
pub mod instruction_names {
    pub const CREATE_TOKEN: &str = "create_token";
    pub const REVOKE_AUTHORITY: &str = "revoke_authority";
}
