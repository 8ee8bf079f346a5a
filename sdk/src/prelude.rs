//! Common imports for SDK modules
//!
//! Anchor is only pulled in for its Borsh serialization trait; keys and
//! sysvars come from solana-sdk.

pub use anchor_lang::AnchorSerialize;
pub use solana_sdk::{pubkey::Pubkey, sysvar};
