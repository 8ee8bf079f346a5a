//! MintMe SDK
//!
//! Client for the MintMe token-issuance program on Solana:
//! - Deterministic PDA derivation for mints, fee configs and payment accounts
//! - Parameter validation before any network traffic
//! - Descriptor-driven assembly of `create_token` and `revoke_authority`
//! - Balance preflight, submission and confirmation with structured results
pub mod api;
pub mod client;
pub mod config;
pub mod core;
pub mod identity;
pub mod idl;
pub mod instructions;
pub mod logging;
pub mod prelude;
pub mod protocol;

pub use crate::api::*;
pub use crate::client::{BaseClient, ChainError, ChainRpc, MintMeClient, TokenService};
pub use crate::config::{ClientConfig, ClientConfigOverrides};
pub use crate::core::*;
pub use crate::identity::{ExternalSigner, Identity, WalletSource};
pub use crate::idl::{DescriptorLoader, DescriptorSource, InterfaceDescriptor};
pub use crate::logging::{LogLevel, Logger};
pub use crate::protocol::*;
