//! Client configuration
//!
//! `ClientConfig` holds documented defaults per cluster. A TOML file can
//! override any subset of fields through `ClientConfigOverrides`; the merge
//! is a pure function and validation is a separate step.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::core::{program_id, SdkError, SdkResult};
use crate::idl::{DescriptorLoader, DescriptorSource};
use crate::logging::Logger;
use crate::prelude::*;

/// SDK configuration for connecting to the MintMe program
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// RPC endpoint URL
    pub rpc_url: String,

    /// MintMe program ID
    pub program_id: Pubkey,

    /// Commitment awaited after submission
    pub commitment: CommitmentLevel,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Where the interface descriptor comes from
    pub descriptor: DescriptorSource,

    /// Local descriptor cache, read for `DescriptorSource::Default` and
    /// written after remote fetches
    pub descriptor_cache_path: Option<PathBuf>,

    /// Protocol fee charged by `revoke_authority`, in lamports.
    ///
    /// Defaults to 0 for every cluster, in which case the revoke preflight
    /// only covers the transaction fee. The SDK does not read the revoke
    /// fee config account; set this to the program's current fee for a
    /// complete balance check.
    pub revoke_fee_lamports: u64,

    pub logger: Logger,
}

impl ClientConfig {
    fn for_url(rpc_url: &str) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            program_id: program_id(),
            commitment: CommitmentLevel::Confirmed,
            timeout_secs: 30,
            descriptor: DescriptorSource::Default,
            descriptor_cache_path: None,
            revoke_fee_lamports: 0,
            logger: Logger::default(),
        }
    }

    pub fn localnet() -> Self {
        Self::for_url("http://localhost:8899")
    }

    pub fn devnet() -> Self {
        Self::for_url("https://api.devnet.solana.com")
    }

    pub fn mainnet() -> Self {
        Self::for_url("https://api.mainnet-beta.solana.com")
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_descriptor(mut self, descriptor: impl Into<DescriptorSource>) -> Self {
        self.descriptor = descriptor.into();
        self
    }

    pub fn with_descriptor_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor_cache_path = Some(path.into());
        self
    }

    pub fn with_revoke_fee_lamports(mut self, lamports: u64) -> Self {
        self.revoke_fee_lamports = lamports;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn commitment_config(&self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.commitment,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Loader wired to this configuration's cache, timeout and logger
    pub fn descriptor_loader(&self) -> DescriptorLoader {
        DescriptorLoader::new(self.logger.clone())
            .with_cache_path(self.descriptor_cache_path.clone())
            .with_timeout(self.timeout())
    }

    /// Apply `overrides` on top of `self`. Fields absent from the overrides
    /// keep their current value.
    pub fn merge(mut self, overrides: ClientConfigOverrides) -> SdkResult<Self> {
        if let Some(rpc_url) = overrides.rpc_url {
            self.rpc_url = rpc_url;
        }
        if let Some(program_id) = overrides.program_id {
            self.program_id = Pubkey::from_str(&program_id)
                .map_err(|e| SdkError::Config(format!("program_id '{}': {}", program_id, e)))?;
        }
        if let Some(commitment) = overrides.commitment {
            self.commitment = CommitmentLevel::from_str(&commitment)
                .map_err(|_| SdkError::Config(format!("unknown commitment '{}'", commitment)))?;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(descriptor) = overrides.descriptor {
            self.descriptor = DescriptorSource::Location(descriptor);
        }
        if let Some(path) = overrides.descriptor_cache_path {
            self.descriptor_cache_path = Some(path);
        }
        if let Some(lamports) = overrides.revoke_fee_lamports {
            self.revoke_fee_lamports = lamports;
        }
        Ok(self)
    }

    /// Load overrides from a TOML file and merge them onto devnet defaults
    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("reading {}: {}", path.display(), e)))?;
        let overrides = ClientConfigOverrides::from_toml(&content)?;

        let config = Self::default().merge(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> SdkResult<()> {
        let url = url::Url::parse(&self.rpc_url)
            .map_err(|e| SdkError::Config(format!("rpc_url '{}': {}", self.rpc_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::Config(format!(
                "rpc_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(SdkError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::devnet()
    }
}

/// Optional overrides, as read from a TOML file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfigOverrides {
    pub rpc_url: Option<String>,
    pub program_id: Option<String>,
    /// `processed`, `confirmed` or `finalized`
    pub commitment: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Descriptor file path or URL
    pub descriptor: Option<String>,
    pub descriptor_cache_path: Option<PathBuf>,
    pub revoke_fee_lamports: Option<u64>,
}

impl ClientConfigOverrides {
    pub fn from_toml(content: &str) -> SdkResult<Self> {
        toml::from_str(content).map_err(|e| SdkError::Config(e.to_string()))
    }
}
