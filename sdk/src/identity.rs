//! Signing identities
//!
//! A wallet reaches the SDK either as a local keypair or as an external
//! signer (hardware wallet, remote signing service). Both are resolved once at
//! the API boundary into `Identity`; everything below only asks for the
//! public address or a signature.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use solana_sdk::signature::{read_keypair_file, Keypair, Signature};
use solana_sdk::signer::{Signer, SignerError};

use crate::core::{SdkError, SdkResult};
use crate::prelude::*;

type SignFn = dyn Fn(&[u8]) -> Result<Signature, SignerError> + Send + Sync;

/// Signer that lives outside this process
#[derive(Clone)]
pub struct ExternalSigner {
    address: Pubkey,
    sign: Arc<SignFn>,
}

impl ExternalSigner {
    pub fn new<F>(address: Pubkey, sign: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Signature, SignerError> + Send + Sync + 'static,
    {
        Self {
            address,
            sign: Arc::new(sign),
        }
    }
}

#[derive(Clone)]
pub enum Identity {
    Keypair(Arc<Keypair>),
    External(ExternalSigner),
}

impl Identity {
    pub fn from_keypair(keypair: Keypair) -> Self {
        Identity::Keypair(Arc::new(keypair))
    }

    /// Build from the 64-byte secret key layout used by keypair files
    #[allow(deprecated)]
    pub fn from_bytes(bytes: &[u8]) -> SdkResult<Self> {
        Keypair::from_bytes(bytes)
            .map(Self::from_keypair)
            .map_err(|e| SdkError::Identity(format!("invalid secret key bytes: {}", e)))
    }

    /// Load a keypair file, expanding a leading `~`
    pub fn from_keypair_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = expand_home(path.as_ref())?;
        read_keypair_file(&path)
            .map(Self::from_keypair)
            .map_err(|e| {
                SdkError::Identity(format!("failed to load keypair from {}: {}", path.display(), e))
            })
    }

    pub fn external<F>(address: Pubkey, sign: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Signature, SignerError> + Send + Sync + 'static,
    {
        Identity::External(ExternalSigner::new(address, sign))
    }

    /// Public address used as payer and owner
    pub fn address(&self) -> Pubkey {
        match self {
            Identity::Keypair(keypair) => keypair.pubkey(),
            Identity::External(signer) => signer.address,
        }
    }
}

impl Signer for Identity {
    fn try_pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.address())
    }

    fn try_sign_message(&self, message: &[u8]) -> Result<Signature, SignerError> {
        match self {
            Identity::Keypair(keypair) => keypair.try_sign_message(message),
            Identity::External(signer) => (signer.sign)(message),
        }
    }

    fn is_interactive(&self) -> bool {
        matches!(self, Identity::External(_))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Keypair(_) => write!(f, "Identity::Keypair({})", self.address()),
            Identity::External(_) => write!(f, "Identity::External({})", self.address()),
        }
    }
}

/// Where the simple API should get its signer from
#[derive(Clone, Debug)]
pub enum WalletSource {
    Identity(Identity),
    KeypairFile(PathBuf),
}

impl WalletSource {
    pub fn resolve(self) -> SdkResult<Identity> {
        match self {
            WalletSource::Identity(identity) => Ok(identity),
            WalletSource::KeypairFile(path) => Identity::from_keypair_file(path),
        }
    }
}

impl From<Identity> for WalletSource {
    fn from(identity: Identity) -> Self {
        WalletSource::Identity(identity)
    }
}

fn expand_home(path: &Path) -> SdkResult<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME")
                .map_err(|_| SdkError::Identity("HOME environment variable not set".to_string()))?;
            Ok(PathBuf::from(home).join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
