use thiserror::Error;

/// Every failure an operation can report.
///
/// Input and derivation errors are produced before any network traffic.
/// Network and remote errors are produced at submission time and are returned
/// inside an `OperationResult` rather than propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("Invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("No authority specified: at least one of revoke_mint or revoke_freeze must be set")]
    NoAuthoritySpecified,

    #[error("Address derivation failed: {0}")]
    AddressDerivation(String),

    #[error("Failed to load interface descriptor: {0}")]
    DescriptorLoad(String),

    #[error("Insufficient balance: required {required} lamports, available {available}")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Network submission failed: {0}")]
    NetworkSubmission(String),

    #[error("Confirmation timed out: {0}")]
    ConfirmationTimeout(String),

    #[error("Program error {code} ({name}): {message}")]
    RemoteProgram {
        code: u32,
        name: String,
        message: String,
    },

    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Individual messages carried by the error.
    ///
    /// Validation failures expand to one entry per violated rule.
    pub fn details(&self) -> Vec<String> {
        match self {
            SdkError::InvalidInput(errors) => errors.clone(),
            other => vec![other.to_string()],
        }
    }

    /// Whether resubmitting the same request could succeed without changes.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SdkError::DescriptorLoad(_)
                | SdkError::NetworkSubmission(_)
                | SdkError::ConfirmationTimeout(_)
        )
    }
}

/// Custom codes raised by the token program: (code, name, message)
pub const PROGRAM_ERRORS: &[(u32, &str, &str)] = &[
    (6000, "InsufficientFunds", "Insufficient funds to pay the protocol fee"),
    (6001, "InvalidPda", "Derived address does not match the expected PDA"),
    (6002, "InvalidReceiver", "Fee receiver account is not the configured receiver"),
    (6003, "Unauthorized", "Caller is not authorized for this operation"),
    (6004, "NoAuthorityToRevoke", "The requested authority is already revoked"),
];

impl SdkError {
    /// Name a custom program error code from the built-in table
    pub fn from_program_code(code: u32) -> Self {
        match PROGRAM_ERRORS.iter().find(|(known, _, _)| *known == code) {
            Some((_, name, message)) => SdkError::RemoteProgram {
                code,
                name: name.to_string(),
                message: message.to_string(),
            },
            None => SdkError::RemoteProgram {
                code,
                name: "Unknown".to_string(),
                message: format!("custom program error 0x{:x}", code),
            },
        }
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::DescriptorLoad(err.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::DescriptorLoad(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
