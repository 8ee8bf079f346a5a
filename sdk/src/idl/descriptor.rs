//! Interface descriptor (Anchor IDL) model
//!
//! Only the parts of the IDL the client needs are modelled: instruction
//! names, discriminators, ordered accounts, typed arguments and the custom
//! error table. Both the current (`writable`/`signer`) and the legacy
//! (`isMut`/`isSigner`) account flag spellings are accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_sdk::instruction::AccountMeta;

use crate::core::{SdkError, SdkResult};
use crate::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Program name in legacy IDLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DescriptorMetadata>,
    pub instructions: Vec<InstructionDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DescriptorMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstructionDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Vec<u8>>,
    pub accounts: Vec<AccountDescriptor>,
    #[serde(default)]
    pub args: Vec<ArgDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountDescriptor {
    pub name: String,
    #[serde(default, alias = "isMut")]
    pub writable: bool,
    #[serde(default, alias = "isSigner")]
    pub signer: bool,
    #[serde(default, alias = "isOptional")]
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArgDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ArgType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Primitive argument types the client can encode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ArgType {
    String,
    U8,
    U64,
    Bool,
    Pubkey,
    /// Anything else; rejected at encode time
    Other(Value),
}

impl From<Value> for ArgType {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("string") => ArgType::String,
            Some("u8") => ArgType::U8,
            Some("u64") => ArgType::U64,
            Some("bool") => ArgType::Bool,
            Some("pubkey") | Some("publicKey") => ArgType::Pubkey,
            _ => ArgType::Other(value),
        }
    }
}

impl From<ArgType> for Value {
    fn from(ty: ArgType) -> Self {
        match ty {
            ArgType::String => Value::from("string"),
            ArgType::U8 => Value::from("u8"),
            ArgType::U64 => Value::from("u64"),
            ArgType::Bool => Value::from("bool"),
            ArgType::Pubkey => Value::from("pubkey"),
            ArgType::Other(value) => value,
        }
    }
}

/// Typed argument value supplied by the instruction builders
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    String(String),
    U8(u8),
    U64(u64),
    Bool(bool),
    Pubkey(Pubkey),
}

/// Argument values keyed by snake_case name
pub type ArgValues = BTreeMap<String, ArgValue>;

/// Account addresses keyed by snake_case name
pub type AccountKeys = BTreeMap<String, Pubkey>;

impl InterfaceDescriptor {
    pub fn from_json(json: &str) -> SdkResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SdkError::DescriptorLoad(format!("invalid interface descriptor: {}", e)))
    }

    pub fn to_json(&self) -> SdkResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SdkError::Serialization(e.to_string()))
    }

    pub fn program_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .or(self.name.as_deref())
    }

    /// Look up an instruction; camelCase and snake_case spellings match
    pub fn instruction(&self, name: &str) -> SdkResult<&InstructionDescriptor> {
        let wanted = to_snake_case(name);
        self.instructions
            .iter()
            .find(|ix| to_snake_case(&ix.name) == wanted)
            .ok_or_else(|| {
                SdkError::DescriptorLoad(format!("descriptor has no instruction '{}'", name))
            })
    }

    pub fn error_for_code(&self, code: u32) -> Option<&ErrorDescriptor> {
        self.errors.iter().find(|e| e.code == code)
    }
}

impl InstructionDescriptor {
    /// Declared discriminator, or the Anchor default `sha256("global:<name>")[..8]`
    pub fn discriminator_bytes(&self) -> SdkResult<[u8; 8]> {
        match &self.discriminator {
            Some(bytes) => <[u8; 8]>::try_from(bytes.as_slice()).map_err(|_| {
                SdkError::DescriptorLoad(format!(
                    "instruction '{}' has a {}-byte discriminator, expected 8",
                    self.name,
                    bytes.len()
                ))
            }),
            None => Ok(anchor_discriminator(&self.name)),
        }
    }

    /// Account metas in descriptor order.
    ///
    /// Flags come from the descriptor. A missing optional account is filled
    /// with `program_id`, the Anchor convention for `None`.
    pub fn resolve_accounts(
        &self,
        keys: &AccountKeys,
        program_id: &Pubkey,
    ) -> SdkResult<Vec<AccountMeta>> {
        self.accounts
            .iter()
            .map(|account| {
                let pubkey = match keys.get(&to_snake_case(&account.name)) {
                    Some(key) => *key,
                    None if account.optional => *program_id,
                    None => {
                        return Err(SdkError::DescriptorLoad(format!(
                            "no address supplied for account '{}' of '{}'",
                            account.name, self.name
                        )))
                    }
                };
                Ok(AccountMeta {
                    pubkey,
                    is_signer: account.signer,
                    is_writable: account.writable,
                })
            })
            .collect()
    }

    /// Discriminator followed by the Borsh encoding of every declared argument
    pub fn encode_data(&self, values: &ArgValues) -> SdkResult<Vec<u8>> {
        let mut data = self.discriminator_bytes()?.to_vec();
        for arg in &self.args {
            let value = values.get(&to_snake_case(&arg.name)).ok_or_else(|| {
                SdkError::Serialization(format!(
                    "missing value for argument '{}' of '{}'",
                    arg.name, self.name
                ))
            })?;
            encode_arg(&mut data, arg, value)?;
        }
        Ok(data)
    }
}

fn encode_arg(data: &mut Vec<u8>, arg: &ArgDescriptor, value: &ArgValue) -> SdkResult<()> {
    let result = match (&arg.ty, value) {
        (ArgType::String, ArgValue::String(v)) => AnchorSerialize::serialize(v, data),
        (ArgType::U8, ArgValue::U8(v)) => AnchorSerialize::serialize(v, data),
        (ArgType::U64, ArgValue::U64(v)) => AnchorSerialize::serialize(v, data),
        (ArgType::Bool, ArgValue::Bool(v)) => AnchorSerialize::serialize(v, data),
        (ArgType::Pubkey, ArgValue::Pubkey(v)) => AnchorSerialize::serialize(&v.to_bytes(), data),
        (ty, value) => {
            return Err(SdkError::Serialization(format!(
                "argument '{}' is declared as {:?} but got {:?}",
                arg.name, ty, value
            )))
        }
    };
    result.map_err(|e| SdkError::Serialization(e.to_string()))
}

/// Anchor instruction discriminator for `name`
pub fn anchor_discriminator(name: &str) -> [u8; 8] {
    let preimage = format!("global:{}", to_snake_case(name));
    let hash = solana_sdk::hash::hash(preimage.as_bytes()).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// `createToken` / `tokenAccount` -> `create_token` / `token_account`
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "name": "mint_me",
        "instructions": [{
            "name": "revokeAuthority",
            "accounts": [
                {"name": "owner", "isMut": true, "isSigner": true},
                {"name": "mint", "isMut": true, "isSigner": false}
            ],
            "args": [
                {"name": "revokeMint", "type": "bool"},
                {"name": "revokeFreeze", "type": "bool"}
            ]
        }]
    }"#;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("createToken"), "create_token");
        assert_eq!(to_snake_case("associatedTokenProgram"), "associated_token_program");
        assert_eq!(to_snake_case("token_account"), "token_account");
    }

    #[test]
    fn test_default_discriminators_match_anchor() {
        assert_eq!(
            anchor_discriminator("create_token"),
            [84, 52, 204, 228, 24, 140, 234, 75]
        );
        assert_eq!(
            anchor_discriminator("revokeAuthority"),
            [233, 254, 239, 15, 49, 183, 105, 21]
        );
    }

    #[test]
    fn test_legacy_dialect() {
        let descriptor = InterfaceDescriptor::from_json(LEGACY).unwrap();
        assert_eq!(descriptor.program_name(), Some("mint_me"));
        let ix = descriptor.instruction("revoke_authority").unwrap();
        assert!(ix.accounts[0].writable && ix.accounts[0].signer);
        assert!(ix.accounts[1].writable && !ix.accounts[1].signer);

        let mut values = ArgValues::new();
        values.insert("revoke_mint".to_string(), ArgValue::Bool(true));
        values.insert("revoke_freeze".to_string(), ArgValue::Bool(false));
        let data = ix.encode_data(&values).unwrap();
        assert_eq!(&data[..8], &anchor_discriminator("revoke_authority"));
        assert_eq!(&data[8..], &[1, 0]);
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let descriptor = InterfaceDescriptor::from_json(LEGACY).unwrap();
        let ix = descriptor.instruction("revokeAuthority").unwrap();
        let mut values = ArgValues::new();
        values.insert("revoke_mint".to_string(), ArgValue::U8(1));
        values.insert("revoke_freeze".to_string(), ArgValue::Bool(false));
        assert!(matches!(
            ix.encode_data(&values),
            Err(SdkError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_account_rejected() {
        let descriptor = InterfaceDescriptor::from_json(LEGACY).unwrap();
        let ix = descriptor.instruction("revoke_authority").unwrap();
        let mut keys = AccountKeys::new();
        keys.insert("owner".to_string(), Pubkey::new_unique());
        let err = ix.resolve_accounts(&keys, &Pubkey::new_unique()).unwrap_err();
        assert!(err.to_string().contains("mint"));
    }

    #[test]
    fn test_unknown_types_survive_round_trip() {
        let json = r#"{"instructions":[{"name":"x","accounts":[],"args":[{"name":"v","type":{"vec":"u8"}}]}]}"#;
        let descriptor = InterfaceDescriptor::from_json(json).unwrap();
        let ix = descriptor.instruction("x").unwrap();
        assert!(matches!(ix.args[0].ty, ArgType::Other(_)));
        let reparsed = InterfaceDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, descriptor);
    }

    #[test]
    fn test_bad_json_is_load_error() {
        assert!(matches!(
            InterfaceDescriptor::from_json("{not json"),
            Err(SdkError::DescriptorLoad(_))
        ));
    }
}
