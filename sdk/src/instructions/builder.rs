use solana_sdk::instruction::{AccountMeta, Instruction};

use crate::core::SdkResult;
use crate::idl::{ArgValues, InterfaceDescriptor};
use crate::prelude::*;

/// Argument set of one program instruction
pub trait InstructionArgs {
    /// Instruction name as declared in the descriptor
    const NAME: &'static str;

    /// Values keyed by snake_case argument name
    fn arg_values(&self) -> ArgValues;

    /// Build the instruction data (discriminator + serialized args) in descriptor order
    fn build_data(&self, descriptor: &InterfaceDescriptor) -> SdkResult<Vec<u8>> {
        descriptor.instruction(Self::NAME)?.encode_data(&self.arg_values())
    }
}

/// Builder for constructing Solana instructions
pub struct MintInstructionBuilder {
    program_id: Pubkey,
    accounts: Vec<AccountMeta>,
    data: Vec<u8>,
}

impl MintInstructionBuilder {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Add multiple accounts
    pub fn add_accounts(mut self, accounts: Vec<AccountMeta>) -> Self {
        self.accounts.extend(accounts);
        self
    }

    /// Set the instruction data
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Build the final instruction
    pub fn build(self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts,
            data: self.data,
        }
    }
}
