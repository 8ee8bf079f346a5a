use std::sync::Arc;

use crate::prelude::*;
use solana_sdk::{instruction::Instruction, signature::Signature};

use crate::{
    core::{
        OperationResult, OperationStage, RevokeAuthorityRequest, RevokeTarget, SdkError,
        SdkResult, TokenCreationRequest, METADATA_ACCOUNT_LEN, MINT_ACCOUNT_LEN,
        TOKEN_ACCOUNT_LEN,
    },
    identity::Identity,
    idl::{DescriptorLoader, DescriptorSource, InterfaceDescriptor},
    instructions::{
        CreateTokenAccounts, CreateTokenArgs, RevokeAuthorityAccounts, RevokeAuthorityArgs,
        TokenInstructionBuilder,
    },
    logging::Logger,
    protocol::{validate_all, validate_name, validate_unique_key, DerivedAddressSet, PdaBuilder},
};

use super::BaseClient;

/// Token creation and authority revocation.
///
/// Both operations run `Validating -> Deriving -> Submitting` and end in
/// `Confirmed` or `Failed`. Input problems are reported before any RPC
/// call. Nothing is retried.
pub struct TokenService {
    base: Arc<BaseClient>,
    pda: Arc<PdaBuilder>,
    loader: DescriptorLoader,
    descriptor: DescriptorSource,
    revoke_fee_lamports: u64,
}

impl TokenService {
    pub fn new(
        base: Arc<BaseClient>,
        pda: Arc<PdaBuilder>,
        loader: DescriptorLoader,
        descriptor: DescriptorSource,
        revoke_fee_lamports: u64,
    ) -> Self {
        Self {
            base,
            pda,
            loader,
            descriptor,
            revoke_fee_lamports,
        }
    }

    /// Resolve the configured descriptor source
    pub async fn load_descriptor(&self) -> SdkResult<InterfaceDescriptor> {
        self.loader.load(self.descriptor.clone()).await
    }

    /// Build the `create_token` instruction for `payer` without submitting it
    pub async fn create_token_ix(
        &self,
        payer: Pubkey,
        request: &TokenCreationRequest,
        descriptor: &InterfaceDescriptor,
    ) -> SdkResult<(DerivedAddressSet, CreateTokenArgs, Instruction)> {
        let addresses = self
            .pda
            .derive_for_creation(
                payer,
                request.name.clone(),
                Some(request.effective_unique_key().to_string()),
            )
            .await?;
        let args = CreateTokenArgs::from_request(request)?;

        let accounts = CreateTokenAccounts {
            payer,
            config: addresses.network_fee_config.0,
            mint: addresses.mint.0,
            token_account: addresses.token_account.0,
            metadata: addresses.metadata.0,
            payment_account: addresses.payment.0,
            partner_wallet: args.partner_address,
        };
        let instruction = TokenInstructionBuilder::new(self.base.program_id(), descriptor)
            .create_token(&accounts, &args)?;

        Ok((addresses, args, instruction))
    }

    /// Build the `revoke_authority` instruction for `owner` without submitting it
    pub fn revoke_authority_ix(
        &self,
        owner: Pubkey,
        request: &RevokeAuthorityRequest,
        descriptor: &InterfaceDescriptor,
    ) -> SdkResult<(Pubkey, Instruction)> {
        if !request.revoke_mint && !request.revoke_freeze {
            return Err(SdkError::NoAuthoritySpecified);
        }

        let mint = match &request.target {
            RevokeTarget::Mint(mint) => *mint,
            RevokeTarget::Derived { name, unique_key } => {
                self.pda.mint(&owner, name, unique_key.as_deref())?.0
            }
        };

        let accounts = RevokeAuthorityAccounts {
            owner,
            mint,
            payment_account: self.pda.payment()?.0,
            config: self.pda.revoke_fee_config()?.0,
        };
        let args = RevokeAuthorityArgs {
            revoke_mint: request.revoke_mint,
            revoke_freeze: request.revoke_freeze,
        };
        let instruction = TokenInstructionBuilder::new(self.base.program_id(), descriptor)
            .revoke_authority(&accounts, &args)?;

        Ok((mint, instruction))
    }

    /// Create a token, its associated token account and metadata in one
    /// transaction signed by `identity`
    pub async fn create_token(
        &self,
        identity: &Identity,
        request: &TokenCreationRequest,
    ) -> OperationResult {
        let mut progress = Progress::start(self.base.logger(), "create_token");

        if let Err(err) = validate_all(request).into_result() {
            return progress.fail(err);
        }

        progress.advance(OperationStage::Deriving);
        let payer = identity.address();
        let prepared = async {
            let descriptor = self.load_descriptor().await?;
            let (addresses, args, instruction) =
                self.create_token_ix(payer, request, &descriptor).await?;
            Ok::<_, SdkError>((descriptor, addresses, args, instruction))
        }
        .await;
        let (descriptor, addresses, args, instruction) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => return progress.fail(err),
        };
        let (mint, token_account, metadata) = (
            addresses.mint.0,
            addresses.token_account.0,
            addresses.metadata.0,
        );
        progress.log(&format!(
            "mint {} token account {} metadata {}",
            mint, token_account, metadata
        ));

        progress.advance(OperationStage::Submitting);
        let submitted = self
            .submit(
                identity,
                instruction,
                &descriptor,
                &[MINT_ACCOUNT_LEN, TOKEN_ACCOUNT_LEN, METADATA_ACCOUNT_LEN],
                args.partner_amount,
            )
            .await;

        match submitted {
            Ok(signature) => progress
                .confirm(signature)
                .with_addresses(mint, token_account, metadata),
            Err(err) => progress
                .fail(err)
                .with_addresses(mint, token_account, metadata),
        }
    }

    /// Permanently give up the mint and/or freeze authority of a mint owned
    /// by `identity`
    pub async fn revoke_authority(
        &self,
        identity: &Identity,
        request: &RevokeAuthorityRequest,
    ) -> OperationResult {
        let mut progress = Progress::start(self.base.logger(), "revoke_authority");

        if !request.revoke_mint && !request.revoke_freeze {
            return progress.fail(SdkError::NoAuthoritySpecified);
        }
        if let RevokeTarget::Derived { name, unique_key } = &request.target {
            let mut errors = validate_name(name);
            errors.extend(validate_unique_key(unique_key.as_deref()));
            if !errors.is_empty() {
                return progress.fail(SdkError::InvalidInput(errors));
            }
        }

        progress.advance(OperationStage::Deriving);
        let owner = identity.address();
        let prepared = match self.load_descriptor().await {
            Ok(descriptor) => self
                .revoke_authority_ix(owner, request, &descriptor)
                .map(|(mint, instruction)| (descriptor, mint, instruction)),
            Err(err) => Err(err),
        };
        let (descriptor, mint, instruction) = match prepared {
            Ok(prepared) => prepared,
            Err(err) => return progress.fail(err),
        };

        progress.advance(OperationStage::Submitting);
        let submitted = self
            .submit(identity, instruction, &descriptor, &[], self.revoke_fee_lamports)
            .await;

        match submitted {
            Ok(signature) => progress.confirm(signature).with_mint(mint),
            Err(err) => progress.fail(err).with_mint(mint),
        }
    }

    /// Preflight the payer balance, then sign, submit and confirm.
    ///
    /// The payer must hold the transaction fee, rent for `rent_sizes` and
    /// `extra_lamports`.
    async fn submit(
        &self,
        identity: &Identity,
        instruction: Instruction,
        descriptor: &InterfaceDescriptor,
        rent_sizes: &[usize],
        extra_lamports: u64,
    ) -> SdkResult<Signature> {
        let payer = identity.address();
        let message = self.base.compile_message(&[instruction], &payer).await?;
        let fee = self.base.fee_for_message(&message).await?;
        let rent = self.base.rent_for_accounts(rent_sizes).await?;

        let required = fee.saturating_add(rent).saturating_add(extra_lamports);
        self.base.ensure_balance(&payer, required).await?;

        self.base.send_message(message, identity, descriptor).await
    }
}

/// Stage bookkeeping and transition logging for one operation
struct Progress<'a> {
    logger: &'a Logger,
    operation: &'static str,
    stage: OperationStage,
}

impl<'a> Progress<'a> {
    fn start(logger: &'a Logger, operation: &'static str) -> Self {
        logger.info(&format!("{}: {}", operation, OperationStage::Validating));
        Self {
            logger,
            operation,
            stage: OperationStage::Validating,
        }
    }

    fn advance(&mut self, stage: OperationStage) {
        self.logger
            .info(&format!("{}: {} -> {}", self.operation, self.stage, stage));
        self.stage = stage;
    }

    fn log(&self, message: &str) {
        self.logger.debug(&format!("{}: {}", self.operation, message));
    }

    fn confirm(&mut self, signature: Signature) -> OperationResult {
        self.advance(OperationStage::Confirmed);
        self.logger
            .info(&format!("{}: signature {}", self.operation, signature));
        OperationResult::confirmed(signature)
    }

    fn fail(&self, error: SdkError) -> OperationResult {
        self.logger.error(&format!(
            "{}: failed while {}: {}",
            self.operation, self.stage, error
        ));
        OperationResult::failed(self.stage, error)
    }
}
