use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;
use anchor_lang::system_program::{self, CreateAccount};
use anchor_spl::associated_token::{self, get_associated_token_address_with_program_id, AssociatedToken, Create};
use anchor_spl::token_2022::spl_token_2022::instruction::AuthorityType;
use anchor_spl::token_interface::{self, InitializeMint2, MintTo, SetAuthority, TokenInterface};
use crate::constants::{
    INTEGRATOR_SEED, MAX_BOOKING_ID_LEN, MINT_ACCOUNT_LEN, OBLIGATION_SEED, OWNERSHIP_TOKEN_DECIMALS,
    OWNERSHIP_TOKEN_SUPPLY,
};
use crate::state::{Custodian, DurationTier, IntegratorConfig, Obligation};
use crate::utils::attestation::{canonical_message, load_preceding_attestation, Ed25519Attestation};
use crate::events::ObligationMinted;
use crate::errors::ObligationError;

#[derive(Accounts)]
#[instruction(proof: BookingProof)]
pub struct MintObligation<'info> {
    #[account(
        init_if_needed,
        seeds = [OBLIGATION_SEED, ownership_mint.key().as_ref()],
        bump,
        payer = host,
        space = Obligation::LEN
    )]
    pub obligation: Account<'info, Obligation>,

    #[account(
        seeds = [INTEGRATOR_SEED, integrator_config.authority.as_ref(), proof.oracle_key.as_ref()],
        bump = integrator_config.bump,
    )]
    pub integrator_config: Account<'info, IntegratorConfig>,

    /// Fresh keypair that becomes the ownership token mint
    #[account(mut)]
    pub ownership_mint: Signer<'info>,

    /// CHECK: Created in the handler as the host's associated token account for the new mint
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &host.key(),
            &ownership_mint.key(),
            &token_program.key(),
        )
    )]
    pub host_ownership_account: UncheckedAccount<'info>,

    /// CHECK: Created in the handler; holds the ownership token while collateral is locked
    #[account(
        mut,
        address = get_associated_token_address_with_program_id(
            &obligation.key(),
            &ownership_mint.key(),
            &token_program.key(),
        )
    )]
    pub obligation_token_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub host: Signer<'info>,

    /// CHECK: Address-checked; read to find the oracle's ed25519 instruction
    #[account(address = instructions_sysvar::ID)]
    pub instructions_sysvar: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Booking terms as attested by the oracle, plus off-core metadata.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct BookingProof {
    pub booking_id: String,
    pub face_amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub host_key: Pubkey,
    pub oracle_key: Pubkey,
    pub tier_index: u8,
    pub investor: Pubkey,
}

impl BookingProof {
    pub fn validate(&self) -> Result<DurationTier> {
        require!(self.start_time < self.end_time, ObligationError::InvalidTimeRange);
        require!(self.face_amount > 0, ObligationError::ZeroAmount);
        require!(self.booking_id.len() <= MAX_BOOKING_ID_LEN, ObligationError::BookingIdTooLong);
        DurationTier::from_index(self.tier_index)
    }

    pub fn authorize(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.host_key, *signer, ObligationError::Unauthorized);
        Ok(())
    }

    /// Every check a mint runs before any account is touched.
    pub fn admit(
        &self,
        signer: &Pubkey,
        attestation: &Ed25519Attestation,
        integrator_config: &IntegratorConfig,
    ) -> Result<DurationTier> {
        integrator_config.ensure_active()?;
        let tier = self.validate()?;
        self.authorize(signer)?;
        attestation.verify(&self.attestation_message(), &integrator_config.oracle)?;
        Ok(tier)
    }

    pub fn attestation_message(&self) -> Vec<u8> {
        canonical_message(
            &self.booking_id,
            self.face_amount,
            self.start_time,
            self.end_time,
            &self.host_key,
        )
    }

    pub fn into_obligation(
        self,
        tier: DurationTier,
        integrator_config: Pubkey,
        ownership_mint: Pubkey,
        now: i64,
        bump: u8,
    ) -> Obligation {
        Obligation {
            booking_id: self.booking_id,
            face_amount: self.face_amount,
            start_time: self.start_time,
            end_time: self.end_time,
            host_owner: self.host_key,
            oracle: self.oracle_key,
            tier,
            investor: self.investor,
            integrator_config,
            ownership_mint,
            collateral_mint: Pubkey::default(),
            collateral_amount: 0,
            custodian: Custodian::Host,
            is_locked: false,
            is_settled: false,
            minted_at: now,
            locked_at: 0,
            resolved_at: None,
            bump,
        }
    }
}

pub fn process_mint_obligation(ctx: Context<MintObligation>, proof: BookingProof) -> Result<()> {
    let clock = Clock::get()?;

    // 1. Input and authority checks
    let attestation = load_preceding_attestation(&ctx.accounts.instructions_sysvar.to_account_info())?;
    let tier = proof.admit(&ctx.accounts.host.key(), &attestation, &ctx.accounts.integrator_config)?;

    // 2. First use only
    ctx.accounts.obligation.ensure_unminted()?;
    require!(ctx.accounts.ownership_mint.data_is_empty(), ObligationError::DuplicateObligation);

    // 3. Ownership token: one unit, mint authority revoked afterwards
    let token_program = ctx.accounts.token_program.to_account_info();
    let lamports = Rent::get()?.minimum_balance(MINT_ACCOUNT_LEN);

    system_program::create_account(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            CreateAccount {
                from: ctx.accounts.host.to_account_info(),
                to: ctx.accounts.ownership_mint.to_account_info(),
            },
        ),
        lamports,
        MINT_ACCOUNT_LEN as u64,
        token_program.key,
    )?;

    token_interface::initialize_mint2(
        CpiContext::new(
            token_program.clone(),
            InitializeMint2 {
                mint: ctx.accounts.ownership_mint.to_account_info(),
            },
        ),
        OWNERSHIP_TOKEN_DECIMALS,
        &ctx.accounts.integrator_config.key(),
        None,
    )?;

    associated_token::create(CpiContext::new(
        ctx.accounts.associated_token_program.to_account_info(),
        Create {
            payer: ctx.accounts.host.to_account_info(),
            associated_token: ctx.accounts.host_ownership_account.to_account_info(),
            authority: ctx.accounts.host.to_account_info(),
            mint: ctx.accounts.ownership_mint.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            token_program: token_program.clone(),
        },
    ))?;

    // Custody for the ownership token exists from the start, so every later
    // transition can name it
    associated_token::create(CpiContext::new(
        ctx.accounts.associated_token_program.to_account_info(),
        Create {
            payer: ctx.accounts.host.to_account_info(),
            associated_token: ctx.accounts.obligation_token_vault.to_account_info(),
            authority: ctx.accounts.obligation.to_account_info(),
            mint: ctx.accounts.ownership_mint.to_account_info(),
            system_program: ctx.accounts.system_program.to_account_info(),
            token_program: token_program.clone(),
        },
    ))?;

    let config = &ctx.accounts.integrator_config;
    let bump = [config.bump];
    let seeds: &[&[u8]] = &[
        INTEGRATOR_SEED,
        config.authority.as_ref(),
        config.oracle.as_ref(),
        &bump,
    ];
    let signer = &[seeds];

    token_interface::mint_to(
        CpiContext::new_with_signer(
            token_program.clone(),
            MintTo {
                mint: ctx.accounts.ownership_mint.to_account_info(),
                to: ctx.accounts.host_ownership_account.to_account_info(),
                authority: config.to_account_info(),
            },
            signer,
        ),
        OWNERSHIP_TOKEN_SUPPLY,
    )?;

    token_interface::set_authority(
        CpiContext::new_with_signer(
            token_program,
            SetAuthority {
                current_authority: config.to_account_info(),
                account_or_mint: ctx.accounts.ownership_mint.to_account_info(),
            },
            signer,
        ),
        AuthorityType::MintTokens,
        None,
    )?;

    // 4. Record
    let obligation_key = ctx.accounts.obligation.key();
    let record = proof.into_obligation(
        tier,
        config.key(),
        ctx.accounts.ownership_mint.key(),
        clock.unix_timestamp,
        ctx.bumps.obligation,
    );
    ctx.accounts.obligation.set_inner(record);

    let obligation = &ctx.accounts.obligation;
    msg!("Booking {} tokenized as {}", obligation.booking_id, obligation.ownership_mint);

    emit!(ObligationMinted {
        obligation: obligation_key,
        ownership_mint: obligation.ownership_mint,
        host: obligation.host_owner,
        booking_id: obligation.booking_id.clone(),
        face_amount: obligation.face_amount,
        start_time: obligation.start_time,
        end_time: obligation.end_time,
        tier,
        multiplier_bps: tier.multiplier_bps(),
    });

    Ok(())
}
