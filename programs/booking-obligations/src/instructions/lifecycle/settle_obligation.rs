use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::{OBLIGATION_SEED, OWNERSHIP_TOKEN_SUPPLY, SUPPORTED_COLLATERAL_SEED};
use crate::state::{Obligation, SupportedCollateral};
use crate::events::ObligationSettled;
use crate::errors::ObligationError;

#[derive(Accounts)]
pub struct SettleObligation<'info> {
    #[account(
        mut,
        seeds = [OBLIGATION_SEED, ownership_mint.key().as_ref()],
        bump = obligation.bump,
        has_one = ownership_mint,
    )]
    pub obligation: Box<Account<'info, Obligation>>,

    #[account(
        mut,
        seeds = [SUPPORTED_COLLATERAL_SEED, collateral_mint.key().as_ref()],
        bump = supported_collateral.bump,
        constraint = supported_collateral.vault == collateral_vault.key() @ ObligationError::CollateralMismatch,
    )]
    pub supported_collateral: Account<'info, SupportedCollateral>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = ownership_mint,
        associated_token::authority = obligation,
        associated_token::token_program = ownership_token_program,
    )]
    pub obligation_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = host,
        associated_token::mint = ownership_mint,
        associated_token::authority = host,
        associated_token::token_program = ownership_token_program,
    )]
    pub host_ownership_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = host,
        associated_token::mint = collateral_mint,
        associated_token::authority = host,
        associated_token::token_program = collateral_token_program,
    )]
    pub host_collateral_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub host: Signer<'info>,

    #[account(mint::token_program = ownership_token_program)]
    pub ownership_mint: InterfaceAccount<'info, Mint>,
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    pub ownership_token_program: Interface<'info, TokenInterface>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn apply_settlement(
    obligation: &mut Obligation,
    supported: &mut SupportedCollateral,
    host: &Pubkey,
    collateral_mint: &Pubkey,
    now: i64,
) -> Result<u64> {
    let released = obligation.settle(host, collateral_mint, now)?;
    supported.record_release(released)?;
    Ok(released)
}

pub fn process_settle_obligation(ctx: Context<SettleObligation>) -> Result<()> {
    let clock = Clock::get()?;
    let host = ctx.accounts.host.key();

    let collateral_mint = ctx.accounts.collateral_mint.key();
    let released = apply_settlement(
        &mut ctx.accounts.obligation,
        &mut ctx.accounts.supported_collateral,
        &host,
        &collateral_mint,
        clock.unix_timestamp,
    )?;

    // Ownership token back to the host, signed by the obligation PDA
    let ownership_mint = ctx.accounts.ownership_mint.key();
    let obligation_bump = [ctx.accounts.obligation.bump];
    let obligation_seeds: &[&[u8]] = &[OBLIGATION_SEED, ownership_mint.as_ref(), &obligation_bump];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.ownership_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.obligation_token_vault.to_account_info(),
                mint: ctx.accounts.ownership_mint.to_account_info(),
                to: ctx.accounts.host_ownership_account.to_account_info(),
                authority: ctx.accounts.obligation.to_account_info(),
            },
            &[obligation_seeds],
        ),
        OWNERSHIP_TOKEN_SUPPLY,
        ctx.accounts.ownership_mint.decimals,
    )?;

    // Collateral back to the host, signed by the asset custody PDA
    let custody_bump = [ctx.accounts.supported_collateral.bump];
    let custody_seeds: &[&[u8]] = &[SUPPORTED_COLLATERAL_SEED, collateral_mint.as_ref(), &custody_bump];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.collateral_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.collateral_vault.to_account_info(),
                mint: ctx.accounts.collateral_mint.to_account_info(),
                to: ctx.accounts.host_collateral_account.to_account_info(),
                authority: ctx.accounts.supported_collateral.to_account_info(),
            },
            &[custody_seeds],
        ),
        released,
        ctx.accounts.collateral_mint.decimals,
    )?;

    msg!("Obligation {} settled, {} released", ctx.accounts.obligation.key(), released);

    emit!(ObligationSettled {
        obligation: ctx.accounts.obligation.key(),
        host,
        collateral_released: released,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
