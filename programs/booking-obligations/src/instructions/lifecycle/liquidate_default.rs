use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::{OBLIGATION_SEED, OWNERSHIP_TOKEN_SUPPLY, POOL_VAULT_SEED, SUPPORTED_COLLATERAL_SEED};
use crate::state::{IntegratorConfig, Obligation, PoolVault, SupportedCollateral};
use crate::events::ObligationDefaulted;
use crate::errors::ObligationError;

/// Permissionless once the grace period has passed. Everything held for the
/// obligation moves to the shared pool.
#[derive(Accounts)]
pub struct LiquidateDefault<'info> {
    #[account(
        mut,
        seeds = [OBLIGATION_SEED, ownership_mint.key().as_ref()],
        bump = obligation.bump,
        has_one = ownership_mint,
        has_one = integrator_config,
    )]
    pub obligation: Box<Account<'info, Obligation>>,

    #[account(has_one = pool_vault)]
    pub integrator_config: Account<'info, IntegratorConfig>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED],
        bump = pool_vault.bump,
    )]
    pub pool_vault: Account<'info, PoolVault>,

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
        payer = liquidator,
        associated_token::mint = ownership_mint,
        associated_token::authority = pool_vault,
        associated_token::token_program = ownership_token_program,
    )]
    pub pool_ownership_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = liquidator,
        associated_token::mint = collateral_mint,
        associated_token::authority = pool_vault,
        associated_token::token_program = collateral_token_program,
    )]
    pub pool_collateral_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub liquidator: Signer<'info>,

    #[account(mint::token_program = ownership_token_program)]
    pub ownership_mint: InterfaceAccount<'info, Mint>,
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    pub ownership_token_program: Interface<'info, TokenInterface>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn apply_default(
    obligation: &mut Obligation,
    supported: &mut SupportedCollateral,
    pool_vault: &mut PoolVault,
    collateral_mint: &Pubkey,
    now: i64,
) -> Result<u64> {
    let seized = obligation.mark_defaulted(collateral_mint, now)?;
    supported.record_release(seized)?;
    pool_vault.record_default()?;
    Ok(seized)
}

pub fn process_liquidate_default(ctx: Context<LiquidateDefault>) -> Result<()> {
    let clock = Clock::get()?;

    let collateral_mint = ctx.accounts.collateral_mint.key();
    let seized = apply_default(
        &mut ctx.accounts.obligation,
        &mut ctx.accounts.supported_collateral,
        &mut ctx.accounts.pool_vault,
        &collateral_mint,
        clock.unix_timestamp,
    )?;

    let ownership_mint = ctx.accounts.ownership_mint.key();
    let obligation_bump = [ctx.accounts.obligation.bump];
    let obligation_seeds: &[&[u8]] = &[OBLIGATION_SEED, ownership_mint.as_ref(), &obligation_bump];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.ownership_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.obligation_token_vault.to_account_info(),
                mint: ctx.accounts.ownership_mint.to_account_info(),
                to: ctx.accounts.pool_ownership_account.to_account_info(),
                authority: ctx.accounts.obligation.to_account_info(),
            },
            &[obligation_seeds],
        ),
        OWNERSHIP_TOKEN_SUPPLY,
        ctx.accounts.ownership_mint.decimals,
    )?;

    let custody_bump = [ctx.accounts.supported_collateral.bump];
    let custody_seeds: &[&[u8]] = &[SUPPORTED_COLLATERAL_SEED, collateral_mint.as_ref(), &custody_bump];

    token_interface::transfer_checked(
        CpiContext::new_with_signer(
            ctx.accounts.collateral_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.collateral_vault.to_account_info(),
                mint: ctx.accounts.collateral_mint.to_account_info(),
                to: ctx.accounts.pool_collateral_account.to_account_info(),
                authority: ctx.accounts.supported_collateral.to_account_info(),
            },
            &[custody_seeds],
        ),
        seized,
        ctx.accounts.collateral_mint.decimals,
    )?;

    msg!(
        "Obligation {} defaulted, {} seized by pool",
        ctx.accounts.obligation.key(),
        seized
    );

    emit!(ObligationDefaulted {
        obligation: ctx.accounts.obligation.key(),
        liquidator: ctx.accounts.liquidator.key(),
        pool_vault: ctx.accounts.pool_vault.key(),
        collateral_seized: seized,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
