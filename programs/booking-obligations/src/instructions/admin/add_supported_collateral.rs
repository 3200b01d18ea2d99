use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::{INTEGRATOR_SEED, SUPPORTED_COLLATERAL_SEED};
use crate::state::{IntegratorConfig, SupportedCollateral};
use crate::events::CollateralSupported;

#[derive(Accounts)]
pub struct AddSupportedCollateral<'info> {
    #[account(
        init,
        seeds = [SUPPORTED_COLLATERAL_SEED, collateral_mint.key().as_ref()],
        bump,
        payer = authority,
        space = SupportedCollateral::LEN
    )]
    pub supported_collateral: Account<'info, SupportedCollateral>,

    /// Custody for every obligation pledged in this asset
    #[account(
        init,
        payer = authority,
        associated_token::mint = collateral_mint,
        associated_token::authority = supported_collateral,
        associated_token::token_program = token_program,
    )]
    pub collateral_vault: InterfaceAccount<'info, TokenAccount>,

    /// Must be a registered config; its authority signs
    #[account(
        seeds = [INTEGRATOR_SEED, integrator_config.authority.as_ref(), integrator_config.oracle.as_ref()],
        bump = integrator_config.bump,
    )]
    pub integrator_config: Account<'info, IntegratorConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(mint::token_program = token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn process_add_supported_collateral(
    ctx: Context<AddSupportedCollateral>,
    max_ltv_bps: u16,
) -> Result<()> {
    ctx.accounts.integrator_config.ensure_admin(&ctx.accounts.authority.key())?;
    SupportedCollateral::check_max_ltv_bps(max_ltv_bps)?;

    let supported = &mut ctx.accounts.supported_collateral;
    supported.authority = ctx.accounts.authority.key();
    supported.collateral_mint = ctx.accounts.collateral_mint.key();
    supported.vault = ctx.accounts.collateral_vault.key();
    supported.max_ltv_bps = max_ltv_bps;
    supported.is_active = true;
    supported.total_locked = 0;
    supported.bump = ctx.bumps.supported_collateral;

    emit!(CollateralSupported {
        collateral_mint: supported.collateral_mint,
        vault: supported.vault,
        max_ltv_bps,
    });

    Ok(())
}
