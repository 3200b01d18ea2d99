use anchor_lang::prelude::*;
use crate::constants::SUPPORTED_COLLATERAL_SEED;
use crate::state::{IntegratorConfig, SupportedCollateral};
use crate::events::{CollateralStatusChanged, IntegratorStatusChanged};
use crate::errors::ObligationError;

// Both switches only gate new positions. Settlement and liquidation of
// locked obligations never consult them.

#[derive(Accounts)]
pub struct SetIntegratorActive<'info> {
    #[account(
        mut,
        has_one = authority @ ObligationError::Unauthorized,
    )]
    pub integrator_config: Account<'info, IntegratorConfig>,
    pub authority: Signer<'info>,
}

pub fn set_integrator_active(ctx: Context<SetIntegratorActive>, is_active: bool) -> Result<()> {
    let config = &mut ctx.accounts.integrator_config;
    config.is_active = is_active;

    emit!(IntegratorStatusChanged {
        integrator_config: config.key(),
        is_active,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetCollateralActive<'info> {
    #[account(
        mut,
        seeds = [SUPPORTED_COLLATERAL_SEED, supported_collateral.collateral_mint.as_ref()],
        bump = supported_collateral.bump,
        has_one = authority @ ObligationError::Unauthorized,
    )]
    pub supported_collateral: Account<'info, SupportedCollateral>,
    pub authority: Signer<'info>,
}

pub fn set_collateral_active(ctx: Context<SetCollateralActive>, is_active: bool) -> Result<()> {
    let supported = &mut ctx.accounts.supported_collateral;
    supported.is_active = is_active;

    emit!(CollateralStatusChanged {
        collateral_mint: supported.collateral_mint,
        is_active,
    });
    Ok(())
}
