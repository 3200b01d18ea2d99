use anchor_lang::prelude::*;
use crate::constants::{INTEGRATOR_SEED, POOL_VAULT_SEED};
use crate::state::{IntegratorConfig, PoolVault};
use crate::events::IntegratorInitialized;

#[derive(Accounts)]
#[instruction(oracle: Pubkey)] // oracle is part of the config identity
pub struct InitIntegrator<'info> {
    #[account(
        init,
        seeds = [INTEGRATOR_SEED, authority.key().as_ref(), oracle.as_ref()],
        bump,
        payer = authority,
        space = IntegratorConfig::LEN
    )]
    pub integrator_config: Account<'info, IntegratorConfig>,

    // Shared by every integrator; created by whichever integrator comes first
    #[account(
        init_if_needed,
        seeds = [POOL_VAULT_SEED],
        bump,
        payer = authority,
        space = PoolVault::LEN
    )]
    pub pool_vault: Account<'info, PoolVault>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_init_integrator(ctx: Context<InitIntegrator>, oracle: Pubkey) -> Result<()> {
    IntegratorConfig::check_oracle(&oracle)?;

    let pool_vault = &mut ctx.accounts.pool_vault;
    pool_vault.bump = ctx.bumps.pool_vault;

    let config = &mut ctx.accounts.integrator_config;
    config.authority = ctx.accounts.authority.key();
    config.oracle = oracle;
    config.pool_vault = pool_vault.key();
    config.is_active = true;
    config.bump = ctx.bumps.integrator_config;

    msg!("Integrator {} registered oracle {}", config.key(), oracle);

    emit!(IntegratorInitialized {
        integrator_config: config.key(),
        authority: config.authority,
        oracle,
        pool_vault: config.pool_vault,
    });

    Ok(())
}
