use anchor_lang::prelude::*;

pub mod constants;
pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod utils;

use instructions::*;

declare_id!("AtnFuztb2cvpGPuuCxvNsTK6yTdBtHZtzt9Wg4GJ82Gq");

#[program]
pub mod booking_obligations {
    use super::*;

    pub fn init_integrator(ctx: Context<InitIntegrator>, oracle: Pubkey) -> Result<()> {
        instructions::admin::init_integrator::process_init_integrator(ctx, oracle)
    }

    pub fn add_supported_collateral(ctx: Context<AddSupportedCollateral>, max_ltv_bps: u16) -> Result<()> {
        instructions::admin::add_supported_collateral::process_add_supported_collateral(ctx, max_ltv_bps)
    }

    pub fn set_integrator_active(ctx: Context<SetIntegratorActive>, is_active: bool) -> Result<()> {
        instructions::admin::set_active::set_integrator_active(ctx, is_active)
    }

    pub fn set_collateral_active(ctx: Context<SetCollateralActive>, is_active: bool) -> Result<()> {
        instructions::admin::set_active::set_collateral_active(ctx, is_active)
    }

    pub fn mint_obligation(ctx: Context<MintObligation>, proof: BookingProof) -> Result<()> {
        instructions::lifecycle::mint_obligation::process_mint_obligation(ctx, proof)
    }

    pub fn deposit_collateral(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
        instructions::lifecycle::deposit_collateral::process_deposit_collateral(ctx, amount)
    }

    pub fn settle_obligation(ctx: Context<SettleObligation>) -> Result<()> {
        instructions::lifecycle::settle_obligation::process_settle_obligation(ctx)
    }

    pub fn liquidate_default(ctx: Context<LiquidateDefault>) -> Result<()> {
        instructions::lifecycle::liquidate_default::process_liquidate_default(ctx)
    }
}
