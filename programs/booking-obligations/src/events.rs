use anchor_lang::prelude::*;
use crate::state::DurationTier;

#[event]
pub struct IntegratorInitialized {
    pub integrator_config: Pubkey,
    pub authority: Pubkey,
    pub oracle: Pubkey,
    pub pool_vault: Pubkey,
}

#[event]
pub struct IntegratorStatusChanged {
    pub integrator_config: Pubkey,
    pub is_active: bool,
}

#[event]
pub struct CollateralSupported {
    pub collateral_mint: Pubkey,
    pub vault: Pubkey,
    pub max_ltv_bps: u16,
}

#[event]
pub struct CollateralStatusChanged {
    pub collateral_mint: Pubkey,
    pub is_active: bool,
}

#[event]
pub struct ObligationMinted {
    pub obligation: Pubkey,
    pub ownership_mint: Pubkey,
    pub host: Pubkey,
    pub booking_id: String,
    pub face_amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub tier: DurationTier,
    pub multiplier_bps: u16,
}

#[event]
pub struct CollateralDeposited {
    pub obligation: Pubkey,
    pub host: Pubkey,
    pub collateral_mint: Pubkey,
    pub amount: u64,
    pub locked_at: i64,
}

#[event]
pub struct ObligationSettled {
    pub obligation: Pubkey,
    pub host: Pubkey,
    pub collateral_released: u64,
    pub timestamp: i64,
}

#[event]
pub struct ObligationDefaulted {
    pub obligation: Pubkey,
    pub liquidator: Pubkey,
    pub pool_vault: Pubkey,
    pub collateral_seized: u64,
    pub timestamp: i64,
}
