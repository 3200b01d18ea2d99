use anchor_lang::prelude::*;
use crate::constants::BPS_DENOMINATOR;
use crate::errors::ObligationError;

#[account]
pub struct SupportedCollateral {
    pub authority: Pubkey,
    pub collateral_mint: Pubkey,
    pub vault: Pubkey,       // custody token account, authority = this PDA
    pub max_ltv_bps: u16,
    pub is_active: bool,
    pub total_locked: u64,   // collateral held for open obligations
    pub bump: u8,
}

impl SupportedCollateral {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 2 + 1 + 8 + 1;

    pub fn check_max_ltv_bps(max_ltv_bps: u16) -> Result<()> {
        require!(max_ltv_bps as u64 <= BPS_DENOMINATOR, ObligationError::InvalidLtv);
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.is_active, ObligationError::CollateralNotActive);
        Ok(())
    }

    pub fn record_lock(&mut self, amount: u64) -> Result<()> {
        self.total_locked = self
            .total_locked
            .checked_add(amount)
            .ok_or(ObligationError::MathOverflow)?;
        Ok(())
    }

    pub fn record_release(&mut self, amount: u64) -> Result<()> {
        self.total_locked = self
            .total_locked
            .checked_sub(amount)
            .ok_or(ObligationError::MathOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> SupportedCollateral {
        SupportedCollateral {
            authority: Pubkey::new_from_array([1u8; 32]),
            collateral_mint: Pubkey::new_from_array([5u8; 32]),
            vault: Pubkey::new_from_array([6u8; 32]),
            max_ltv_bps: 5_000,
            is_active: true,
            total_locked: 0,
            bump: 254,
        }
    }

    #[test]
    fn ltv_cap_cannot_exceed_full_value() {
        assert!(SupportedCollateral::check_max_ltv_bps(10_000).is_ok());
        assert_eq!(
            SupportedCollateral::check_max_ltv_bps(10_001).unwrap_err(),
            ObligationError::InvalidLtv.into()
        );
    }

    #[test]
    fn paused_asset_is_inactive() {
        let mut supported = usdc();
        assert!(supported.ensure_active().is_ok());
        supported.is_active = false;
        assert_eq!(supported.ensure_active().unwrap_err(), ObligationError::CollateralNotActive.into());
    }

    #[test]
    fn locked_total_tracks_open_positions() {
        let mut supported = usdc();
        supported.record_lock(300).unwrap();
        supported.record_lock(200).unwrap();
        supported.record_release(300).unwrap();
        assert_eq!(supported.total_locked, 200);
        assert_eq!(supported.record_release(201).unwrap_err(), ObligationError::MathOverflow.into());
    }
}
