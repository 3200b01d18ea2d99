use anchor_lang::prelude::*;
use crate::errors::ObligationError;

/// Shared liquidation pool. Its associated token accounts hold every
/// ownership token and collateral balance seized on default.
#[account]
pub struct PoolVault {
    pub defaulted_obligations: u64,
    pub bump: u8,
}

impl PoolVault {
    pub const LEN: usize = 8 + 8 + 1;

    pub fn record_default(&mut self) -> Result<()> {
        self.defaulted_obligations = self
            .defaulted_obligations
            .checked_add(1)
            .ok_or(ObligationError::MathOverflow)?;
        Ok(())
    }
}
