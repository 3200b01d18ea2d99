use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, GRACE_PERIOD_SECONDS};
use crate::errors::ObligationError;

/// Largest collateral amount a booking of `face_amount` may carry.
pub fn max_collateral(face_amount: u64, max_ltv_bps: u16) -> Result<u64> {
    let max = (face_amount as u128)
        .checked_mul(max_ltv_bps as u128)
        .ok_or(ObligationError::MathOverflow)?
        / BPS_DENOMINATOR as u128;
    u64::try_from(max).map_err(|_| error!(ObligationError::MathOverflow))
}

/// Enforces `amount / face_amount <= max_ltv_bps / 10_000` without rounding.
pub fn check_max_ltv(amount: u64, face_amount: u64, max_ltv_bps: u16) -> Result<()> {
    let pledged = (amount as u128)
        .checked_mul(BPS_DENOMINATOR as u128)
        .ok_or(ObligationError::MathOverflow)?;
    let allowed = (face_amount as u128)
        .checked_mul(max_ltv_bps as u128)
        .ok_or(ObligationError::MathOverflow)?;
    if pledged > allowed {
        msg!(
            "Collateral {} exceeds the {} allowed against face {}",
            amount,
            max_collateral(face_amount, max_ltv_bps)?,
            face_amount
        );
        return err!(ObligationError::ExceedsMaxLtv);
    }
    Ok(())
}

/// First second at which liquidation is still refused; anything later is allowed.
pub fn liquidation_deadline(end_time: i64) -> Result<i64> {
    end_time
        .checked_add(GRACE_PERIOD_SECONDS)
        .ok_or_else(|| error!(ObligationError::MathOverflow))
}

pub fn check_grace_period_over(end_time: i64, now: i64) -> Result<()> {
    require!(now > liquidation_deadline(end_time)?, ObligationError::GracePeriodNotOver);
    Ok(())
}
