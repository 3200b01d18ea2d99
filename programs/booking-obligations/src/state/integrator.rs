use anchor_lang::prelude::*;
use crate::errors::ObligationError;

#[account]
pub struct IntegratorConfig {
    pub authority: Pubkey,  // 32
    pub oracle: Pubkey,     // 32, signer trusted for booking attestations
    pub pool_vault: Pubkey, // 32, receives seized positions
    pub is_active: bool,    // 1
    pub bump: u8,           // 1
}

impl IntegratorConfig {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 1 + 1;

    pub fn check_oracle(oracle: &Pubkey) -> Result<()> {
        require_keys_neq!(*oracle, Pubkey::default(), ObligationError::InvalidOracle);
        Ok(())
    }

    pub fn ensure_admin(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.authority, ObligationError::Unauthorized);
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.is_active, ObligationError::IntegratorNotActive);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IntegratorConfig {
        IntegratorConfig {
            authority: Pubkey::new_from_array([1u8; 32]),
            oracle: Pubkey::new_from_array([2u8; 32]),
            pool_vault: Pubkey::new_from_array([3u8; 32]),
            is_active: true,
            bump: 255,
        }
    }

    #[test]
    fn zero_oracle_is_rejected() {
        assert_eq!(
            IntegratorConfig::check_oracle(&Pubkey::default()).unwrap_err(),
            ObligationError::InvalidOracle.into()
        );
        assert!(IntegratorConfig::check_oracle(&config().oracle).is_ok());
    }

    #[test]
    fn only_the_authority_administers() {
        let config = config();
        assert!(config.ensure_admin(&config.authority).is_ok());
        assert_eq!(
            config.ensure_admin(&config.oracle).unwrap_err(),
            ObligationError::Unauthorized.into()
        );
    }

    #[test]
    fn paused_integrator_is_inactive() {
        let mut config = config();
        assert!(config.ensure_active().is_ok());
        config.is_active = false;
        assert_eq!(config.ensure_active().unwrap_err(), ObligationError::IntegratorNotActive.into());
    }
}
