//! Address derivation for every record the program owns. Clients use these to
//! locate accounts without any lookup service.

use anchor_lang::prelude::*;
use crate::constants::{INTEGRATOR_SEED, OBLIGATION_SEED, POOL_VAULT_SEED, SUPPORTED_COLLATERAL_SEED};

pub fn integrator_config_address(authority: &Pubkey, oracle: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[INTEGRATOR_SEED, authority.as_ref(), oracle.as_ref()], &crate::ID)
}

pub fn supported_collateral_address(collateral_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SUPPORTED_COLLATERAL_SEED, collateral_mint.as_ref()], &crate::ID)
}

pub fn pool_vault_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_VAULT_SEED], &crate::ID)
}

pub fn obligation_address(ownership_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[OBLIGATION_SEED, ownership_mint.as_ref()], &crate::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_reproducible() {
        let mint = Pubkey::new_from_array([1u8; 32]);
        let (first, bump) = obligation_address(&mint);
        assert_eq!(obligation_address(&mint), (first, bump));
        assert_eq!(
            Pubkey::create_program_address(&[OBLIGATION_SEED, mint.as_ref(), &[bump]], &crate::ID).unwrap(),
            first
        );
    }

    #[test]
    fn identities_do_not_collide() {
        let a = Pubkey::new_from_array([1u8; 32]);
        let b = Pubkey::new_from_array([2u8; 32]);

        assert_ne!(obligation_address(&a).0, obligation_address(&b).0);
        // the same key under different tags lands on different records
        assert_ne!(obligation_address(&a).0, supported_collateral_address(&a).0);
        // integrator identity is the ordered (authority, oracle) pair
        assert_ne!(integrator_config_address(&a, &b).0, integrator_config_address(&b, &a).0);
        assert_ne!(pool_vault_address().0, integrator_config_address(&a, &b).0);
    }
}
