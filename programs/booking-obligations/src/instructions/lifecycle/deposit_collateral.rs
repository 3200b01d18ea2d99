use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};
use crate::constants::{OBLIGATION_SEED, OWNERSHIP_TOKEN_SUPPLY, SUPPORTED_COLLATERAL_SEED};
use crate::state::{Obligation, SupportedCollateral};
use crate::events::CollateralDeposited;
use crate::errors::ObligationError;

#[derive(Accounts)]
pub struct DepositCollateral<'info> {
    #[account(
        mut,
        seeds = [OBLIGATION_SEED, ownership_mint.key().as_ref()],
        bump = obligation.bump,
        has_one = ownership_mint,
    )]
    pub obligation: Box<Account<'info, Obligation>>,

    #[account(
        mut,
        seeds = [SUPPORTED_COLLATERAL_SEED, collateral_mint.key().as_ref()],
        bump = supported_collateral.bump,
        has_one = collateral_mint,
        constraint = supported_collateral.vault == collateral_vault.key() @ ObligationError::CollateralMismatch,
    )]
    pub supported_collateral: Account<'info, SupportedCollateral>,

    #[account(mut)]
    pub collateral_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = ownership_mint,
        associated_token::authority = obligation,
        associated_token::token_program = ownership_token_program,
    )]
    pub obligation_token_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = ownership_mint,
        associated_token::authority = host,
        associated_token::token_program = ownership_token_program,
    )]
    pub host_ownership_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = host,
        token::token_program = collateral_token_program,
    )]
    pub host_collateral_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub host: Signer<'info>,

    #[account(mint::token_program = ownership_token_program)]
    pub ownership_mint: InterfaceAccount<'info, Mint>,
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    pub ownership_token_program: Interface<'info, TokenInterface>,
    pub collateral_token_program: Interface<'info, TokenInterface>,
}

/// Every check a deposit runs, then the state change. Token movement is left
/// to the caller.
pub fn apply_deposit(
    obligation: &mut Obligation,
    supported: &mut SupportedCollateral,
    host: &Pubkey,
    ownership_balance: u64,
    collateral_balance: u64,
    amount: u64,
    now: i64,
) -> Result<()> {
    supported.ensure_active()?;
    obligation.ensure_lockable(host, amount, supported.max_ltv_bps)?;
    require!(ownership_balance == OWNERSHIP_TOKEN_SUPPLY, ObligationError::TokenNotInCustody);
    require!(collateral_balance >= amount, ObligationError::InsufficientFunds);

    obligation.lock(host, supported.collateral_mint, amount, supported.max_ltv_bps, now)?;
    supported.record_lock(amount)
}

pub fn process_deposit_collateral(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let host = ctx.accounts.host.key();

    apply_deposit(
        &mut ctx.accounts.obligation,
        &mut ctx.accounts.supported_collateral,
        &host,
        ctx.accounts.host_ownership_account.amount,
        ctx.accounts.host_collateral_account.amount,
        amount,
        clock.unix_timestamp,
    )?;

    // Ownership token: Host -> Obligation vault
    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.ownership_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.host_ownership_account.to_account_info(),
                mint: ctx.accounts.ownership_mint.to_account_info(),
                to: ctx.accounts.obligation_token_vault.to_account_info(),
                authority: ctx.accounts.host.to_account_info(),
            },
        ),
        OWNERSHIP_TOKEN_SUPPLY,
        ctx.accounts.ownership_mint.decimals,
    )?;

    // Collateral: Host -> asset custody vault
    token_interface::transfer_checked(
        CpiContext::new(
            ctx.accounts.collateral_token_program.to_account_info(),
            TransferChecked {
                from: ctx.accounts.host_collateral_account.to_account_info(),
                mint: ctx.accounts.collateral_mint.to_account_info(),
                to: ctx.accounts.collateral_vault.to_account_info(),
                authority: ctx.accounts.host.to_account_info(),
            },
        ),
        amount,
        ctx.accounts.collateral_mint.decimals,
    )?;

    emit!(CollateralDeposited {
        obligation: ctx.accounts.obligation.key(),
        host,
        collateral_mint: ctx.accounts.collateral_mint.key(),
        amount,
        locked_at: clock.unix_timestamp,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ObligationStatus;

    fn host() -> Pubkey {
        Pubkey::new_from_array([3u8; 32])
    }

    fn fixture() -> (Obligation, SupportedCollateral) {
        let obligation = Obligation {
            face_amount: 1_000_000,
            end_time: 1_700_005_000,
            host_owner: host(),
            ownership_mint: Pubkey::new_from_array([1u8; 32]),
            ..Default::default()
        };
        let supported = SupportedCollateral {
            authority: Pubkey::new_from_array([9u8; 32]),
            collateral_mint: Pubkey::new_from_array([5u8; 32]),
            vault: Pubkey::new_from_array([6u8; 32]),
            max_ltv_bps: 5_000,
            is_active: true,
            total_locked: 0,
            bump: 254,
        };
        (obligation, supported)
    }

    #[test]
    fn deposit_locks_and_counts_collateral() {
        let (mut obligation, mut supported) = fixture();
        apply_deposit(&mut obligation, &mut supported, &host(), 1, 800_000, 500_000, 10).unwrap();

        assert_eq!(obligation.status(), ObligationStatus::Locked);
        assert_eq!(obligation.collateral_mint, supported.collateral_mint);
        assert_eq!(supported.total_locked, 500_000);
    }

    #[test]
    fn host_without_the_ownership_token_cannot_deposit() {
        let (mut obligation, mut supported) = fixture();
        assert_eq!(
            apply_deposit(&mut obligation, &mut supported, &host(), 0, 800_000, 1_000, 10).unwrap_err(),
            ObligationError::TokenNotInCustody.into()
        );
        assert_eq!(obligation.status(), ObligationStatus::Minted);
        assert_eq!(supported.total_locked, 0);
    }

    #[test]
    fn short_collateral_balance_is_rejected() {
        let (mut obligation, mut supported) = fixture();
        assert_eq!(
            apply_deposit(&mut obligation, &mut supported, &host(), 1, 999, 1_000, 10).unwrap_err(),
            ObligationError::InsufficientFunds.into()
        );
        assert_eq!(obligation.status(), ObligationStatus::Minted);
    }

    #[test]
    fn paused_asset_takes_no_deposits() {
        let (mut obligation, mut supported) = fixture();
        supported.is_active = false;
        assert_eq!(
            apply_deposit(&mut obligation, &mut supported, &host(), 1, 800_000, 1_000, 10).unwrap_err(),
            ObligationError::CollateralNotActive.into()
        );
    }

    #[test]
    fn ltv_is_checked_before_balances() {
        let (mut obligation, mut supported) = fixture();
        assert_eq!(
            apply_deposit(&mut obligation, &mut supported, &host(), 0, 0, 500_001, 10).unwrap_err(),
            ObligationError::ExceedsMaxLtv.into()
        );
    }
}
