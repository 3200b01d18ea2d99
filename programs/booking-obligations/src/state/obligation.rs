use anchor_lang::prelude::*;
use crate::errors::ObligationError;
use crate::utils::math::{check_grace_period_over, check_max_ltv};

/// Who holds the ownership token. Exactly one at any time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Custodian {
    #[default]
    Host,
    ObligationVault,
    SharedPool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ObligationStatus {
    Minted,
    Locked,
    Settled,
    Defaulted,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum DurationTier {
    #[default]
    OneMonth,
    ThreeMonth,
    SixMonth,
    TwelveMonth,
}

impl DurationTier {
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(DurationTier::OneMonth),
            1 => Ok(DurationTier::ThreeMonth),
            2 => Ok(DurationTier::SixMonth),
            3 => Ok(DurationTier::TwelveMonth),
            _ => err!(ObligationError::InvalidTier),
        }
    }

    /// Return multiplier paid to investors, applied by the pool off-chain.
    pub fn multiplier_bps(&self) -> u16 {
        match self {
            DurationTier::OneMonth => 250,
            DurationTier::ThreeMonth => 350,
            DurationTier::SixMonth => 450,
            DurationTier::TwelveMonth => 650,
        }
    }
}

#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Obligation {
    #[max_len(32)]
    pub booking_id: String,
    pub face_amount: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub host_owner: Pubkey,
    pub oracle: Pubkey,
    pub tier: DurationTier,
    pub investor: Pubkey,             // informational only
    pub integrator_config: Pubkey,
    pub ownership_mint: Pubkey,
    pub collateral_mint: Pubkey,      // default until the first deposit
    pub collateral_amount: u64,
    pub custodian: Custodian,
    pub is_locked: bool,
    pub is_settled: bool,
    pub minted_at: i64,
    pub locked_at: i64,
    pub resolved_at: Option<i64>,
    pub bump: u8,
}

impl Obligation {
    pub const LEN: usize = 8 + Obligation::INIT_SPACE;

    /// A freshly allocated record is zeroed; a minted one always names its token.
    pub fn is_initialized(&self) -> bool {
        self.ownership_mint != Pubkey::default()
    }

    pub fn ensure_unminted(&self) -> Result<()> {
        require!(!self.is_initialized(), ObligationError::DuplicateObligation);
        Ok(())
    }

    pub fn status(&self) -> ObligationStatus {
        match self.custodian {
            Custodian::SharedPool => ObligationStatus::Defaulted,
            Custodian::ObligationVault => ObligationStatus::Locked,
            Custodian::Host if self.is_settled => ObligationStatus::Settled,
            Custodian::Host => ObligationStatus::Minted,
        }
    }

    pub fn invariants_hold(&self) -> bool {
        let flags_consistent = !(self.is_settled && self.is_locked)
            && (self.collateral_amount == 0 || self.is_locked);
        let custody_consistent = match self.custodian {
            Custodian::Host => !self.is_locked,
            Custodian::ObligationVault => self.is_locked && !self.is_settled,
            Custodian::SharedPool => !self.is_locked && !self.is_settled,
        };
        flags_consistent && custody_consistent
    }

    pub fn ensure_depositable(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.host_owner, ObligationError::Unauthorized);
        require!(!self.is_settled, ObligationError::AlreadySettled);
        require!(self.custodian != Custodian::SharedPool, ObligationError::ObligationDefaulted);
        require!(!self.is_locked, ObligationError::AlreadyLocked);
        Ok(())
    }

    pub fn ensure_lockable(&self, caller: &Pubkey, amount: u64, max_ltv_bps: u16) -> Result<()> {
        self.ensure_depositable(caller)?;
        require!(amount > 0, ObligationError::ZeroAmount);
        check_max_ltv(amount, self.face_amount, max_ltv_bps)
    }

    /// Minted -> Locked. The caller moves the token and collateral into
    /// program custody in the same instruction.
    pub fn lock(
        &mut self,
        caller: &Pubkey,
        collateral_mint: Pubkey,
        amount: u64,
        max_ltv_bps: u16,
        now: i64,
    ) -> Result<()> {
        self.ensure_lockable(caller, amount, max_ltv_bps)?;

        self.collateral_mint = collateral_mint;
        self.collateral_amount = amount;
        self.is_locked = true;
        self.locked_at = now;
        self.custodian = Custodian::ObligationVault;
        debug_assert!(self.invariants_hold());
        Ok(())
    }

    fn require_locked(&self) -> Result<()> {
        if !self.is_locked {
            msg!("Obligation {} is {:?}", self.ownership_mint, self.status());
            return err!(ObligationError::NotLocked);
        }
        Ok(())
    }

    // A Minted record names no collateral yet, so the mint is compared only
    // once the state guards have passed.
    fn require_collateral_mint(&self, collateral_mint: &Pubkey) -> Result<()> {
        require_keys_eq!(*collateral_mint, self.collateral_mint, ObligationError::CollateralMismatch);
        Ok(())
    }

    pub fn ensure_settleable(&self, caller: &Pubkey, collateral_mint: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.host_owner, ObligationError::Unauthorized);
        require!(!self.is_settled, ObligationError::AlreadySettled);
        self.require_locked()?;
        self.require_collateral_mint(collateral_mint)
    }

    /// Locked -> Settled. Returns the collateral amount to release to the host.
    pub fn settle(&mut self, caller: &Pubkey, collateral_mint: &Pubkey, now: i64) -> Result<u64> {
        self.ensure_settleable(caller, collateral_mint)?;

        let released = self.collateral_amount;
        self.collateral_amount = 0;
        self.is_locked = false;
        self.is_settled = true;
        self.custodian = Custodian::Host;
        self.resolved_at = Some(now);
        debug_assert!(self.invariants_hold());
        Ok(released)
    }

    pub fn ensure_liquidatable(&self, collateral_mint: &Pubkey, now: i64) -> Result<()> {
        require!(!self.is_settled, ObligationError::AlreadySettled);
        self.require_locked()?;
        check_grace_period_over(self.end_time, now)?;
        self.require_collateral_mint(collateral_mint)
    }

    /// Locked -> Defaulted. Returns the collateral amount swept to the pool.
    pub fn mark_defaulted(&mut self, collateral_mint: &Pubkey, now: i64) -> Result<u64> {
        self.ensure_liquidatable(collateral_mint, now)?;

        let seized = self.collateral_amount;
        self.collateral_amount = 0;
        self.is_locked = false;
        self.custodian = Custodian::SharedPool;
        self.resolved_at = Some(now);
        debug_assert!(self.invariants_hold());
        Ok(seized)
    }
}
