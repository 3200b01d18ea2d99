use anchor_lang::prelude::*;

#[error_code]
pub enum ObligationError {
    #[msg("Attestation is missing, malformed, or not signed by the registered oracle")]
    InvalidAttestation,
    #[msg("Booking start time must be before its end time")]
    InvalidTimeRange,
    #[msg("Amount must be greater than 0")]
    ZeroAmount,
    #[msg("An obligation already exists for this ownership token")]
    DuplicateObligation,
    #[msg("Booking id too long (max 32 bytes)")]
    BookingIdTooLong,
    #[msg("Invalid duration tier")]
    InvalidTier,
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Integrator is not active")]
    IntegratorNotActive,
    #[msg("Collateral asset is not active")]
    CollateralNotActive,
    #[msg("Max LTV exceeds 100%")]
    InvalidLtv,
    #[msg("Collateral exceeds the maximum loan-to-value ratio")]
    ExceedsMaxLtv,
    #[msg("Insufficient collateral balance")]
    InsufficientFunds,
    #[msg("Caller does not hold the ownership token")]
    TokenNotInCustody,
    #[msg("Obligation is already locked")]
    AlreadyLocked,
    #[msg("Obligation is not locked")]
    NotLocked,
    #[msg("Obligation is already settled")]
    AlreadySettled,
    #[msg("Obligation has defaulted")]
    ObligationDefaulted,
    #[msg("Grace period has not ended")]
    GracePeriodNotOver,
    #[msg("Collateral mint does not match the locked obligation")]
    CollateralMismatch,
    #[msg("Oracle key must be a real signer")]
    InvalidOracle,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}
