pub const INTEGRATOR_SEED: &[u8] = b"integrator";
pub const SUPPORTED_COLLATERAL_SEED: &[u8] = b"vault";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const OBLIGATION_SEED: &[u8] = b"obligation";

/// Seconds after a booking's end time during which only the host may resolve it.
pub const GRACE_PERIOD_SECONDS: i64 = 60 * 60 * 24 * 7;

pub const MAX_BOOKING_ID_LEN: usize = 32;
pub const BPS_DENOMINATOR: u64 = 10_000;

// The ownership token is a single indivisible unit
pub const OWNERSHIP_TOKEN_DECIMALS: u8 = 0;
pub const OWNERSHIP_TOKEN_SUPPLY: u64 = 1;

// Base SPL mint layout, identical under Token and Token-2022 without extensions
pub const MINT_ACCOUNT_LEN: usize = 82;
