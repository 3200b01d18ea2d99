pub mod attestation;
pub mod math;
pub mod pda;

pub use attestation::*;
pub use math::*;
