pub mod mint_obligation;
pub mod deposit_collateral;
pub mod settle_obligation;
pub mod liquidate_default;

pub use mint_obligation::*;
pub use deposit_collateral::*;
pub use settle_obligation::*;
pub use liquidate_default::*;
