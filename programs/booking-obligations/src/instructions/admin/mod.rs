pub mod init_integrator;
pub mod add_supported_collateral;
pub mod set_active;

pub use init_integrator::*;
pub use add_supported_collateral::*;
pub use set_active::*;
