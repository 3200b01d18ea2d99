pub mod integrator;
pub mod collateral;
pub mod pool;
pub mod obligation;

pub use integrator::*;
pub use collateral::*;
pub use pool::*;
pub use obligation::*;
