pub mod admin;
pub mod lifecycle;

pub use admin::*;
pub use lifecycle::*;
