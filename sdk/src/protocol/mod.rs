pub mod pda;
pub mod units;
pub mod validation;

pub use pda::*;
pub use units::*;
pub use validation::*;
