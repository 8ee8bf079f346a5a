pub mod builder;
pub mod token;

pub use builder::*;
pub use token::*;
