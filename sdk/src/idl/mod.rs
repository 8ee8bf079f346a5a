//! Program interface descriptor: model, encoding and loading

pub mod descriptor;
pub mod loader;

pub use descriptor::*;
pub use loader::*;
