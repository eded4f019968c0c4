pub mod catalog;
pub mod definitions;

pub use catalog::*;
