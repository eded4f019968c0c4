pub mod column;
pub mod editor;
pub mod index_pattern;
pub mod layer;
pub mod matrix;
pub mod operation;

pub use column::*;
pub use editor::*;
pub use index_pattern::*;
pub use layer::*;
pub use matrix::*;
pub use operation::*;
