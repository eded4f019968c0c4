pub mod field_select;
pub mod popover;
pub mod resolver;

pub use popover::*;
pub use resolver::compute_choices;
