pub mod dimension_editor;
pub mod layers;
