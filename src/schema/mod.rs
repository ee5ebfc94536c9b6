pub mod attributes;
pub mod name;
pub mod origin;
