pub mod base;
pub mod feature_group;
pub mod macros;
pub mod marker;
pub mod tile;
