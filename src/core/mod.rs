pub mod config;
pub mod constants;
pub mod element;
pub mod figure;
pub mod geo;
pub mod json;
pub mod map;
pub mod tree;
pub mod viewport;
