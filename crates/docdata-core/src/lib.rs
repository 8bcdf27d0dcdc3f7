pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod render;
pub mod transform;

pub use transform::build_collections;
