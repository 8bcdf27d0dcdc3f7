pub mod collections;
pub mod resolver;
pub mod resources;

pub use collections::build_collections;
pub use resolver::Resolver;
