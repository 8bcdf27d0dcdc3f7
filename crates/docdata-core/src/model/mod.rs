pub mod collection;
pub mod schema;

pub use collection::*;
pub use schema::*;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
