//! Domain types.

mod env;
mod group;

pub use env::EnvMap;
pub use group::Group;
