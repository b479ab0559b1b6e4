//! Sink registry and the composite sink that fans calls out to it.

mod error;
#[allow(clippy::module_inception)]
mod forest;
mod tree_of_souls;

pub use error::ForestError;
pub use forest::{Forest, Snapshot};
pub use tree_of_souls::TreeOfSouls;
