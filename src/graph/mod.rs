pub mod emit;
pub mod model;
pub mod namespaces;
pub mod turtle;

pub use emit::{emit, Provenance};
pub use model::Graph;
pub use namespaces::Namespaces;
pub use turtle::to_turtle;
