pub mod components;
pub mod geometry;
pub mod spatial;
pub mod store;

pub use geometry::*;
pub use store::*;
