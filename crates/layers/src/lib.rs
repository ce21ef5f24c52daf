pub mod cursor;
pub mod grid;
pub mod layer;
pub mod objects;
pub mod sizing;
pub mod symbology;
pub mod vector;

pub use layer::*;
