pub mod drawable2d;

pub use drawable2d::*;
