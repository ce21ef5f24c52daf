pub mod config;
pub mod controller;
pub mod options;
pub mod overlay;
pub mod surface;

pub use config::*;
pub use controller::*;
pub use options::*;
pub use overlay::*;
pub use surface::*;
