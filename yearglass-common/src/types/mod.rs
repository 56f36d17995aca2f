pub mod config;
pub mod display;
pub mod error;
pub mod progress;
pub mod time;

pub use config::*;
pub use display::*;
pub use error::*;
pub use progress::*;
pub use time::*;
