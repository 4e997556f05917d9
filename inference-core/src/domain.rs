pub mod config;
pub mod data;
pub mod estimates;

pub use config::*;
pub use data::*;
pub use estimates::*;
