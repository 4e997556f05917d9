pub mod charts;
pub mod config;
pub mod pipeline;
pub mod report;

pub use pipeline::{run, InferenceReport};
