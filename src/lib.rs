//! Merge several YOLO-style detection datasets into one single-class dataset.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod trainer;

pub use config::MergeSettings;
pub use error::{MergeError, MergeResult};
pub use orchestrator::run;
