pub mod benchmark;
pub mod config;
pub mod error;
pub mod files;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod text;

pub use error::{Error, Result};
