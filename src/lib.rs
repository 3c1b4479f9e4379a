pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod policy;
pub mod preprocess;
pub mod store;

pub use error::{Error, Result};
