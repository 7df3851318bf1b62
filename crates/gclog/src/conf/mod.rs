//! Configuration model and loading.

pub mod load;
pub mod model;

pub use model::{GcLogConfig, MalformedPolicy, PreprocessConfig};
