// Module map for the gclog analyzer.

// Core infrastructure
pub mod error;
pub mod units;
pub mod parser;
pub mod metrics;

// Pipeline stages
pub mod preprocess;
pub mod event;
pub mod run;
pub mod analysis;
pub mod pipeline;

// Runtime
pub mod conf;
pub mod runtime;

pub use error::{GcLogError, Result};
pub use pipeline::GcAnalyzer;
pub use run::JvmRun;
