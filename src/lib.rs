pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod pipeline;
pub mod process;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use process::TrendRow;
