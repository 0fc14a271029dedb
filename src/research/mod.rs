pub mod agent;
pub mod backoff;
mod models;
pub mod pipeline;
pub mod prompt;
pub mod report_log;
mod research_error;
mod search;

pub use agent::{GroqAgent, ResearchAgent};
pub use backoff::RetryPolicy;
pub use pipeline::{ResearchOutcome, ResearchPipeline};
pub use report_log::ReportLog;
pub use research_error::ResearchError;
