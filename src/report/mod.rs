pub mod models;
mod parser;

pub use models::{NeighborhoodRecord, ParsedReport, SummaryMetrics};
pub use parser::{ReportParser, DEFAULT_YIELD_PLAUSIBILITY_MAX};
