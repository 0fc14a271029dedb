use crate::cache::now_unix;
use crate::config::AppConfig;
use crate::report::ReportParser;
use crate::research::{GroqAgent, ReportLog, ResearchPipeline};
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use crate::sessions::SessionStore;
use astra::Server;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cache;
mod config;
mod errors;
mod report;
mod research;
mod responses;
mod router;
mod sessions;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1️⃣ Settings from .env / environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Remote agent behind the retrying pipeline
    let agent = match GroqAgent::new(config.llm.clone(), config.serper_api_key.clone()) {
        Ok(agent) => agent,
        Err(e) => {
            error!("❌ Could not build the research client: {e}");
            std::process::exit(1);
        }
    };

    let pipeline = ResearchPipeline::new(Arc::new(agent), config.retry_policy())
        .with_report_log(config.report_output_path.clone().map(ReportLog::new));

    let state = AppState {
        pipeline,
        parser: ReportParser::new(config.yield_plausibility_max),
        sessions: SessionStore::new(config.cache_ttl_secs),
        cache_ttl_secs: config.cache_ttl_secs,
        clock: now_unix,
    };

    // 3️⃣ Start the server
    let addr = config.bind_addr;
    info!(model = %config.llm.model, "Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
