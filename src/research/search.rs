// research/search.rs
use crate::research::models::{SearchRequest, SearchResponse};
use crate::research::ResearchError;
use reqwest::blocking::Client;
use tracing::{debug, instrument};

const SERPER_URL: &str = "https://google.serper.dev/search";
const RESULTS_PER_QUERY: u32 = 5;

/// Web search through the Serper API.
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Result<Vec<String>, ResearchError> {
        let payload = SearchRequest {
            q: query,
            num: RESULTS_PER_QUERY,
        };

        let resp = self
            .client
            .post(SERPER_URL)
            .header("X-API-KEY", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .map_err(ResearchError::from_reqwest)?;

        let status = resp.status();
        let text = resp.text().map_err(ResearchError::from_reqwest)?;

        if !status.is_success() {
            return Err(ResearchError::classify(
                Some(status.as_u16()),
                &format!("Serper search failed: {text}"),
            ));
        }

        let parsed: SearchResponse = serde_json::from_str(&text)
            .map_err(|e| ResearchError::Unknown(format!("Serper response: {e}")))?;

        let bullets: Vec<String> = parsed
            .organic
            .iter()
            .filter_map(|hit| hit.to_bullet())
            .collect();
        debug!(hits = bullets.len(), "search complete");

        Ok(bullets)
    }

    /// Run every query and fold the hits into one prompt block.
    pub fn gather_context(&self, queries: &[String]) -> Result<String, ResearchError> {
        let mut context = String::new();
        for query in queries {
            let hits = self.search(query)?;
            if hits.is_empty() {
                continue;
            }
            context.push_str(&format!("Results for \"{query}\":\n"));
            for hit in hits {
                context.push_str(&hit);
                context.push('\n');
            }
            context.push('\n');
        }
        Ok(context.trim_end().to_string())
    }
}
