// research/agent.rs
use crate::config::LlmConfig;
use crate::research::models::{ChatMessage, ChatRequest, ChatResponse};
use crate::research::prompt::ResearchTask;
use crate::research::search::SerperClient;
use crate::research::ResearchError;
use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Something that can turn a research task into a free-text report.
pub trait ResearchAgent: Send + Sync {
    fn execute(&self, task: &ResearchTask) -> Result<String, ResearchError>;
}

/// Analyst agent backed by Groq chat completions, with optional Serper search.
pub struct GroqAgent {
    client: Client,
    llm: LlmConfig,
    search: Option<SerperClient>,
}

impl GroqAgent {
    pub fn new(llm: LlmConfig, serper_api_key: Option<String>) -> Result<Self, ResearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(llm.timeout_secs))
            .build()
            .map_err(|e| ResearchError::Transport(e.to_string()))?;

        let search = serper_api_key.map(|key| SerperClient::new(client.clone(), key));
        if search.is_none() {
            warn!("SERPER_API_KEY not set, research runs without web search");
        }

        Ok(Self {
            client,
            llm,
            search,
        })
    }

    fn search_context(&self, task: &ResearchTask) -> Result<Option<String>, ResearchError> {
        let Some(search) = &self.search else {
            return Ok(None);
        };

        match search.gather_context(&task.search_queries) {
            Ok(context) => Ok(Some(context)),
            // Let the backoff wrapper deal with rate limits; anything else just
            // means the model works without fresh results.
            Err(err) if err.is_rate_limited() => Err(err),
            Err(err) => {
                warn!(error = %err, "web search failed, continuing without results");
                Ok(None)
            }
        }
    }

    fn complete(&self, task: &ResearchTask, context: Option<&str>) -> Result<String, ResearchError> {
        let system = task.system_prompt();
        let user = task.user_prompt(context);

        let payload = ChatRequest {
            model: &self.llm.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
        };

        let resp = self
            .client
            .post(&self.llm.api_url)
            .bearer_auth(&self.llm.api_key)
            .json(&payload)
            .send()
            .map_err(ResearchError::from_reqwest)?;

        let status = resp.status();
        let text = resp.text().map_err(ResearchError::from_reqwest)?;

        if !status.is_success() {
            return Err(ResearchError::classify(Some(status.as_u16()), &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ResearchError::Unknown(format!("Malformed completion response: {e}")))?;

        parsed
            .into_text()
            .ok_or_else(|| ResearchError::Unknown("Model returned an empty report".into()))
    }
}

impl ResearchAgent for GroqAgent {
    #[instrument(skip(self, task), fields(city = %task.city, model = %self.llm.model))]
    fn execute(&self, task: &ResearchTask) -> Result<String, ResearchError> {
        let start = Instant::now();
        let context = self.search_context(task)?;
        let report = self.complete(task, context.as_deref())?;
        info!(elapsed = ?start.elapsed(), chars = report.len(), "report received");
        Ok(report)
    }
}
