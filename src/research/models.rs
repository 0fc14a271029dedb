use serde::{Deserialize, Serialize};

// Chat completions (OpenAI-compatible, as served by Groq)
//  request
//   ├── model
//   ├── messages[] { role, content }
//   ├── temperature
//   └── max_tokens
//  response
//   └── choices[]
//        └── message { content }

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if it has any.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
    }
}

// Serper web search
//  request  { q, num }
//  response
//   └── organic[] { title, link, snippet }

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub q: &'a str,
    pub num: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganicResult {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

impl OrganicResult {
    /// One bullet line for the prompt: `- title (link): snippet`.
    pub fn to_bullet(&self) -> Option<String> {
        let title = self.title.as_deref().filter(|s| !s.is_empty());
        let snippet = self.snippet.as_deref().filter(|s| !s.is_empty());
        if title.is_none() && snippet.is_none() {
            return None;
        }

        let mut line = format!("- {}", title.unwrap_or("(untitled)"));
        if let Some(link) = self.link.as_deref().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" ({link})"));
        }
        if let Some(snippet) = snippet {
            line.push_str(": ");
            line.push_str(snippet);
        }
        Some(line)
    }
}
