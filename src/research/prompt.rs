/// Persona the analyst agent runs under.
pub const ANALYST_ROLE: &str = "Retail Property Investment Analyst";
pub const ANALYST_GOAL: &str =
    "Research and analyze retail property investment opportunities in the specified city.";
pub const ANALYST_BACKSTORY: &str = "Expert analyst who finds and evaluates retail property investments. \
You use search tools to find current market data and present clear, actionable insights.";

/// A single research request for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchTask {
    pub city: String,
    pub description: String,
    pub expected_output: String,
    pub search_queries: Vec<String>,
}

impl ResearchTask {
    pub fn for_city(city: &str) -> Self {
        let city = city.trim();
        let search_queries = vec![
            format!("retail property investment {city} best areas"),
            format!("commercial real estate prices {city}"),
        ];

        let description = format!(
            r#"Search for retail property investment opportunities in {city}.

Search queries to use:
1. "{q1}"
2. "{q2}"

Report format:
**Area 1: [Name]**
Price: $X-$Y | Yield: X%
Reason: [Brief point]

**Area 2: [Name]**
Price: $X-$Y | Yield: X%
Reason: [Brief point]

**Area 3: [Name]**
Price: $X-$Y | Yield: X%
Reason: [Brief point]

Keep under 400 words total. IMPORTANT: Provide data specific to {city} only."#,
            q1 = search_queries[0],
            q2 = search_queries[1],
        );

        Self {
            city: city.to_string(),
            description,
            expected_output: format!(
                "3 neighborhoods in {city} with names, price ranges, yields, and investment reasons."
            ),
            search_queries,
        }
    }

    pub fn system_prompt(&self) -> String {
        format!("You are a {ANALYST_ROLE}. {ANALYST_BACKSTORY}\n\nYour goal: {ANALYST_GOAL}")
    }

    /// The user message, with any search results folded in ahead of the instructions.
    pub fn user_prompt(&self, search_context: Option<&str>) -> String {
        let mut prompt = String::new();
        if let Some(context) = search_context.filter(|c| !c.trim().is_empty()) {
            prompt.push_str("Web search results:\n");
            prompt.push_str(context);
            prompt.push_str("\n\n");
        }
        prompt.push_str(&self.description);
        prompt.push_str("\n\nExpected output: ");
        prompt.push_str(&self.expected_output);
        prompt
    }
}
