//! Web search via the DuckDuckGo Instant Answer API

use crate::error::{Result, ToolError};
use crate::tools::utils::tool_failure;
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const ENDPOINT: &str = "https://api.duckduckgo.com/";
const MAX_RELATED: usize = 8;

/// Web search tool
pub struct WebSearchTool {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Related topics are either plain entries or named groups of entries
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
}

impl RelatedTopic {
    fn flatten<'a>(&'a self, out: &mut Vec<(&'a str, &'a str)>) {
        match self {
            RelatedTopic::Entry { text, first_url } => out.push((text.as_str(), first_url.as_str())),
            RelatedTopic::Group { topics } => {
                for topic in topics {
                    topic.flatten(out);
                }
            }
        }
    }
}

fn render(query: &str, answer: &InstantAnswer) -> String {
    let mut sections = Vec::new();

    if !answer.heading.is_empty() {
        sections.push(format!("**{}**", answer.heading));
    }
    if !answer.answer.is_empty() {
        sections.push(answer.answer.clone());
    }
    if !answer.abstract_text.is_empty() {
        let mut text = answer.abstract_text.clone();
        if !answer.abstract_url.is_empty() {
            text.push_str(&format!("\n\nSource: {}", answer.abstract_url));
        }
        sections.push(text);
    }

    let mut related = Vec::new();
    for topic in &answer.related_topics {
        topic.flatten(&mut related);
    }
    let bullets: Vec<String> = related
        .into_iter()
        .filter(|(text, _)| !text.is_empty())
        .take(MAX_RELATED)
        .map(|(text, url)| {
            if url.is_empty() {
                format!("- {}", text)
            } else {
                format!("- {} ({})", text, url)
            }
        })
        .collect();
    if !bullets.is_empty() {
        sections.push(format!("Related:\n{}", bullets.join("\n")));
    }

    if sections.is_empty() {
        format!("No results found for: {}", query)
    } else {
        sections.join("\n\n")
    }
}

impl WebSearchTool {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            endpoint: ENDPOINT.to_string(),
        }
    }

    async fn instant_answer(&self, query: &str) -> Result<InstantAnswer> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        // DuckDuckGo answers with `application/x-javascript`, so parse the text ourselves
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(InstantAnswer::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for quick facts, definitions and related links. \
         Input should be a short search query. Use this for current topics or when \
         Wikipedia has no page."
    }

    async fn execute(&self, input: &str) -> Result<String> {
        let query = input.trim();
        if query.is_empty() {
            return Err(ToolError::InvalidInput {
                message: "Search query is empty".to_string(),
            }
            .into());
        }

        tracing::debug!("Web searching '{}'", query);
        let answer = self
            .instant_answer(query)
            .await
            .map_err(|e| tool_failure(self.name(), e))?;

        Ok(render(query, &answer))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample::new(
            "Quick facts",
            "Rust programming language",
            "**Rust (programming language)**\n\n<abstract>\n\nRelated:\n- ...",
        )]
    }
}
