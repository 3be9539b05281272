//! Wikipedia lookup tool backed by the REST summary API

use crate::error::{Result, ToolError};
use crate::tools::utils::tool_failure;
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const DEFAULT_WIKI: &str = "https://en.wikipedia.org";
const NAME: &str = "wikipedia_search";

/// Wikipedia search tool
pub struct WikipediaTool {
    http: Client,
    wiki_url: String,
}

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(rename = "type", default)]
    kind: String,
    title: String,
    #[serde(default)]
    extract: String,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Deserialize)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Deserialize)]
struct PageUrl {
    page: String,
}

impl PageSummary {
    fn render(&self, wiki_url: &str) -> String {
        let url = self
            .content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .map(|desktop| desktop.page.clone())
            .unwrap_or_else(|| format!("{}/wiki/{}", wiki_url, title_to_path(&self.title)));

        format!("**{}**\n\n{}\n\nSource: {}", self.title, self.extract.trim(), url)
    }
}

/// Strip whitespace and trailing sentence punctuation from a query
pub fn clean_query(query: &str) -> &str {
    query
        .trim()
        .trim_end_matches(['?', '!', '.', ',', ';', ':'])
        .trim()
}

/// Extract the article title from a `…wikipedia.org/wiki/<Title>` URL
pub fn title_from_url(input: &str) -> Option<String> {
    let url = url::Url::parse(input).ok()?;
    let host = url.host_str()?;
    if !host.ends_with("wikipedia.org") {
        return None;
    }

    let raw = url.path().strip_prefix("/wiki/")?;
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw).ok()?;
    Some(decoded.replace('_', " "))
}

fn title_to_path(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_")).into_owned()
}

/// Titles from an opensearch reply: `[query, [titles], [descriptions], [urls]]`
fn opensearch_titles(body: &serde_json::Value) -> Vec<String> {
    body.get(1)
        .and_then(|titles| titles.as_array())
        .map(|titles| {
            titles
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

impl WikipediaTool {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            wiki_url: DEFAULT_WIKI.to_string(),
        }
    }

    /// Point the tool at another MediaWiki installation
    pub fn with_wiki_url(mut self, wiki_url: impl Into<String>) -> Self {
        self.wiki_url = wiki_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn summary(&self, title: &str) -> Result<Option<PageSummary>> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.wiki_url,
            title_to_path(title)
        );
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let response = self
            .http
            .get(format!("{}/w/api.php", self.wiki_url))
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", "3"),
                ("namespace", "0"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        Ok(opensearch_titles(&body))
    }

    async fn lookup(&self, query: &str) -> Result<String> {
        let title = title_from_url(query).unwrap_or_else(|| query.to_string());

        let summary = match self.summary(&title).await? {
            Some(summary) => Some(summary),
            None => {
                tracing::debug!("No page titled '{}', falling back to search", title);
                match self.search(&title).await?.first() {
                    Some(hit) => self.summary(hit).await?,
                    None => None,
                }
            }
        };

        let Some(summary) = summary else {
            return Ok(format!(
                "No Wikipedia page found for '{}'. Try different keywords.",
                title
            ));
        };

        if summary.kind == "disambiguation" {
            let options = self.search(&title).await?;
            if let Some(choice) = options.iter().find(|o| **o != summary.title) {
                if let Some(page) = self.summary(choice).await? {
                    return Ok(page.render(&self.wiki_url));
                }
            }
            if !options.is_empty() {
                return Ok(format!(
                    "Found multiple results. Please be more specific. Options: {}",
                    options.join(", ")
                ));
            }
        }

        tracing::info!("Wikipedia found '{}'", summary.title);
        Ok(summary.render(&self.wiki_url))
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Useful for searching Wikipedia and getting information about topics, people, places, \
         concepts, history, science, etc. Input should be a search query, topic name or a \
         Wikipedia URL. Use this when the user asks 'what is', 'who is', 'tell me about', or \
         wants information/facts about something."
    }

    async fn execute(&self, input: &str) -> Result<String> {
        let query = clean_query(input);
        if query.is_empty() {
            return Err(ToolError::InvalidInput {
                message: "Wikipedia query is empty".to_string(),
            }
            .into());
        }

        tracing::debug!("Wikipedia searching '{}'", query);
        self.lookup(query).await.map_err(|e| tool_failure(NAME, e))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample::new(
                "Look up a topic",
                "Alan Turing",
                "**Alan Turing**\n\n<summary>\n\nSource: https://en.wikipedia.org/wiki/Alan_Turing",
            ),
            ToolExample::new(
                "Look up a page by URL",
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
                "Summary of the Rust programming language article",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_query() {
        assert_eq!(clean_query("  Who is Ada Lovelace?  "), "Who is Ada Lovelace");
        assert_eq!(clean_query("Paris!?."), "Paris");
        assert_eq!(clean_query("   "), "");
    }

    #[test]
    fn test_title_from_url() {
        assert_eq!(
            title_from_url("https://en.wikipedia.org/wiki/Alan_Turing").as_deref(),
            Some("Alan Turing")
        );
        assert_eq!(
            title_from_url("https://de.wikipedia.org/wiki/K%C3%B6ln").as_deref(),
            Some("Köln")
        );
        assert_eq!(title_from_url("https://example.com/wiki/Foo"), None);
        assert_eq!(title_from_url("Alan Turing"), None);
    }

    #[test]
    fn test_title_to_path() {
        assert_eq!(title_to_path("Alan Turing"), "Alan_Turing");
        assert_eq!(
            title_to_path("Rust (programming language)"),
            "Rust_%28programming_language%29"
        );
    }

    #[test]
    fn test_render_summary() {
        let summary: PageSummary = serde_json::from_str(
            r#"{"type":"standard","title":"Alan Turing","extract":"English mathematician. ",
                "content_urls":{"desktop":{"page":"https://en.wikipedia.org/wiki/Alan_Turing"}}}"#,
        )
        .unwrap();

        assert_eq!(
            summary.render(DEFAULT_WIKI),
            "**Alan Turing**\n\nEnglish mathematician.\n\nSource: https://en.wikipedia.org/wiki/Alan_Turing"
        );
    }

    #[test]
    fn test_render_without_content_urls() {
        let summary: PageSummary =
            serde_json::from_str(r#"{"title":"Ada Lovelace","extract":"Mathematician"}"#).unwrap();
        assert!(summary
            .render(DEFAULT_WIKI)
            .ends_with("Source: https://en.wikipedia.org/wiki/Ada_Lovelace"));
    }

    #[test]
    fn test_opensearch_titles() {
        let body = serde_json::json!(["turing", ["Alan Turing", "Turing machine"], [], []]);
        assert_eq!(opensearch_titles(&body), vec!["Alan Turing", "Turing machine"]);

        let empty = serde_json::json!(["zzzz", [], [], []]);
        assert!(opensearch_titles(&empty).is_empty());
        assert!(opensearch_titles(&serde_json::json!({})).is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let tool = WikipediaTool::new(Client::new());
        assert!(tool.execute(" ?? ").await.is_err());
    }
}
