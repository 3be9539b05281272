//! Fetch a web page and return its readable text

use crate::error::{Result, ToolError};
use crate::tools::utils::{collapse_whitespace, tool_failure, truncate_chars};
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use url::Url;

const NAME: &str = "fetch_url";
const MAX_CHARS: usize = 2000;
const DENIED_HOSTS: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "::1", "[::1]"];

static RE_SCRIPT_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style|noscript)\b.*?</(script|style|noscript)>").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// URL fetch tool
pub struct FetchUrlTool {
    http: Client,
}

/// Parse and vet a URL before any request is made
pub fn validate_url(input: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(input.trim()).map_err(|e| format!("invalid URL '{}': {}", input, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }

    let host = url.host_str().ok_or_else(|| "URL has no host".to_string())?;
    if DENIED_HOSTS.contains(&host.to_ascii_lowercase().as_str()) {
        return Err(format!("access to '{}' is not allowed", host));
    }

    Ok(url)
}

/// Reduce an HTML document to its visible text
pub fn html_to_text(html: &str) -> String {
    let without_scripts = RE_SCRIPT_STYLE.replace_all(html, " ");
    let without_tags = RE_TAG.replace_all(&without_scripts, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&decoded)
}

impl FetchUrlTool {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    async fn fetch(&self, url: Url) -> Result<String> {
        let response = self.http.get(url).send().await?.error_for_status()?;

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        let body = response.text().await?;
        let text = if is_html {
            html_to_text(&body)
        } else {
            collapse_whitespace(&body)
        };

        Ok(truncate_chars(&text, MAX_CHARS).to_string())
    }
}

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Fetch a public web page and return its text content (first 2000 characters). \
         Input should be a full http or https URL. Use this when the user gives a link or \
         when you need the contents of a specific page."
    }

    async fn execute(&self, input: &str) -> Result<String> {
        let url = validate_url(input).map_err(|message| ToolError::InvalidInput { message })?;

        tracing::debug!("Fetching {}", url);
        self.fetch(url).await.map_err(|e| tool_failure(NAME, e))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![ToolExample::new(
            "Read a page",
            "https://www.rust-lang.org/",
            "Rust A language empowering everyone to build reliable and efficient software. ...",
        )]
    }
}
