//! Quote data and the quote-service client.
//!
//! The same static list backs the `quote-server` binary; the terminal's
//! `quote` command fetches from the HTTP endpoint and degrades to a fixed
//! fallback line on any failure.

use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const QUOTES: &[&str] = &[
    "Programs must be written for people to read, and only incidentally for machines to execute.",
    "Simplicity is prerequisite for reliability.",
    "The best way to predict the future is to invent it.",
    "First, solve the problem. Then, write the code.",
    "Make it work, make it right, make it fast.",
    "Premature optimization is the root of all evil.",
    "Deleted code is debugged code.",
    "A program that has not been tested does not work.",
    "The cheapest, fastest, and most reliable components are those that aren't there.",
    "Inside every large program is a small program struggling to get out.",
    "Good judgment comes from experience, and experience comes from bad judgment.",
    "There are only two hard things in computer science: cache invalidation and naming things.",
];

/// Uniformly random entry from the static list.
pub fn random_quote() -> &'static str {
    QUOTES[fastrand::usize(..QUOTES.len())]
}

pub const FALLBACK_LINE: &str = "🤷 There is no quote at the moment. Please try again later.";

pub const DEFAULT_QUOTE_URL: &str = "http://127.0.0.1:8787/api/quote";

#[derive(Deserialize)]
struct QuoteResponse {
    quote: String,
}

/// Accepts only a successful status with a non-empty string `quote` field;
/// everything else (bad status, malformed body, empty quote) is `None`.
pub fn parse_quote_body(success: bool, body: &str) -> Option<String> {
    if !success {
        return None;
    }
    let parsed: QuoteResponse = serde_json::from_str(body).ok()?;
    if parsed.quote.trim().is_empty() {
        return None;
    }
    Some(parsed.quote)
}

#[derive(Clone)]
pub struct QuoteClient {
    client: reqwest::Client,
    url: String,
}

impl Default for QuoteClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        let url = env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_URL.to_string());
        Self { client, url }
    }

    /// Returns the single output line for the `quote` command: the quote on
    /// success, the fixed fallback on any failure.
    pub async fn fetch_line(&self) -> String {
        match self.try_fetch().await {
            Ok(Some(quote)) => format!("💬 Quote of the Moment:\n{quote}"),
            Ok(None) => FALLBACK_LINE.to_string(),
            Err(e) => {
                tracing::debug!(error = %e, url = %self.url, "quote fetch failed");
                FALLBACK_LINE.to_string()
            }
        }
    }

    async fn try_fetch(&self) -> reqwest::Result<Option<String>> {
        let response = self.client.get(&self.url).send().await?;
        let success = response.status().is_success();
        let body = response.text().await?;
        Ok(parse_quote_body(success, &body))
    }
}
