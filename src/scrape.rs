//! Client for the external recipe scrape service.
//!
//! The service does the page scraping; this side only posts a URL and turns a
//! successful answer into a new canonical item.

use crate::classifier::detect_main_protein;
use crate::config::ScraperConfig;
use crate::error::MenuError;
use crate::model::CanonicalItem;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Structured fields returned by the scrape service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub main_protein: String,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[async_trait]
pub trait RecipeScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, MenuError>;
}

pub struct HttpScraper {
    endpoint: String,
    client: Client,
}

impl HttpScraper {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, MenuError> {
        let endpoint = format!("{}/scrape", base_url.trim_end_matches('/'));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { endpoint, client })
    }

    /// `None` when no scrape endpoint is configured.
    pub fn from_config(config: &ScraperConfig) -> Result<Option<Self>, MenuError> {
        match &config.endpoint {
            Some(endpoint) => Ok(Some(Self::new(
                endpoint,
                Duration::from_secs(config.timeout),
                &config.user_agent,
            )?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RecipeScraper for HttpScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapeResult, MenuError> {
        debug!("Requesting scrape of {} from {}", url, self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MenuError::ScrapeError(format!(
                "scrape service returned status {}",
                response.status()
            )));
        }

        let result: ScrapeResult = response.json().await?;
        info!(
            "Scraped '{}' with {} ingredients",
            result.title,
            result.ingredients.len()
        );
        Ok(result)
    }
}

impl CanonicalItem {
    /// New item for a freshly scraped recipe. It belongs to no menu yet.
    pub fn from_scrape(url: &str, result: ScrapeResult) -> CanonicalItem {
        let protein = match result.main_protein.trim() {
            "" | "unknown" => detect_main_protein(&result.ingredients).to_string(),
            reported => reported.to_string(),
        };
        let title = result.title.trim();
        let link_texts = if title.is_empty() {
            Vec::new()
        } else {
            vec![title.to_string()]
        };

        CanonicalItem {
            url: Some(url.to_string()),
            urls: vec![url.to_string()],
            link_texts,
            ingredients: result.ingredients,
            main_protein: Some(protein),
            count: 0,
            tags: result.tags,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_scrape_keeps_reported_protein() {
        let item = CanonicalItem::from_scrape(
            "https://example.com/curry",
            ScrapeResult {
                title: " Chickpea Curry ".to_string(),
                ingredients: vec!["1 can chickpeas".to_string()],
                tags: vec!["vegan".to_string()],
                main_protein: "vegetarian".to_string(),
            },
        );

        assert_eq!(item.url.as_deref(), Some("https://example.com/curry"));
        assert_eq!(item.urls, vec!["https://example.com/curry"]);
        assert_eq!(item.link_texts, vec!["Chickpea Curry"]);
        assert_eq!(item.main_protein.as_deref(), Some("vegetarian"));
        assert_eq!(item.tags, vec!["vegan"]);
        assert_eq!(item.count, 0);
        assert!(item.menu_files.is_empty());
    }

    #[test]
    fn test_from_scrape_detects_missing_protein() {
        let item = CanonicalItem::from_scrape(
            "https://example.com/stir-fry",
            ScrapeResult {
                title: String::new(),
                ingredients: vec!["14 oz extra-firm tofu".to_string()],
                tags: Vec::new(),
                main_protein: "unknown".to_string(),
            },
        );
        assert_eq!(item.main_protein.as_deref(), Some("tofu"));
        assert!(item.link_texts.is_empty());
        assert_eq!(item.display_title(), "Untitled item");
    }

    #[test]
    fn test_from_config_without_endpoint() {
        let scraper = HttpScraper::from_config(&ScraperConfig::default()).unwrap();
        assert!(scraper.is_none());
    }
}
