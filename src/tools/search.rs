//! Search and page extraction using daedra
//!
//! This module provides the default [`Retriever`] and [`TextExtractor`]
//! via the daedra crate, which uses DuckDuckGo as the search backend.

use crate::tools::capabilities::{Retriever, TextExtractor};
use crate::types::{AppError, Result, Source};
use async_trait::async_trait;

/// Web search retriever powered by daedra
#[derive(Debug, Default, Clone, Copy)]
pub struct DaedraRetriever;

impl DaedraRetriever {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Retriever for DaedraRetriever {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn retrieve(&self, query: &str, max_results: usize) -> Result<Vec<Source>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Empty search query".to_string()));
        }

        let search_args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: max_results,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&search_args)
            .await
            .map_err(|e| AppError::external("retrieve", format!("Search failed: {}", e)))?;

        Ok(response
            .data
            .iter()
            .take(max_results)
            .map(|r| Source::new(r.title.clone(), r.url.clone()))
            .collect())
    }
}

/// Page text extractor powered by daedra
#[derive(Debug, Default, Clone, Copy)]
pub struct DaedraExtractor;

impl DaedraExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for DaedraExtractor {
    fn name(&self) -> &str {
        "daedra-fetch"
    }

    async fn extract_text(&self, url: &str) -> Result<Option<String>> {
        let fetch_args = daedra::VisitPageArgs {
            url: url.to_string(),
            include_images: false,
            selector: None,
        };

        let page = daedra::tools::fetch::fetch_page(&fetch_args)
            .await
            .map_err(|e| AppError::external("extract", format!("Failed to fetch page: {}", e)))?;

        let content = page.content.trim();
        Ok((!content.is_empty()).then(|| content.to_string()))
    }
}
