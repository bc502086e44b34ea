//! PubMed Entrez E-utilities client.
//!
//! Wraps the esearch (keyword search -> PMID list) and efetch (PMID list ->
//! article XML) endpoints. One best-effort fetch per invocation: no retries,
//! no pagination past the first page, and the two calls run strictly in
//! sequence.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{PubmedError, Result};
use crate::filters::CompanyKeywords;
use crate::parser::{self, PaperRecord};

/// Entrez E-utilities endpoint URLs
const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

/// Entrez database to query
const DB: &str = "pubmed";

/// Fixed page-size cap for search results
const MAX_RESULTS: u32 = 10;

/// User agent sent with every request
const USER_AGENT: &str = "rustpubmed/0.1";

/// esearch JSON envelope
#[derive(Debug, Deserialize)]
struct ESearchResponse {
    #[serde(default)]
    esearchresult: ESearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Client for the PubMed E-utilities API.
#[derive(Debug, Clone)]
pub struct EntrezClient {
    client: Client,
    esearch_url: String,
    efetch_url: String,
}

impl EntrezClient {
    /// Create a client against the public E-utilities endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(ESEARCH_URL, EFETCH_URL)
    }

    /// Create a client against custom endpoint URLs (mirror sites, tests).
    pub fn with_endpoints(esearch_url: &str, efetch_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            esearch_url: esearch_url.to_string(),
            efetch_url: efetch_url.to_string(),
        })
    }

    /// Search PubMed for a query, returning up to [`MAX_RESULTS`] PMIDs.
    ///
    /// Fails with [`PubmedError::Api`] on a non-success status and with
    /// [`PubmedError::NoResults`] when the identifier list comes back empty.
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(PubmedError::Validation(
                "Search query must not be empty".to_string(),
            ));
        }

        info!(query = query, retmax = MAX_RESULTS, "Searching PubMed");

        let retmax = MAX_RESULTS.to_string();
        let response = self
            .client
            .get(&self.esearch_url)
            .query(&[
                ("db", DB),
                ("term", query),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PubmedError::Api {
                code: response.status().as_u16() as i32,
                message: format!("Failed to search PubMed: {}", response.status()),
            });
        }

        let data: ESearchResponse = response.json().await?;
        let ids = data.esearchresult.idlist;

        if ids.is_empty() {
            return Err(PubmedError::NoResults(query.to_string()));
        }

        debug!(count = ids.len(), "Search returned PMIDs");
        Ok(ids)
    }

    /// Fetch the full article XML for a batch of PMIDs in one request.
    ///
    /// Identifiers are comma-joined; no batching limit is enforced beyond
    /// whatever the remote imposes.
    pub async fn fetch_details(&self, ids: &[String]) -> Result<String> {
        debug!(count = ids.len(), "Fetching PubMed article details");

        let response = self
            .client
            .get(&self.efetch_url)
            .query(&[("db", DB), ("id", ids.join(",").as_str()), ("retmode", "xml")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PubmedError::Api {
                code: response.status().as_u16() as i32,
                message: format!("Failed to fetch paper details: {}", response.status()),
            });
        }

        Ok(response.text().await?)
    }

    /// Run the full pipeline: search, fetch details, parse and classify.
    pub async fn fetch_papers(
        &self,
        query: &str,
        keywords: &CompanyKeywords,
    ) -> Result<Vec<PaperRecord>> {
        let ids = self.search(query).await?;
        let xml = self.fetch_details(&ids).await?;
        let papers = parser::parse_article_set(&xml, keywords)?;

        info!(count = papers.len(), "Pipeline complete");
        Ok(papers)
    }
}
