//! # rustpubmed
//!
//! PubMed Non-Academic Author Extraction Pipeline
//!
//! ## Modules
//!
//! - [`entrez`] - PubMed E-utilities client (esearch + efetch)
//! - [`parser`] - efetch XML parsing into paper records
//! - [`filters`] - author classification by affiliation keywords
//! - [`output`] - CSV sink
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustpubmed::{entrez::EntrezClient, filters::CompanyKeywords};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EntrezClient::new()?;
//!     let papers = client
//!         .fetch_papers("cancer treatment", &CompanyKeywords::default())
//!         .await?;
//!     println!("Found {} papers", papers.len());
//!     Ok(())
//! }
//! ```

pub mod entrez;
pub mod error;
pub mod filters;
pub mod output;
pub mod parser;

pub use error::{PubmedError, Result};
