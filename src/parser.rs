//! PubMed efetch XML parsing.
//!
//! Deserializes the `PubmedArticleSet` document returned by efetch and turns
//! each `PubmedArticle` node into a [`PaperRecord`], running author
//! classification along the way. PMID and ArticleTitle are required fields;
//! their absence is a typed parse error, not a placeholder.

use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::debug;

use crate::error::{OptionExt, PubmedError, Result};
use crate::filters::{extract_non_academic_authors, AuthorInfo, CompanyKeywords, UNKNOWN_NAME};

/// Sentinel for records without a publication year
pub const UNKNOWN_DATE: &str = "Unknown";

/// One parsed paper.
///
/// `non_academic_authors` and `company_affiliations` are lockstep lists: index
/// i in one refers to the same author as index i in the other. An empty
/// `corresponding_email` means no author was flagged as corresponding.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperRecord {
    pub pubmed_id: String,
    pub title: String,
    pub publication_date: String,
    pub non_academic_authors: Vec<String>,
    pub company_affiliations: Vec<String>,
    pub corresponding_email: String,
}

// === efetch XML document shape ===

/// Text-bearing element; attributes (e.g. `PMID Version="1"`) are ignored.
#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct PubmedArticleSet {
    #[serde(rename = "PubmedArticle", default)]
    articles: Vec<PubmedArticle>,
}

#[derive(Debug, Deserialize)]
struct PubmedArticle {
    #[serde(rename = "MedlineCitation")]
    medline_citation: Option<MedlineCitation>,
}

#[derive(Debug, Deserialize)]
struct MedlineCitation {
    #[serde(rename = "PMID")]
    pmid: Option<TextNode>,
    #[serde(rename = "Article")]
    article: Option<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(rename = "ArticleTitle")]
    article_title: Option<TextNode>,
    #[serde(rename = "Journal")]
    journal: Option<Journal>,
    #[serde(rename = "AuthorList")]
    author_list: Option<AuthorList>,
}

#[derive(Debug, Deserialize)]
struct Journal {
    #[serde(rename = "JournalIssue")]
    journal_issue: Option<JournalIssue>,
}

#[derive(Debug, Deserialize)]
struct JournalIssue {
    #[serde(rename = "PubDate")]
    pub_date: Option<PubDate>,
}

#[derive(Debug, Deserialize)]
struct PubDate {
    #[serde(rename = "Year")]
    year: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthorList {
    #[serde(rename = "Author", default)]
    authors: Vec<AuthorNode>,
}

#[derive(Debug, Deserialize)]
struct AuthorNode {
    #[serde(rename = "LastName")]
    last_name: Option<TextNode>,
    #[serde(rename = "ForeName")]
    fore_name: Option<TextNode>,
    #[serde(rename = "Affiliation")]
    affiliation: Option<TextNode>,
    #[serde(rename = "Email")]
    email: Option<TextNode>,
}

/// Parse an efetch XML document into paper records.
///
/// Stateless: parsing the same document twice yields identical records. A
/// malformed document or a record missing PMID/ArticleTitle fails the whole
/// operation; there is no partial-result mode.
pub fn parse_article_set(xml: &str, keywords: &CompanyKeywords) -> Result<Vec<PaperRecord>> {
    let set: PubmedArticleSet = from_str(xml)
        .map_err(|e| PubmedError::Parse(format!("Failed to parse efetch XML: {}", e)))?;

    debug!(articles = set.articles.len(), "Parsed efetch article set");

    set.articles
        .into_iter()
        .map(|article| parse_record(article, keywords))
        .collect()
}

/// Extract one record from a `PubmedArticle` node.
fn parse_record(article: PubmedArticle, keywords: &CompanyKeywords) -> Result<PaperRecord> {
    let citation = article
        .medline_citation
        .ok_or_parse("PubmedArticle missing MedlineCitation")?;

    let pubmed_id = citation.pmid.ok_or_parse("PubmedArticle missing PMID")?.value;

    let article = citation
        .article
        .ok_or_parse("MedlineCitation missing Article")?;

    let title = article
        .article_title
        .ok_or_parse("Article missing ArticleTitle")?
        .value;

    let publication_date = article
        .journal
        .as_ref()
        .and_then(|j| j.journal_issue.as_ref())
        .and_then(|ji| ji.pub_date.as_ref())
        .and_then(|pd| pd.year.clone())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string());

    let authors: Vec<AuthorInfo> = article
        .author_list
        .map(|al| al.authors.into_iter().map(build_author).collect())
        .unwrap_or_default();

    let (non_academic_authors, company_affiliations, corresponding_email) =
        extract_non_academic_authors(&authors, keywords);

    Ok(PaperRecord {
        pubmed_id,
        title,
        publication_date,
        non_academic_authors,
        company_affiliations,
        corresponding_email,
    })
}

/// Build an [`AuthorInfo`] from a wire author node.
///
/// Name is "ForeName LastName" only when both components are present; a role
/// marker is not part of the efetch author node, so it stays unset here.
fn build_author(node: AuthorNode) -> AuthorInfo {
    let name = match (&node.fore_name, &node.last_name) {
        (Some(fore), Some(last)) => format!("{} {}", fore.value, last.value),
        _ => UNKNOWN_NAME.to_string(),
    };

    AuthorInfo {
        name,
        affiliation: node.affiliation.map(|a| a.value).unwrap_or_default(),
        email: node.email.map(|e| e.value),
        role: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE">
      <PMID Version="1">12345678</PMID>
      <Article>
        <Journal>
          <JournalIssue>
            <PubDate>
              <Year>2021</Year>
            </PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>A Study of Things</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Doe</LastName>
            <ForeName>John</ForeName>
            <Affiliation>XYZ Pharma Inc., corresponding author</Affiliation>
            <Email>john@xyzpharma.com</Email>
          </Author>
          <Author>
            <LastName>Smith</LastName>
            <ForeName>Alice</ForeName>
            <Affiliation>Harvard University</Affiliation>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn test_parse_article_set() {
        let keywords = CompanyKeywords::default();
        let records = parse_article_set(SAMPLE_XML, &keywords).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.pubmed_id, "12345678");
        assert_eq!(record.title, "A Study of Things");
        assert_eq!(record.publication_date, "2021");
        assert_eq!(record.non_academic_authors, vec!["John Doe"]);
        assert_eq!(
            record.company_affiliations,
            vec!["XYZ Pharma Inc., corresponding author"]
        );
        assert_eq!(record.corresponding_email, "john@xyzpharma.com");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let keywords = CompanyKeywords::default();
        let first = parse_article_set(SAMPLE_XML, &keywords).unwrap();
        let second = parse_article_set(SAMPLE_XML, &keywords).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_year_is_unknown() {
        let xml = r#"<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>1</PMID>
      <Article>
        <ArticleTitle>No Date Here</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let keywords = CompanyKeywords::default();
        let records = parse_article_set(xml, &keywords).unwrap();
        assert_eq!(records[0].publication_date, UNKNOWN_DATE);
        assert_eq!(records[0].non_academic_authors, Vec::<String>::new());
        assert_eq!(records[0].corresponding_email, "");
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let xml = r#"<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>1</PMID>
      <Article>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let keywords = CompanyKeywords::default();
        let err = parse_article_set(xml, &keywords).unwrap_err();
        assert!(matches!(err, PubmedError::Parse(_)));
        assert!(err.to_string().contains("ArticleTitle"));
    }

    #[test]
    fn test_missing_pmid_is_parse_error() {
        let xml = r#"<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <Article>
        <ArticleTitle>Orphan</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let keywords = CompanyKeywords::default();
        let err = parse_article_set(xml, &keywords).unwrap_err();
        assert!(matches!(err, PubmedError::Parse(_)));
        assert!(err.to_string().contains("PMID"));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let keywords = CompanyKeywords::default();
        let err = parse_article_set("not xml at all <<<", &keywords).unwrap_err();
        assert!(matches!(err, PubmedError::Parse(_)));
    }

    #[test]
    fn test_author_without_forename_is_unknown() {
        let xml = r#"<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation>
      <PMID>2</PMID>
      <Article>
        <ArticleTitle>Partial Names</ArticleTitle>
        <AuthorList>
          <Author>
            <LastName>Mononym</LastName>
            <Affiliation>Mono Biotech Ltd</Affiliation>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

        let keywords = CompanyKeywords::default();
        let records = parse_article_set(xml, &keywords).unwrap();
        assert_eq!(records[0].non_academic_authors, vec![UNKNOWN_NAME]);
        assert_eq!(records[0].company_affiliations, vec!["Mono Biotech Ltd"]);
    }
}
