//! CSV output sink.
//!
//! Writes one row per paper with display-ready columns: list fields are joined
//! with ", " and empty fields become the "N/A" sentinel.

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::parser::PaperRecord;

/// Sentinel for empty display fields
const NA: &str = "N/A";

/// One CSV row; headers match the serde rename values.
#[derive(Debug, Serialize)]
struct PaperRow {
    #[serde(rename = "PubmedID")]
    pubmed_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    corresponding_email: String,
}

impl From<&PaperRecord> for PaperRow {
    fn from(record: &PaperRecord) -> Self {
        Self {
            pubmed_id: record.pubmed_id.clone(),
            title: record.title.clone(),
            publication_date: record.publication_date.clone(),
            non_academic_authors: join_or_na(&record.non_academic_authors),
            company_affiliations: join_or_na(&record.company_affiliations),
            corresponding_email: if record.corresponding_email.is_empty() {
                NA.to_string()
            } else {
                record.corresponding_email.clone()
            },
        }
    }
}

fn join_or_na(items: &[String]) -> String {
    if items.is_empty() {
        NA.to_string()
    } else {
        items.join(", ")
    }
}

/// Save paper records to a CSV file.
pub fn save_csv(path: &Path, records: &[PaperRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_path(path)?;

    for record in records {
        wtr.serialize(PaperRow::from(record))?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = records.len(), "Saved CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        non_academic_authors: Vec<&str>,
        company_affiliations: Vec<&str>,
        corresponding_email: &str,
    ) -> PaperRecord {
        PaperRecord {
            pubmed_id: "12345678".to_string(),
            title: "A Study of Things".to_string(),
            publication_date: "2021".to_string(),
            non_academic_authors: non_academic_authors.into_iter().map(String::from).collect(),
            company_affiliations: company_affiliations.into_iter().map(String::from).collect(),
            corresponding_email: corresponding_email.to_string(),
        }
    }

    #[test]
    fn test_save_csv_writes_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("papers.csv");

        let records = vec![record(
            vec!["John Doe"],
            vec!["XYZ Pharma Inc."],
            "john@xyzpharma.com",
        )];
        save_csv(&path, &records).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "PubmedID,Title,Publication Date,Non-academic Author(s),Company Affiliation(s),Corresponding Author Email"
        );
        assert_eq!(
            lines.next().unwrap(),
            "12345678,A Study of Things,2021,John Doe,XYZ Pharma Inc.,john@xyzpharma.com"
        );
    }

    #[test]
    fn test_empty_fields_become_na() {
        let row = PaperRow::from(&record(vec![], vec![], ""));
        assert_eq!(row.non_academic_authors, NA);
        assert_eq!(row.company_affiliations, NA);
        assert_eq!(row.corresponding_email, NA);
    }

    #[test]
    fn test_multiple_values_joined() {
        let row = PaperRow::from(&record(
            vec!["A One", "B Two"],
            vec!["One Pharma", "Two Biotech"],
            "",
        ));
        assert_eq!(row.non_academic_authors, "A One, B Two");
        assert_eq!(row.company_affiliations, "One Pharma, Two Biotech");
    }
}
