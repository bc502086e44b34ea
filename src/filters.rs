//! Author classification by affiliation text.
//!
//! Identifies authors affiliated with pharmaceutical/biotech companies and
//! captures the corresponding author's email. Matching is case-insensitive;
//! displayed affiliation strings keep their original case.

/// Default commercial-entity keywords matched against affiliation text
const DEFAULT_KEYWORDS: &[&str] = &["pharma", "biotech", "inc.", "ltd", "gmbh"];

/// Substring marking a corresponding author in affiliation or role text
const CORRESPONDING_MARKER: &str = "corresponding";

/// Sentinel name for authors missing forename or lastname
pub const UNKNOWN_NAME: &str = "Unknown";

/// One author as listed on a paper.
///
/// Author records arrive from the wire as loosely shaped nodes with optional
/// fields; absent fields default to the sentinels below instead of being
/// re-checked for presence at every use site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorInfo {
    /// Full display name, `"Unknown"` when name components are missing
    pub name: String,
    /// Affiliation text, empty when absent
    pub affiliation: String,
    /// Contact email, if listed
    pub email: Option<String>,
    /// Role marker (e.g. "corresponding author"), if listed
    pub role: Option<String>,
}

/// Configurable keyword set for the non-academic affiliation test.
///
/// Modeled as a value rather than a hard-coded literal so the set can be
/// extended without touching the classification algorithm.
#[derive(Debug, Clone)]
pub struct CompanyKeywords {
    keywords: Vec<String>,
}

impl CompanyKeywords {
    /// Create a keyword set from caller-supplied keywords.
    ///
    /// Keywords are lowered once here; matching is a plain substring test
    /// against the lowered affiliation text.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    /// Whether the affiliation text matches any configured keyword (case-insensitive).
    ///
    /// An empty affiliation never matches.
    pub fn matches(&self, affiliation: &str) -> bool {
        if affiliation.is_empty() {
            return false;
        }
        let lowered = affiliation.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for CompanyKeywords {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

/// Classify authors and capture the corresponding author's email.
///
/// Returns `(non_academic_authors, company_affiliations, corresponding_email)`.
/// The two lists are built in lockstep: index i in one refers to the same
/// author as index i in the other. Affiliation strings keep their original
/// case; lowering happens only for matching.
///
/// Corresponding-email policy is last-write-wins: every author flagged by the
/// "corresponding" marker (in role or affiliation text) overwrites the captured
/// email, absent email included as an empty string. Unflagged authors never
/// touch it.
pub fn extract_non_academic_authors(
    authors: &[AuthorInfo],
    keywords: &CompanyKeywords,
) -> (Vec<String>, Vec<String>, String) {
    let mut non_academic = Vec::new();
    let mut companies = Vec::new();
    let mut corresponding_email = String::new();

    for author in authors {
        if keywords.matches(&author.affiliation) {
            let name = if author.name.is_empty() {
                UNKNOWN_NAME.to_string()
            } else {
                author.name.clone()
            };
            non_academic.push(name);
            companies.push(author.affiliation.clone());
        }

        if is_corresponding(author) {
            corresponding_email = author.email.clone().unwrap_or_default();
        }
    }

    (non_academic, companies, corresponding_email)
}

/// Corresponding-author heuristic: the marker substring in either the role
/// field or the affiliation text, case-insensitively.
fn is_corresponding(author: &AuthorInfo) -> bool {
    let in_role = author
        .role
        .as_deref()
        .is_some_and(|r| r.to_lowercase().contains(CORRESPONDING_MARKER));
    in_role || author.affiliation.to_lowercase().contains(CORRESPONDING_MARKER)
}
