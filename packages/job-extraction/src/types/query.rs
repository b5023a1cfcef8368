//! Search queries and the fixed query set a run iterates over.

use std::fmt;

/// A single search query expressing keyword/boolean intent.
///
/// Queries are trimmed on construction and are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Create a query, returning `None` for blank input.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Junior legal roles and internships around Hyderabad, Telangana.
const LEGAL_HYDERABAD_QUERIES: &[&str] = &[
    // Legal internship boards
    r#"site:lawctopus.com ("legal internship" OR "law intern") AND ("Hyderabad" OR "Telangana") -scholarship -course -competition"#,
    r#"site:lawfer.in ("legal internship" OR "law intern") AND ("Hyderabad" OR "Telangana") -competition -webinar -event"#,
    // General job boards
    r#"site:linkedin.com/jobs ("junior lawyer" OR "legal associate" OR "law graduate") AND "Hyderabad" AND ("we are hiring" OR "apply now")"#,
    r#"site:indeed.com ("legal internship" OR "junior advocate" OR "law graduate fresher") AND "Hyderabad""#,
    r#"site:glassdoor.co.in ("legal assistant" OR "junior lawyer" OR "LLB fresher") AND "Hyderabad""#,
    // Specialised practice areas
    r#"("IP law" OR "contract drafting" OR "corporate law intern") AND "Hyderabad" AND ("law firm" OR "legal department") -training -course"#,
    // Legal publications
    r#"site:barandbench.com ("junior lawyer" OR "legal recruitment") AND "Hyderabad""#,
    r#"site:lawbhoomi.com ("internship" OR "associate") AND "Hyderabad" AND "apply" -workshop -fellowship -course"#,
    // Government and NGO openings
    r#"site:nalsa.gov.in internship OR volunteer OR lok adalat "Hyderabad""#,
    r#"site:jobsforgood.com ("legal associate" OR "lawyer") AND "Hyderabad" AND "apply" -fellowship"#,
    // Open fallback
    r#"("law firm hiring" OR "legal opening") AND "Hyderabad" AND ("fresher" OR "intern" OR "junior associate")"#,
];

/// An ordered, read-only collection of queries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySet {
    queries: Vec<Query>,
}

impl QuerySet {
    /// Build a set from raw strings, dropping blanks.
    pub fn new(queries: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let queries = queries.into_iter().filter_map(Query::new).collect();
        Self { queries }
    }

    /// The default legal-jobs query set.
    pub fn legal_hyderabad() -> Self {
        Self::new(LEGAL_HYDERABAD_QUERIES.iter().copied())
    }

    /// Parse a queries file: one query per line, `#` starts a comment line.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }
}

impl<'a> IntoIterator for &'a QuerySet {
    type Item = &'a Query;
    type IntoIter = std::slice::Iter<'a, Query>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}
