//! Relevance filter for crawled URLs.
//!
//! The policy is data: a list of exclusion patterns (pagination, listings,
//! search pages) and a list of inclusion keywords. Both are matched as
//! case-insensitive substrings of the URL's path and query; the host never
//! counts, so `jobsforgood.com/about-us` carries no keyword. Classification
//! is a pure function of `(origin, url)`.

use std::collections::HashSet;

use crate::types::page::CrawlCandidate;

/// URL fragments that mark non-posting pages.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "/page/",
    "?page=",
    "&page=",
    "/category/",
    "/tag/",
    "/archive",
    "/author/",
    "/search",
    "?s=",
];

/// Tokens of which at least one must appear in a posting URL.
pub const DEFAULT_INCLUDE_KEYWORDS: &[&str] = &[
    "internship",
    "job",
    "career",
    "hiring",
    "recruit",
    "vacancy",
    "position",
    "opening",
];

/// Why a URL was kept or dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlVerdict {
    Accepted,
    /// Same page as the crawl origin
    SelfReference,
    /// Matched this exclusion pattern
    Excluded(String),
    /// No inclusion keyword present
    NoKeyword,
}

impl UrlVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Two-part relevance filter over candidate URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlFilter {
    exclude: Vec<String>,
    include: Vec<String>,
}

impl Default for UrlFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDE_PATTERNS.iter().copied(),
            DEFAULT_INCLUDE_KEYWORDS.iter().copied(),
        )
    }
}

impl UrlFilter {
    /// Build a filter from pattern lists. Patterns are lowercased; blanks dropped.
    pub fn new(
        exclude: impl IntoIterator<Item = impl AsRef<str>>,
        include: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            exclude: normalize_patterns(exclude),
            include: normalize_patterns(include),
        }
    }

    /// Add an exclusion pattern.
    pub fn exclude(mut self, pattern: impl AsRef<str>) -> Self {
        self.exclude.extend(normalize_patterns([pattern]));
        self
    }

    /// Add an inclusion keyword.
    pub fn include(mut self, keyword: impl AsRef<str>) -> Self {
        self.include.extend(normalize_patterns([keyword]));
        self
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    pub fn include_keywords(&self) -> &[String] {
        &self.include
    }

    /// Classify one URL discovered from `origin`.
    ///
    /// Exclusion wins over inclusion: a pagination URL containing "job" is
    /// still rejected.
    pub fn classify(&self, origin: &str, url: &str) -> UrlVerdict {
        if same_page(origin, url) {
            return UrlVerdict::SelfReference;
        }

        let lowered = match_target(url);
        if let Some(pattern) = self.exclude.iter().find(|p| lowered.contains(p.as_str())) {
            return UrlVerdict::Excluded(pattern.clone());
        }

        if self.include.iter().any(|k| lowered.contains(k.as_str())) {
            UrlVerdict::Accepted
        } else {
            UrlVerdict::NoKeyword
        }
    }

    /// Keep accepted candidates in crawl order, collapse repeats, cap at `max`.
    pub fn filter(
        &self,
        origin: &str,
        candidates: Vec<CrawlCandidate>,
        max: usize,
    ) -> Vec<CrawlCandidate> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut kept = Vec::new();

        for candidate in candidates {
            if kept.len() >= max {
                break;
            }
            match self.classify(origin, &candidate.url) {
                UrlVerdict::Accepted => {
                    if seen.insert(page_key(&candidate.url)) {
                        kept.push(candidate);
                    }
                }
                verdict => {
                    tracing::debug!(url = %candidate.url, ?verdict, "Dropping crawled URL");
                }
            }
        }

        kept
    }
}

fn normalize_patterns(patterns: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    patterns
        .into_iter()
        .map(|p| p.as_ref().trim().to_ascii_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Lowercased `path?query` of a URL. Unparseable input is matched whole.
fn match_target(url: &str) -> String {
    let Ok(parsed) = url::Url::parse(url.trim()) else {
        return url.to_ascii_lowercase();
    };
    let mut target = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        target.push('?');
        target.push_str(query);
    }
    target.to_ascii_lowercase()
}

/// Comparison key for "same page": trimmed, lowercased, no trailing slash.
fn page_key(url: &str) -> String {
    url.trim().trim_end_matches('/').to_ascii_lowercase()
}

fn same_page(a: &str, b: &str) -> bool {
    page_key(a) == page_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ORIGIN: &str = "https://lawctopus.com/internship/acme-law-2024";

    #[test]
    fn test_lawctopus_scenario() {
        let filter = UrlFilter::default();
        let candidates = vec![
            CrawlCandidate::new("https://lawctopus.com/internship/acme-law-2024/apply", ""),
            CrawlCandidate::new("https://lawctopus.com/internship/page/2", ""),
        ];

        let kept = filter.filter(ORIGIN, candidates, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(
            kept[0].url,
            "https://lawctopus.com/internship/acme-law-2024/apply"
        );
        assert_eq!(
            filter.classify(ORIGIN, "https://lawctopus.com/internship/page/2"),
            UrlVerdict::Excluded("/page/".to_string())
        );
    }

    #[test]
    fn test_origin_is_dropped_even_with_trailing_slash() {
        let filter = UrlFilter::default();
        assert_eq!(filter.classify(ORIGIN, ORIGIN), UrlVerdict::SelfReference);
        assert_eq!(
            filter.classify(ORIGIN, &format!("{}/", ORIGIN)),
            UrlVerdict::SelfReference
        );
    }

    #[test]
    fn test_keyword_required() {
        let filter = UrlFilter::default();
        assert_eq!(
            filter.classify(ORIGIN, "https://lawctopus.com/about-us"),
            UrlVerdict::NoKeyword
        );
        assert!(filter
            .classify(ORIGIN, "https://lawfer.in/CAREERS/associate")
            .is_accepted());
    }

    #[test]
    fn test_host_does_not_count_as_keyword() {
        let filter = UrlFilter::default();
        assert_eq!(
            filter.classify(ORIGIN, "https://jobsforgood.com/about-us"),
            UrlVerdict::NoKeyword
        );
        assert_eq!(
            filter.classify(ORIGIN, "https://careers.example.com/contact"),
            UrlVerdict::NoKeyword
        );
        assert!(filter
            .classify(ORIGIN, "https://jobsforgood.com/openings/legal-fellow")
            .is_accepted());
        assert!(filter
            .classify(ORIGIN, "https://example.com/listing?role=internship")
            .is_accepted());
    }

    #[test]
    fn test_query_string_pagination_excluded() {
        let filter = UrlFilter::default();
        assert!(!filter
            .classify(ORIGIN, "https://indeed.com/jobs?q=legal&page=3")
            .is_accepted());
        assert!(!filter
            .classify(ORIGIN, "https://lawbhoomi.com/category/internships")
            .is_accepted());
        assert!(!filter
            .classify(ORIGIN, "https://lawbhoomi.com/search?q=job")
            .is_accepted());
    }

    #[test]
    fn test_cap_and_duplicates() {
        let filter = UrlFilter::default();
        let candidates = vec![
            CrawlCandidate::new("https://a.test/job/1", ""),
            CrawlCandidate::new("https://a.test/job/1/", ""),
            CrawlCandidate::new("https://a.test/job/2", ""),
            CrawlCandidate::new("https://a.test/job/3", ""),
        ];
        let kept = filter.filter(ORIGIN, candidates, 2);
        let urls: Vec<_> = kept.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.test/job/1", "https://a.test/job/2"]);
    }

    #[test]
    fn test_custom_lists() {
        let filter = UrlFilter::new(["/draft/"], ["stage"]).include("Praktikum");
        assert!(filter.classify(ORIGIN, "https://x.test/praktikum/1").is_accepted());
        assert!(!filter.classify(ORIGIN, "https://x.test/draft/stage").is_accepted());
        assert!(!filter.classify(ORIGIN, "https://x.test/job/1").is_accepted());
    }

    fn url_strategy() -> impl Strategy<Value = String> {
        let segment = prop_oneof![
            Just("job".to_string()),
            Just("internship".to_string()),
            Just("page".to_string()),
            Just("category".to_string()),
            Just("about".to_string()),
            Just("search".to_string()),
            "[a-z0-9-]{1,12}",
        ];
        (
            prop_oneof![Just("lawctopus.com"), Just("lawfer.in"), Just("indeed.com")],
            proptest::collection::vec(segment, 0..5),
            prop_oneof![Just(""), Just("/"), Just("?page=2"), Just("?q=intern")],
        )
            .prop_map(|(host, segments, tail)| {
                format!("https://{}/{}{}", host, segments.join("/"), tail)
            })
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(url in url_strategy()) {
            let filter = UrlFilter::default();
            prop_assert_eq!(filter.classify(ORIGIN, &url), filter.classify(ORIGIN, &url));
        }

        #[test]
        fn filter_never_returns_origin_or_excluded(
            urls in proptest::collection::vec(url_strategy(), 0..20)
        ) {
            let filter = UrlFilter::default();
            let mut candidates: Vec<_> = urls
                .iter()
                .map(|u| CrawlCandidate::new(u.clone(), ""))
                .collect();
            candidates.push(CrawlCandidate::new(ORIGIN, ""));

            let kept = filter.filter(ORIGIN, candidates, 5);
            prop_assert!(kept.len() <= 5);
            for candidate in &kept {
                let lowered = candidate.url.to_ascii_lowercase();
                prop_assert!(!same_page(&candidate.url, ORIGIN));
                prop_assert!(filter
                    .exclude_patterns()
                    .iter()
                    .all(|p| !lowered.contains(p.as_str())));
            }
        }
    }
}
