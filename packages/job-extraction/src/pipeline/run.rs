//! The sequential run loop: queries → hits → candidates → records.
//!
//! Every external call is awaited before the next item starts, and every
//! per-item failure is absorbed where it happens.

use crate::error::{CallOutcome, FailureKind};
use crate::pipeline::{
    aggregate::Aggregator,
    collect::collect_hits,
    extract::Extractor,
    filter::UrlFilter,
    guard::guarded,
};
use crate::traits::{
    crawler::{CrawlRequest, Crawler},
    generator::TextGenerator,
    searcher::Searcher,
};
use crate::types::{
    config::PipelineConfig,
    page::{CrawlCandidate, ExtractionSource, SearchHit},
    query::QuerySet,
    run::{ResultSet, RunStamp},
};

/// Structured extraction pipeline with injected collaborators.
pub struct Pipeline<S, C, G>
where
    S: Searcher,
    C: Crawler,
    G: TextGenerator,
{
    searcher: S,
    crawler: C,
    extractor: Extractor<G>,
    filter: UrlFilter,
    config: PipelineConfig,
}

impl<S, C, G> Pipeline<S, C, G>
where
    S: Searcher,
    C: Crawler,
    G: TextGenerator,
{
    /// Wire a pipeline from its three capabilities.
    pub fn new(searcher: S, crawler: C, generator: G, config: PipelineConfig) -> Self {
        let extractor = Extractor::new(generator)
            .with_config(config.extractor.clone())
            .with_timeout(config.timeouts.generate);
        Self {
            searcher,
            crawler,
            extractor,
            filter: UrlFilter::default(),
            config,
        }
    }

    /// Replace the URL relevance filter.
    pub fn with_filter(mut self, filter: UrlFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn extractor(&self) -> &Extractor<G> {
        &self.extractor
    }

    /// Run every query once and return the finalized result set.
    pub async fn run(&self, queries: &QuerySet, stamp: RunStamp) -> ResultSet {
        let mut aggregator = if self.config.dedup_urls {
            Aggregator::new().with_url_dedup()
        } else {
            Aggregator::new()
        };

        tracing::info!("Starting search for {} queries", queries.len());

        for query in queries {
            aggregator.record_query();
            tracing::info!(query = %query, "Querying");

            let hits = match collect_hits(
                &self.searcher,
                query,
                &self.config.search,
                self.config.timeouts.search,
            )
            .await
            {
                Ok(hits) => hits,
                Err(failure) => {
                    tracing::warn!(query = %query, "Search failed, skipping query: {}", failure);
                    aggregator.record_failure(&failure);
                    continue;
                }
            };

            if hits.is_empty() {
                tracing::info!(query = %query, "No results");
                continue;
            }
            aggregator.record_hits(hits.len());

            for hit in &hits {
                self.process_hit(hit, &mut aggregator).await;
            }
        }

        let results = aggregator.finalize(&stamp);
        tracing::info!(
            records = results.len(),
            failures = results.metadata().failures,
            "Run complete"
        );
        results
    }

    /// Crawl one hit and extract each surviving candidate, or the hit itself.
    ///
    /// A failed crawl skips the hit entirely.
    async fn process_hit(&self, hit: &SearchHit, aggregator: &mut Aggregator) {
        tracing::info!(url = %hit.url, "Processing result: {}", hit.title);

        let candidates = match self.crawl_candidates(hit).await {
            Ok(candidates) => candidates,
            Err(failure) => {
                tracing::warn!(url = %hit.url, "Crawl failed, skipping origin: {}", failure);
                aggregator.record_failure(&failure);
                return;
            }
        };
        aggregator.record_candidates(candidates.len());

        if candidates.is_empty() {
            let content = self.fetch_hit_content(hit, aggregator).await;
            let outcome = self
                .extractor
                .extract(&ExtractionSource::from_hit(hit, content))
                .await;
            aggregator.absorb(outcome);
            return;
        }

        for candidate in &candidates {
            let outcome = self
                .extractor
                .extract(&ExtractionSource::from_candidate(hit, candidate))
                .await;
            aggregator.absorb(outcome);
        }
    }

    /// Expand a hit into filtered candidates.
    ///
    /// `Ok(vec![])` when crawling is off, the origin is outside the allow-list
    /// or nothing survived the filter; `Err` only when the crawl call failed.
    async fn crawl_candidates(&self, hit: &SearchHit) -> CallOutcome<Vec<CrawlCandidate>> {
        let options = &self.config.crawl;
        if !options.enabled {
            return Ok(Vec::new());
        }

        let allowed = hit.host().map(|h| options.allows_host(&h)).unwrap_or(false);
        if !allowed {
            tracing::debug!(url = %hit.url, "Origin outside crawl allow-list, not crawling");
            return Ok(Vec::new());
        }

        let request = CrawlRequest::new(hit.url.clone(), options);
        let pages = guarded(
            FailureKind::Crawl,
            self.config.timeouts.crawl,
            self.crawler.crawl(&request),
        )
        .await?;

        let discovered = pages.len();
        let kept = self.filter.filter(&hit.url, pages, options.max_candidates);
        tracing::info!(
            url = %hit.url,
            discovered,
            kept = kept.len(),
            "Crawl filtered"
        );
        Ok(kept)
    }

    /// Raw content for a hit extracted without candidates. Empty on failure.
    async fn fetch_hit_content(&self, hit: &SearchHit, aggregator: &mut Aggregator) -> String {
        match guarded(
            FailureKind::Fetch,
            self.config.timeouts.fetch,
            self.crawler.fetch_content(&hit.url),
        )
        .await
        {
            Ok(content) => {
                tracing::info!(url = %hit.url, chars = content.len(), "Extracted page content");
                content
            }
            Err(failure) => {
                tracing::error!(url = %hit.url, "Failed to extract content: {}", failure);
                aggregator.record_failure(&failure);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCrawler, MockGenerator, MockSearcher};
    use crate::types::config::CrawlOptions;

    const ORIGIN: &str = "https://lawctopus.com/internship/acme-law-2024";
    const APPLY: &str = "https://lawctopus.com/internship/acme-law-2024/apply";

    fn job_json(company: &str, title: &str) -> String {
        serde_json::json!({
            "company_name": company,
            "job_title": title,
            "recruiter": "",
            "email": "",
            "phone": "",
            "location": "Hyderabad",
            "summary": "",
            "application_link": "",
            "posted_date": "",
            "still_available": "",
            "job_department": ""
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_hit_without_candidates_is_extracted_directly() {
        let searcher = MockSearcher::new().with_hits(
            "q",
            vec![SearchHit::new("https://example.org/careers/legal-intern").with_title("Intern")],
        );
        let crawler = MockCrawler::new()
            .with_content("https://example.org/careers/legal-intern", "Acme hiring");
        let generator = MockGenerator::new().with_default_response(job_json("Acme", "Intern"));

        let pipeline = Pipeline::new(searcher, crawler, generator, PipelineConfig::default());
        let results = pipeline.run(&QuerySet::new(["q"]), RunStamp::now()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(
            results.records()[0].source_url,
            "https://example.org/careers/legal-intern"
        );
        // example.org is not on the allow-list
        assert!(pipeline.crawler.crawl_requests().is_empty());
        assert!(pipeline.extractor().generator().prompts()[0].contains("Acme hiring"));
    }

    #[tokio::test]
    async fn test_candidates_replace_hit_extraction() {
        let searcher = MockSearcher::new().with_hits("q", vec![SearchHit::new(ORIGIN)]);
        let crawler = MockCrawler::new().with_crawl(
            ORIGIN,
            vec![
                CrawlCandidate::new(ORIGIN, "origin"),
                CrawlCandidate::new(APPLY, "apply page"),
                CrawlCandidate::new("https://lawctopus.com/internship/page/2", "listing"),
            ],
        );
        let generator = MockGenerator::new().with_default_response(job_json("Acme", "Intern"));

        let pipeline = Pipeline::new(searcher, crawler, generator, PipelineConfig::default());
        let results = pipeline.run(&QuerySet::new(["q"]), RunStamp::now()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results.records()[0].source_url, APPLY);
        assert_eq!(results.metadata().candidates, 1);
        assert!(pipeline.crawler.fetched_urls().is_empty());
    }

    #[tokio::test]
    async fn test_crawl_disabled_skips_crawler() {
        let searcher = MockSearcher::new().with_hits("q", vec![SearchHit::new(ORIGIN)]);
        let crawler = MockCrawler::new();
        let generator = MockGenerator::new().with_default_response(job_json("Acme", "Intern"));
        let config = PipelineConfig::default().with_crawl(CrawlOptions::default().disabled());

        let pipeline = Pipeline::new(searcher, crawler, generator, config);
        let results = pipeline.run(&QuerySet::new(["q"]), RunStamp::now()).await;

        assert_eq!(results.len(), 1);
        assert!(pipeline.crawler.crawl_requests().is_empty());
        assert_eq!(pipeline.crawler.fetched_urls(), vec![ORIGIN.to_string()]);
    }

    #[tokio::test]
    async fn test_failed_crawl_skips_origin() {
        let searcher = MockSearcher::new().with_hits("q", vec![SearchHit::new(ORIGIN)]);
        let crawler = MockCrawler::new().failing_on(ORIGIN);
        let generator = MockGenerator::new().with_default_response(job_json("Acme", "Intern"));

        let pipeline = Pipeline::new(searcher, crawler, generator, PipelineConfig::default());
        let results = pipeline.run(&QuerySet::new(["q"]), RunStamp::now()).await;

        assert!(results.is_empty());
        assert_eq!(results.metadata().failures, 1);
        assert_eq!(results.metadata().extraction_attempts, 0);
        assert!(pipeline.crawler.fetched_urls().is_empty());
        assert!(pipeline.extractor().generator().prompts().is_empty());
    }
}
