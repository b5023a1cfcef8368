//! Integration tests for the full extraction run.
//!
//! These tests drive `Pipeline::run` end to end with mock collaborators:
//! 1. Search each query
//! 2. Crawl allow-listed hits and filter the candidates
//! 3. Extract each candidate (or the hit itself)
//! 4. Finalize and write the report

use std::time::Duration;

use chrono::{Local, TimeZone};
use serde_json::{json, Value};

use job_extraction::{
    testing::{MockCrawler, MockGenerator, MockSearcher},
    CrawlCandidate, JsonReportSink, Pipeline, PipelineConfig, QuerySet, ReportSink, RunStamp,
    SearchHit, Timeouts,
};

const ORIGIN: &str = "https://lawctopus.com/internship/acme-law-2024";
const APPLY: &str = "https://lawctopus.com/internship/acme-law-2024/apply";
const DETAILS: &str = "https://lawctopus.com/internship/acme-law-2024/details";

/// Helper to render a model reply.
fn job_json(company: &str, title: &str) -> String {
    json!({
        "company_name": company,
        "job_title": title,
        "recruiter": "",
        "email": "careers@acme.test",
        "phone": "",
        "location": "Hyderabad",
        "summary": "Litigation internship",
        "application_link": "",
        "posted_date": "2024-05-01",
        "still_available": "yes",
        "job_department": "Litigation"
    })
    .to_string()
}

fn fixed_stamp() -> RunStamp {
    RunStamp::at(Local.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap())
}

/// Helper to wire a pipeline and keep handles on the mocks.
fn pipeline(
    searcher: MockSearcher,
    crawler: MockCrawler,
    generator: MockGenerator,
    config: PipelineConfig,
) -> Pipeline<MockSearcher, MockCrawler, MockGenerator> {
    Pipeline::new(searcher, crawler, generator, config)
}

#[tokio::test]
async fn test_lawctopus_hit_yields_one_record_from_apply_page() {
    let searcher = MockSearcher::new().with_hits(
        "legal internship Hyderabad",
        vec![SearchHit::new(ORIGIN).with_title("Acme Law internship")],
    );
    let crawler = MockCrawler::new().with_crawl(
        ORIGIN,
        vec![
            CrawlCandidate::new(ORIGIN, "origin page"),
            CrawlCandidate::new(APPLY, "Apply to Acme Law"),
            CrawlCandidate::new("https://lawctopus.com/internship/page/2", "listing"),
        ],
    );
    let generator = MockGenerator::new().with_default_response(job_json("Acme Law", "Intern"));
    let crawler_handle = crawler.clone();

    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["legal internship Hyderabad"]), fixed_stamp())
        .await;

    assert_eq!(results.len(), 1);
    let record = &results.records()[0];
    assert_eq!(record.source_url, APPLY);
    assert_eq!(record.application_link, APPLY);
    assert_eq!(record.company_name, "Acme Law");
    assert_eq!(record.scraped_on, "2024-06-01 09:30");

    let requests = crawler_handle.crawl_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].max_depth, 2);
    assert_eq!(requests[0].max_breadth, 3);
    assert_eq!(requests[0].limit, 10);
}

#[tokio::test]
async fn test_report_has_all_thirteen_string_fields() {
    let searcher = MockSearcher::new().with_urls("q", &["https://example.org/jobs/legal-associate"]);
    let crawler = MockCrawler::new()
        .with_content("https://example.org/jobs/legal-associate", "Associate role");
    // Numbers and nulls from the model still land as strings.
    let generator = MockGenerator::new().with_default_response(
        r#"{"company_name":"Acme","job_title":"Associate","phone":9876543210,"email":null}"#,
    );

    let stamp = fixed_stamp();
    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["q"]), stamp)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let path = JsonReportSink::new(dir.path())
        .write(&results, &stamp.file_safe())
        .unwrap();
    assert!(path.ends_with("legal_jobs_2024-06-01_09-30.json"));

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let record = written["records"][0].as_object().unwrap();
    assert_eq!(record.len(), 13);
    assert!(record.values().all(Value::is_string));
    assert_eq!(record["phone"], "9876543210");
    assert_eq!(record["email"], "");
    assert_eq!(record["scraped_on"], "2024-06-01 09:30");
}

#[tokio::test]
async fn test_search_failure_skips_query_only() {
    let searcher = MockSearcher::new()
        .failing_on("broken")
        .with_urls("working", &["https://example.org/jobs/paralegal"]);
    let crawler = MockCrawler::new();
    let generator = MockGenerator::new().with_default_response(job_json("Acme", "Paralegal"));
    let searcher_handle = searcher.clone();

    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["broken", "working"]), fixed_stamp())
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.metadata().queries, 2);
    assert_eq!(results.metadata().failures, 1);
    assert_eq!(searcher_handle.calls().len(), 2);
}

#[tokio::test]
async fn test_crawl_failure_skips_origin_only() {
    let other = "https://lawctopus.com/internship/beta-chambers";
    let searcher = MockSearcher::new().with_urls("q", &[ORIGIN, other]);
    let crawler = MockCrawler::new().failing_on(ORIGIN).with_crawl(
        other,
        vec![CrawlCandidate::new(
            "https://lawctopus.com/internship/beta-chambers/apply",
            "Beta Chambers",
        )],
    );
    let generator = MockGenerator::new().with_default_response(job_json("Beta", "Intern"));
    let crawler_handle = crawler.clone();
    let generator_handle = generator.clone();

    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["q"]), fixed_stamp())
        .await;

    let urls: Vec<_> = results.records().iter().map(|r| r.source_url.as_str()).collect();
    assert_eq!(urls, vec!["https://lawctopus.com/internship/beta-chambers/apply"]);
    assert_eq!(results.metadata().failures, 1);

    // The failed origin is neither fetched nor sent to the model.
    assert!(crawler_handle.fetched_urls().is_empty());
    let prompts = generator_handle.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(!prompts[0].contains(&format!("URL: {}", ORIGIN)));
}

#[tokio::test]
async fn test_generator_failure_on_one_candidate_continues() {
    let searcher = MockSearcher::new().with_urls("q", &[ORIGIN]);
    let crawler = MockCrawler::new().with_crawl(
        ORIGIN,
        vec![
            CrawlCandidate::new(APPLY, "apply body"),
            CrawlCandidate::new(DETAILS, "details body"),
        ],
    );
    let generator = MockGenerator::new()
        .failing_for("apply body")
        .with_default_response(job_json("Acme", "Intern"));

    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["q"]), fixed_stamp())
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.records()[0].source_url, DETAILS);
    assert_eq!(results.metadata().failures, 1);
    assert_eq!(results.metadata().extraction_attempts, 2);
}

#[tokio::test(start_paused = true)]
async fn test_generator_timeout_is_a_soft_failure() {
    let searcher = MockSearcher::new().with_urls("q", &[ORIGIN]);
    let crawler = MockCrawler::new().with_crawl(
        ORIGIN,
        vec![
            CrawlCandidate::new(APPLY, "apply body"),
            CrawlCandidate::new(DETAILS, "details body"),
        ],
    );
    let generator = MockGenerator::new()
        .with_default_response(job_json("Acme", "Intern"))
        .with_delay(Duration::from_secs(30));
    let generator_handle = generator.clone();
    let config = PipelineConfig::default().with_timeouts(Timeouts {
        generate: Duration::from_secs(5),
        ..Timeouts::default()
    });

    let results = pipeline(searcher, crawler, generator, config)
        .run(&QuerySet::new(["q"]), fixed_stamp())
        .await;

    assert!(results.is_empty());
    assert_eq!(results.metadata().failures, 2);
    // Both candidates were attempted despite the first timing out.
    assert_eq!(generator_handle.prompts().len(), 2);
}

#[tokio::test]
async fn test_malformed_output_is_recovered() {
    let searcher = MockSearcher::new().with_urls("q", &["https://example.org/jobs/clerk"]);
    let crawler = MockCrawler::new();
    let generator =
        MockGenerator::new().with_default_response("Sorry, I cannot find a job posting here.");

    let results = pipeline(searcher, crawler, generator, PipelineConfig::default())
        .run(&QuerySet::new(["q"]), fixed_stamp())
        .await;

    assert_eq!(results.len(), 1);
    let record = &results.records()[0];
    assert_eq!(record.summary, "Sorry, I cannot find a job posting here.");
    assert_eq!(record.source_url, "https://example.org/jobs/clerk");
    assert!(record.company_name.is_empty());
    assert_eq!(results.metadata().recovered, 1);
}

#[tokio::test]
async fn test_url_dedup_is_opt_in() {
    let url = "https://example.org/jobs/legal-analyst";
    let make = || {
        (
            MockSearcher::new()
                .with_urls("first", &[url])
                .with_urls("second", &[url]),
            MockCrawler::new(),
            MockGenerator::new().with_default_response(job_json("Acme", "Analyst")),
        )
    };
    let queries = QuerySet::new(["first", "second"]);

    let (s, c, g) = make();
    let plain = pipeline(s, c, g, PipelineConfig::default())
        .run(&queries, fixed_stamp())
        .await;
    assert_eq!(plain.len(), 2);

    let (s, c, g) = make();
    let deduped = pipeline(s, c, g, PipelineConfig::default().with_url_dedup(true))
        .run(&queries, fixed_stamp())
        .await;
    assert_eq!(deduped.len(), 1);
    assert_eq!(deduped.metadata().duplicates, 1);
}

#[tokio::test]
async fn test_empty_query_set_yields_empty_report() {
    let results = pipeline(
        MockSearcher::new(),
        MockCrawler::new(),
        MockGenerator::new(),
        PipelineConfig::default(),
    )
    .run(&QuerySet::new(Vec::<String>::new()), fixed_stamp())
    .await;

    assert!(results.is_empty());
    assert_eq!(results.metadata().queries, 0);
    assert_eq!(results.metadata().scraped_on, "2024-06-01 09:30");
}
