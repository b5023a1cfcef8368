//! Search collector: one query in, a bounded list of hits out.

use std::time::Duration;

use crate::error::{CallOutcome, FailureKind};
use crate::pipeline::guard::guarded;
use crate::traits::searcher::Searcher;
use crate::types::{config::SearchOptions, page::SearchHit, query::Query};

/// Run one query against the search capability.
///
/// Returns `Ok(vec![])` when the provider finds nothing and `Err` when the
/// call failed or timed out. Either way the caller moves on to the next query.
pub async fn collect_hits<S: Searcher + ?Sized>(
    searcher: &S,
    query: &Query,
    options: &SearchOptions,
    timeout: Duration,
) -> CallOutcome<Vec<SearchHit>> {
    let mut hits = guarded(
        FailureKind::Search,
        timeout,
        searcher.search(query.as_str(), options),
    )
    .await?;

    hits.retain(|hit| !hit.url.trim().is_empty());
    hits.truncate(options.max_results);
    Ok(hits)
}
