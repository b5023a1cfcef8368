//! Search and crawl provider implementations.
//!
//! - `TavilyClient` - search, bounded crawl and single-page extract via Tavily

pub mod tavily;

pub use tavily::TavilyClient;
