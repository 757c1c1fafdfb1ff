//! # hnfeed
//!
//! A read-only reader for the Hacker News "top stories" ranking.
//!
//! ## Architecture
//!
//! ```text
//! HttpFetcher → CachedFetcher → PageAssembler → FeedSession → CLI
//! ```
//!
//! - [`fetcher`]: upstream access, memoized per key with a validity window
//! - [`feed`]: cursor pagination, concurrent item resolution and filtering
//! - [`cli`]: terminal output
//!
//! ## Quick Start
//!
//! ```bash
//! # First page of top stories
//! hnfeed top
//!
//! # Three pages of ten, starting at position 30
//! hnfeed top --limit 10 --cursor 30 --pages 3
//!
//! # One item
//! hnfeed item 8863
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the HTTP
/// fetcher, the caching gateway and the page assembler.
pub mod app;

/// Time-bounded memoization used by the gateway.
pub mod cache;

/// Command-line interface using clap.
///
/// - `top` - Show ranked top stories
/// - `item <id>` - Show a single item
pub mod cli;

/// Configuration loaded from `~/.config/hnfeed/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Item`](domain::Item): one upstream record
/// - [`Page`](domain::Page): stories plus the cursor of the next page
/// - [`PageRequest`](domain::PageRequest): page size and cursor
pub mod domain;

/// Page assembly and infinite loading.
///
/// - [`PageAssembler`](feed::PageAssembler): `(limit, cursor)` to [`Page`](domain::Page)
/// - [`FeedSession`](feed::FeedSession): follows cursors page by page
pub mod feed;

/// Upstream access.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for the two read operations
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`CachedFetcher`](fetcher::CachedFetcher): memoizing gateway
/// - [`ParallelFetcher`](fetcher::ParallelFetcher): order-preserving fan-out
pub mod fetcher;
