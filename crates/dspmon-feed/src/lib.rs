//! Feed loading for the DSP store-status dashboard.
//!
//! Fetches the remote CSV feed, parses it into a [`FeedTable`], resolves
//! which columns carry store identity/name/company/inactive-platform data,
//! and caches the result for a bounded time window.

mod cache;
mod client;
mod error;
mod resolve;
mod table;

pub use cache::{FeedCache, FeedSnapshot};
pub use client::FeedClient;
pub use error::FeedError;
pub use resolve::{resolve_columns, ColumnMapping, ColumnRole, ResolutionAdvisory};
pub use table::FeedTable;
