//! Music sheet search: form fields in, `{retval, msg, data}` out.

pub mod client;
pub mod query;
pub mod response;

pub use client::{CannedSearchService, HttpSearchService, SearchService};
pub use query::{FormFields, SearchQuery};
pub use response::{ResultRecord, SearchResponse};
