//! The search page: form in, rendered list items or an alert out.

use crate::{
    render::Template,
    search::{FormFields, SearchQuery, SearchService},
    sink::{Notifier, ResultSink},
};
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Alert shown when the request itself fails. No detail is given.
pub const REQUEST_FAILED: &str = "Data request failed";

/// How one submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Records rendered and appended to the sink.
    Rendered(usize),
    /// The service answered `retval: false` with this message.
    Rejected(String),
    /// The request did not complete.
    Failed,
}

/// Binds the list-item template compiled at startup to the submit flow.
pub struct SearchPage<'a> {
    template: &'a Template,
}

impl<'a> SearchPage<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    /// Run one search and route the response.
    ///
    /// Failures are reported through `notifier` and leave `sink` untouched;
    /// only a sink write error is returned as `Err`.
    pub async fn submit<S, F, K, N>(
        &self,
        service: &S,
        form: &F,
        sink: &mut K,
        notifier: &mut N,
    ) -> Result<Outcome>
    where
        S: SearchService,
        F: FormFields + ?Sized,
        K: ResultSink + ?Sized,
        N: Notifier + ?Sized,
    {
        let query = SearchQuery::from_form(form);

        let resp = match service.search(&query).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, "Search request failed");
                notifier.alert(REQUEST_FAILED);
                return Ok(Outcome::Failed);
            }
        };

        if !resp.retval {
            debug!(msg = %resp.msg, "Search rejected by service");
            notifier.alert(&resp.msg);
            return Ok(Outcome::Rejected(resp.msg));
        }

        let items: Vec<String> = resp
            .data
            .iter()
            .map(|record| {
                let missing = self.template.missing(record);
                if !missing.is_empty() {
                    debug!(?missing, "Record lacks template fields");
                }
                self.template.render(record)
            })
            .collect();

        sink.extend_results(&items).context("append search results")?;
        debug!(count = items.len(), "Search results rendered");
        Ok(Outcome::Rendered(items.len()))
    }
}
