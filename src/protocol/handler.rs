use std::panic::{self, AssertUnwindSafe};
use serde_json::Value;
use tracing::{debug, error, warn};
use crate::core::engine::SearchEngine;
use crate::core::error::{Error, Result};
use crate::query::types::{SearchQuery, SortKey, SortOrder};
use crate::protocol::messages::{Request, Response};

impl SearchEngine {
    /// Process one message to completion. Failures, including panics, come back
    /// as `success: false` responses; nothing escapes the call.
    pub fn handle(&mut self, request: Request) -> Response {
        let message_type = request.message_type().to_string();
        debug!(message_type = %message_type, "handling message");

        match panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(request))) {
            Ok(response) => {
                if let Some(reason) = response.error() {
                    warn!(message_type = %message_type, error = %reason, "message failed");
                }
                response
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!(message_type = %message_type, reason = %reason, "message handler panicked");
                let err = Error::internal(format!("message handling failed: {}", reason));
                Response::failure(err.to_string())
            }
        }
    }

    fn dispatch(&mut self, request: Request) -> Response {
        match request {
            Request::UpdatePapers { papers } => match self.update_papers(papers) {
                Ok(count) => Response::PapersUpdated { success: true, count: Some(count), error: None },
                Err(err) => Response::papers_failed(&err),
            },
            Request::Search { search_params, sort_by, sort_direction } => {
                let key = sort_by.as_deref().map(SortKey::parse).unwrap_or_default();
                let order = sort_direction.as_deref().map(SortOrder::parse).unwrap_or_default();
                self.search_message(search_params, key, order)
                    .unwrap_or_else(|err| Response::search_failed(&err))
            }
            Request::ClearCache => {
                self.clear_cache();
                Response::CacheCleared { success: true, error: None }
            }
            Request::GetStats => Response::StatsResult {
                success: true,
                engine: Some(self.engine_stats().clone()),
                cache: Some(self.cache_stats()),
                collection: self.collection_stats(),
                error: None,
            },
            Request::Unknown { message_type } => {
                Response::failure(format!("unknown message type: {}", message_type))
            }
        }
    }

    fn update_papers(&mut self, papers: Option<Value>) -> Result<usize> {
        let papers = papers.ok_or_else(|| Error::invalid_input("papers is required"))?;
        self.load_value(papers)
    }

    fn search_message(&mut self, params: Option<Value>, key: SortKey, order: SortOrder) -> Result<Response> {
        if !self.is_ready() {
            return Err(Error::not_ready("search index not initialized, load papers first"));
        }
        let params = params.ok_or_else(|| Error::invalid_input("searchParams is required"))?;
        let query: SearchQuery = serde_json::from_value(params.clone())?;

        let results = self.search(&query, key, order)?;
        Ok(Response::SearchResult {
            success: true,
            count: Some(results.total_hits),
            search_time: Some(results.took_ms),
            results: Some(results.records),
            search_params: Some(params),
            error: None,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
