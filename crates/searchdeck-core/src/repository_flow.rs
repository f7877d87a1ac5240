// Repository query flow: filter form in, saved records out
use searchdeck_api::{ApiError, QueryResponse, RepositoryQuery, RepositoryRecord};
use tracing::debug;

use crate::messages;
use crate::search_flow::transport_message;
use crate::status::StatusMessage;

/// State for the saved-records query workflow. Independent of the search
/// flow; the two share nothing but the status message type.
#[derive(Debug, Default)]
pub struct RepositoryFlow {
    pub keyword_input: String,
    pub date_from_input: String,
    pub date_to_input: String,
    records: Vec<RepositoryRecord>,
    pub loading: bool,
    pub status: Option<StatusMessage>,
    has_queried: bool,
}

impl RepositoryFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    pub fn has_queried(&self) -> bool {
        self.has_queried
    }

    /// Build the request filter from whichever fields are non-empty.
    pub fn build_query(&self) -> RepositoryQuery {
        fn non_empty(value: &str) -> Option<String> {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        RepositoryQuery {
            keyword: non_empty(&self.keyword_input),
            date_from: non_empty(&self.date_from_input),
            date_to: non_empty(&self.date_to_input),
        }
    }

    /// Move into Loading and hand back the filter to dispatch. All fields
    /// are optional, so submission never fails validation.
    pub fn submit(&mut self) -> RepositoryQuery {
        self.loading = true;
        self.status = None;
        self.records.clear();
        self.build_query()
    }

    /// Fold a finished query back into the flow.
    pub fn apply_query(&mut self, result: Result<QueryResponse, ApiError>) {
        self.loading = false;
        self.has_queried = true;

        match result {
            Ok(response) if response.is_success() => {
                debug!("Repository query returned {} records", response.data.len());
                self.records = response.data;
                self.status = if self.records.is_empty() {
                    None
                } else {
                    Some(StatusMessage::info(messages::found_count(
                        self.records.len(),
                    )))
                };
            }
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::QUERY_FAILED.to_string());
                self.records.clear();
                self.status = Some(StatusMessage::error(text));
            }
            Err(err) => {
                self.records.clear();
                self.status = Some(StatusMessage::error(transport_message(&err)));
            }
        }
    }

    /// Clear the three filter fields and return the display to its initial
    /// empty state.
    pub fn reset(&mut self) {
        self.keyword_input.clear();
        self.date_from_input.clear();
        self.date_to_input.clear();
        self.records.clear();
        self.status = None;
        self.has_queried = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_record_response() -> QueryResponse {
        serde_json::from_str(
            r#"{
                "status": "success",
                "data": [
                    {"url": "http://a", "title": "A", "search_keyword": "rust",
                     "created_at": "2024-01-05 03:04:05"},
                    {"url": "http://b", "search_keyword": "rust",
                     "created_at": "2024-01-06 10:00:00"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_query_skips_empty_fields() {
        let mut flow = RepositoryFlow::new();
        flow.keyword_input = "  rust  ".into();
        flow.date_to_input = "2024-06-01".into();

        let query = flow.build_query();
        assert_eq!(query.keyword.as_deref(), Some("rust"));
        assert_eq!(query.date_from, None);
        assert_eq!(query.date_to.as_deref(), Some("2024-06-01"));

        flow.keyword_input = "   ".into();
        assert_eq!(flow.build_query().keyword, None);
    }

    #[test]
    fn test_two_records_yield_count_message() {
        let mut flow = RepositoryFlow::new();
        flow.submit();
        flow.apply_query(Ok(two_record_response()));

        assert_eq!(flow.records().len(), 2);
        assert_eq!(
            flow.status,
            Some(StatusMessage::info("共找到 2 条数据"))
        );
    }

    #[test]
    fn test_empty_result_set_shows_empty_state_not_table() {
        let mut flow = RepositoryFlow::new();
        flow.submit();
        let response: QueryResponse =
            serde_json::from_str(r#"{"status": "success", "data": []}"#).unwrap();
        flow.apply_query(Ok(response));

        assert!(flow.records().is_empty());
        assert!(flow.has_queried());
        assert!(flow.status.is_none());
    }

    #[test]
    fn test_failure_status_surfaces_message_and_clears_records() {
        let mut flow = RepositoryFlow::new();
        flow.submit();
        let response: QueryResponse =
            serde_json::from_str(r#"{"status": "error", "message": "查询失败: db"}"#).unwrap();
        flow.apply_query(Ok(response));

        assert_eq!(flow.status, Some(StatusMessage::error("查询失败: db")));
        assert!(flow.records().is_empty());
    }

    #[test]
    fn test_transport_error_is_generic_connectivity_message() {
        let mut flow = RepositoryFlow::new();
        flow.submit();
        flow.apply_query(Err(ApiError::RequestFailed("Status 502".into())));

        assert_eq!(
            flow.status,
            Some(StatusMessage::error(messages::NETWORK_ERROR))
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut flow = RepositoryFlow::new();
        flow.keyword_input = "rust".into();
        flow.date_from_input = "2024-01-01".into();
        flow.date_to_input = "2024-06-01".into();
        flow.submit();
        flow.apply_query(Ok(two_record_response()));

        flow.reset();

        assert!(flow.keyword_input.is_empty());
        assert!(flow.date_from_input.is_empty());
        assert!(flow.date_to_input.is_empty());
        assert!(flow.records().is_empty());
        assert!(flow.status.is_none());
        assert!(!flow.has_queried());
    }
}
