// Search flow: keyword in, results out, selection saved
use searchdeck_api::{ApiError, SaveResponse, SearchResponse, SearchResultItem};
use tracing::debug;

use crate::messages;
use crate::status::StatusMessage;

/// One rendered search result. Rows carry a stable id assigned when the
/// result set is ingested, so selection survives any reordering or filtering
/// without index drift.
#[derive(Debug, Clone)]
pub struct ResultRow {
    pub id: u64,
    pub item: SearchResultItem,
    pub selected: bool,
}

/// State for the search-and-save workflow.
///
/// All handlers are pure state transitions: `submit` and `begin_save` hand
/// back what the caller should send over the wire, and the `apply_*` methods
/// fold the outcome back in. Nothing here touches the network or a rendering
/// surface, which keeps the whole flow unit-testable.
#[derive(Debug, Default)]
pub struct SearchFlow {
    /// Keyword edit buffer, owned here so the flow can validate it.
    pub input: String,
    /// Keyword of the most recent dispatched search; save requests are
    /// tagged with this, not with whatever is in the edit buffer now.
    current_keyword: String,
    rows: Vec<ResultRow>,
    next_row_id: u64,
    pub loading: bool,
    pub status: Option<StatusMessage>,
    has_searched: bool,
}

impl SearchFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn keyword(&self) -> &str {
        &self.current_keyword
    }

    /// True once at least one search response (of any outcome) arrived.
    /// Distinguishes the pristine screen from an empty result set.
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Validate the keyword buffer and move into Loading.
    ///
    /// Returns the trimmed keyword to dispatch, or `None` when validation
    /// failed and no request must be made.
    pub fn submit(&mut self) -> Option<String> {
        let keyword = self.input.trim();
        if keyword.is_empty() {
            self.status = Some(StatusMessage::error(messages::EMPTY_KEYWORD));
            return None;
        }

        let keyword = keyword.to_string();
        self.loading = true;
        self.status = None;
        self.rows.clear();
        self.current_keyword = keyword.clone();
        Some(keyword)
    }

    /// Fold a finished search request back into the flow.
    pub fn apply_search(&mut self, result: Result<SearchResponse, ApiError>) {
        self.loading = false;
        self.has_searched = true;

        match result {
            Ok(response) if response.is_success() => {
                debug!("Search returned {} results", response.data.len());
                self.set_rows(response.data);
            }
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::SEARCH_FAILED.to_string());
                self.rows.clear();
                self.status = Some(StatusMessage::error(text));
            }
            Err(err) => {
                self.rows.clear();
                self.status = Some(StatusMessage::error(transport_message(&err)));
            }
        }
    }

    /// Replace the result sequence wholesale; fresh ids, selection reset.
    fn set_rows(&mut self, items: Vec<SearchResultItem>) {
        self.rows = items
            .into_iter()
            .map(|item| {
                let id = self.next_row_id;
                self.next_row_id += 1;
                ResultRow {
                    id,
                    item,
                    selected: false,
                }
            })
            .collect();
        self.status = None;
    }

    /// Flip one row's selection. Unknown ids are ignored.
    pub fn toggle(&mut self, id: u64) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.selected = !row.selected;
        }
    }

    /// Flip the row at a display position (TUI cursor convenience).
    pub fn toggle_at(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.selected = !row.selected;
        }
    }

    /// Save is available iff the selection is non-empty.
    pub fn save_enabled(&self) -> bool {
        self.rows.iter().any(|row| row.selected)
    }

    /// Currently selected items, in display order. Only rows that are both
    /// live and selected can ever end up in a save payload.
    pub fn selected_items(&self) -> Vec<SearchResultItem> {
        self.rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.item.clone())
            .collect()
    }

    /// Validate the selection and move into Loading for a save.
    ///
    /// Returns the payload (items plus the keyword that produced them), or
    /// `None` when the selection is empty.
    pub fn begin_save(&mut self) -> Option<(Vec<SearchResultItem>, String)> {
        let items = self.selected_items();
        if items.is_empty() {
            self.status = Some(StatusMessage::error(messages::EMPTY_SELECTION));
            return None;
        }

        self.loading = true;
        self.status = None;
        Some((items, self.current_keyword.clone()))
    }

    /// Fold a finished save request back into the flow.
    pub fn apply_save(&mut self, result: Result<SaveResponse, ApiError>) {
        self.loading = false;

        match result {
            Ok(response) if response.is_success() => {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::SAVE_SUCCESS.to_string());
                self.status = Some(StatusMessage::success(text));
                for row in &mut self.rows {
                    row.selected = false;
                }
            }
            Ok(response) => {
                let text = response
                    .message
                    .unwrap_or_else(|| messages::SAVE_FAILED.to_string());
                self.status = Some(StatusMessage::error(text));
            }
            Err(err) => {
                self.status = Some(StatusMessage::error(transport_message(&err)));
            }
        }
    }
}

/// Generic connectivity message, with the timeout-flavored variant when the
/// failure was the attempt timeout firing.
pub(crate) fn transport_message(err: &ApiError) -> &'static str {
    if err.is_timeout() {
        messages::TIMEOUT_ERROR
    } else {
        messages::NETWORK_ERROR
    }
}
