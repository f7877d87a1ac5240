// TUI application state and event handling
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use searchdeck_core::{RepositoryFlow, SearchFlow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Repository,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,         // Navigating results/records
    EditingKeyword, // Typing in the search box
    EditingFilter,  // Typing in one of the repository filter fields
}

/// Which repository filter field the cursor is on.
pub const FILTER_FIELDS: usize = 3;

pub struct App {
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub search: SearchFlow,
    pub repository: RepositoryFlow,
    pub cursor: usize,
    pub list_state: ListState,
    pub filter_cursor: usize,
    // Refreshed every frame by the renderer so mouse clicks can be mapped
    // back to result rows.
    pub results_area: Option<Rect>,
}

impl App {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            should_quit: false,
            tab: Tab::Search,
            input_mode: InputMode::EditingKeyword,
            search: SearchFlow::new(),
            repository: RepositoryFlow::new(),
            cursor: 0,
            list_state,
            filter_cursor: 0,
            results_area: None,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn switch_tab(&mut self) {
        self.tab = match self.tab {
            Tab::Search => Tab::Repository,
            Tab::Repository => Tab::Search,
        };
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_keyword_mode(&mut self) {
        self.input_mode = InputMode::EditingKeyword;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::EditingFilter;
    }

    pub fn next_result(&mut self) {
        if !self.search.rows().is_empty() {
            self.cursor = (self.cursor + 1).min(self.search.rows().len() - 1);
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn previous_result(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    /// Toggle the row under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(row) = self.search.rows().get(self.cursor) {
            let id = row.id;
            self.search.toggle(id);
        }
    }

    /// URL of the row under the cursor, for opening in a browser.
    pub fn current_url(&self) -> Option<String> {
        self.search
            .rows()
            .get(self.cursor)
            .map(|row| row.item.url.clone())
    }

    /// Called after a search completes so the cursor points at row 0 again.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.list_state.select(Some(0));
    }

    pub fn next_filter(&mut self) {
        self.filter_cursor = (self.filter_cursor + 1) % FILTER_FIELDS;
    }

    pub fn previous_filter(&mut self) {
        self.filter_cursor = (self.filter_cursor + FILTER_FIELDS - 1) % FILTER_FIELDS;
    }

    /// Edit buffer for the filter field the cursor is on.
    pub fn current_filter_buffer_mut(&mut self) -> &mut String {
        match self.filter_cursor {
            0 => &mut self.repository.keyword_input,
            1 => &mut self.repository.date_from_input,
            _ => &mut self.repository.date_to_input,
        }
    }

    /// Map a mouse click to a result row and toggle it. Clicks outside the
    /// visible list (or past the last row) do nothing. This is the
    /// click-to-select convenience; links open only via the dedicated key.
    pub fn click_at(&mut self, column: u16, row: u16) {
        if self.tab != Tab::Search {
            return;
        }
        let Some(area) = self.results_area else {
            return;
        };
        // Inside the block borders: one cell in from each edge.
        if column <= area.x
            || column >= area.x + area.width.saturating_sub(1)
            || row <= area.y
            || row >= area.y + area.height.saturating_sub(1)
        {
            return;
        }

        let index = (row - area.y - 1) as usize + self.list_state.offset();
        if index < self.search.rows().len() {
            self.cursor = index;
            self.list_state.select(Some(index));
            self.search.toggle_at(index);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchdeck_api::SearchResponse;

    fn app_with_results(count: usize) -> App {
        let mut app = App::new();
        app.search.input = "rust".into();
        app.search.submit().unwrap();
        let data = (0..count)
            .map(|i| format!(r#"{{"url": "http://r{}"}}"#, i))
            .collect::<Vec<_>>()
            .join(",");
        let response: SearchResponse =
            serde_json::from_str(&format!(r#"{{"status": "success", "data": [{}]}}"#, data))
                .unwrap();
        app.search.apply_search(Ok(response));
        app
    }

    #[test]
    fn test_cursor_clamps_to_result_range() {
        let mut app = app_with_results(2);
        app.next_result();
        app.next_result();
        app.next_result();
        assert_eq!(app.cursor, 1);

        app.previous_result();
        app.previous_result();
        app.previous_result();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_toggle_current_marks_row() {
        let mut app = app_with_results(2);
        app.next_result();
        app.toggle_current();

        assert!(app.search.rows()[1].selected);
        assert!(app.search.save_enabled());
    }

    #[test]
    fn test_filter_cursor_wraps() {
        let mut app = App::new();
        app.next_filter();
        app.next_filter();
        app.next_filter();
        assert_eq!(app.filter_cursor, 0);

        app.previous_filter();
        assert_eq!(app.filter_cursor, FILTER_FIELDS - 1);
    }

    #[test]
    fn test_click_toggles_row_inside_list() {
        let mut app = app_with_results(3);
        app.results_area = Some(Rect::new(0, 5, 40, 10));

        // First row sits just inside the top border.
        app.click_at(5, 6);
        assert!(app.search.rows()[0].selected);
        assert_eq!(app.cursor, 0);

        // Clicking it again untoggles.
        app.click_at(5, 6);
        assert!(!app.search.rows()[0].selected);
    }

    #[test]
    fn test_click_outside_list_is_ignored() {
        let mut app = app_with_results(1);
        app.results_area = Some(Rect::new(0, 5, 40, 10));

        app.click_at(5, 2); // above the list
        app.click_at(5, 9); // inside, but past the last row
        assert!(!app.search.rows()[0].selected);
    }
}
