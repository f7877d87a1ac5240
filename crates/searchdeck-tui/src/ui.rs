// UI rendering logic
use crate::{App, InputMode, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use searchdeck_core::{messages, timefmt, StatusKind, StatusMessage};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(3), // Input area
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    match app.tab {
        Tab::Search => {
            render_search_input(frame, app, chunks[1]);
            render_search_content(frame, app, chunks[2]);
        }
        Tab::Repository => {
            render_filter_form(frame, app, chunks[1]);
            render_repository_content(frame, app, chunks[2]);
        }
    }

    render_status_bar(frame, app, chunks[3]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec![
        Line::from("搜索 [1]"),
        Line::from("数据仓库 [2]"),
    ];
    let selected = match app.tab {
        Tab::Search => 0,
        Tab::Repository => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" searchdeck "))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::EditingKeyword;
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let input = Paragraph::new(app.search.input.as_str())
        .style(Style::default())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" 搜索关键词 (Enter 搜索) "),
        );
    frame.render_widget(input, area);

    if editing {
        // Cursor after the typed text, inside the border.
        frame.set_cursor_position((
            area.x + app.search.input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_search_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(55), // Results list
            Constraint::Percentage(45), // Preview pane
        ])
        .split(area);

    render_results_list(frame, app, content_chunks[0]);
    render_result_preview(frame, app, content_chunks[1]);
}

fn render_results_list(frame: &mut Frame, app: &mut App, area: Rect) {
    app.results_area = Some(area);

    let selected_count = app.search.rows().iter().filter(|row| row.selected).count();
    let title = format!(" 搜索结果 ({} 选中) ", selected_count);

    if app.search.rows().is_empty() {
        let text = search_empty_state(&app.search);
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .search
        .rows()
        .iter()
        .map(|row| {
            let marker = if row.selected { "[✔] " } else { "[ ] " };
            let marker_style = if row.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let title = row.item.title.as_deref().unwrap_or(messages::NO_TITLE);
            let title_style = if row.selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(title.to_string(), title_style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Indexed(236)))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_result_preview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" 详情 ");

    let Some(row) = app.search.rows().get(app.cursor) else {
        frame.render_widget(block, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            row.item.title.as_deref().unwrap_or(messages::NO_TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            row.item.url.clone(),
            Style::default().fg(Color::Blue),
        )),
        Line::from(""),
    ];
    if let Some(summary) = row.item.summary.as_deref() {
        lines.push(Line::from(summary.to_string()));
    }

    let preview = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(preview, area);
}

fn render_filter_form(frame: &mut Frame, app: &App, area: Rect) {
    let field_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    let fields = [
        (" 关键词 ", app.repository.keyword_input.as_str()),
        (" 开始日期 ", app.repository.date_from_input.as_str()),
        (" 结束日期 ", app.repository.date_to_input.as_str()),
    ];

    for (i, (title, value)) in fields.iter().enumerate() {
        let active =
            app.input_mode == InputMode::EditingFilter && app.filter_cursor == i;
        let border_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let field = Paragraph::new(*value).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(*title),
        );
        frame.render_widget(field, field_chunks[i]);

        if active {
            frame.set_cursor_position((
                field_chunks[i].x + value.chars().count() as u16 + 1,
                field_chunks[i].y + 1,
            ));
        }
    }
}

fn render_repository_content(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" 数据仓库 ");

    if app.repository.records().is_empty() {
        let text = repository_empty_state(&app.repository);
        let empty = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["标题", "URL", "摘要", "搜索关键词", "创建时间"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .repository
        .records()
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(record.title.as_deref().unwrap_or(messages::NO_TITLE).to_string()),
                Cell::from(record.url.clone()).style(Style::default().fg(Color::Blue)),
                Cell::from(
                    record
                        .summary
                        .as_deref()
                        .unwrap_or(messages::NO_SUMMARY)
                        .to_string(),
                ),
                Cell::from(record.search_keyword.clone()),
                Cell::from(timefmt::format_timestamp(&record.created_at)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(26),
            Constraint::Percentage(22),
            Constraint::Percentage(12),
            Constraint::Percentage(18),
        ],
    )
    .header(header)
    .block(block);
    frame.render_widget(table, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.tab {
        Tab::Search => app.search.status.as_ref(),
        Tab::Repository => app.repository.status.as_ref(),
    };
    let loading = match app.tab {
        Tab::Search => app.search.loading,
        Tab::Repository => app.repository.loading,
    };

    let line = if loading {
        Line::from(Span::styled(
            messages::LOADING,
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(status) = status {
        Line::from(Span::styled(status.text.clone(), status_style(status)))
    } else {
        key_hints(app)
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn status_style(status: &StatusMessage) -> Style {
    match status.kind {
        StatusKind::Info => Style::default().fg(Color::Cyan),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

fn key_hints(app: &App) -> Line<'static> {
    let hints = match (app.tab, app.input_mode) {
        (Tab::Search, InputMode::EditingKeyword) => "Enter 搜索 | Esc 返回 | Tab 切换页面",
        (Tab::Search, _) => "/ 输入关键词 | 空格 选择 | s 保存选中 | o 打开链接 | Tab 切换 | q 退出",
        (Tab::Repository, InputMode::EditingFilter) => "Enter 查询 | Esc 返回 | ←/→ 切换字段",
        (Tab::Repository, _) => "e 编辑条件 | Enter 查询 | r 重置 | Tab 切换 | q 退出",
    };
    Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
}

/// Placeholder for an empty results area. Failure text only applies once a
/// search actually ran; a local validation error on the pristine screen
/// keeps the start hint.
fn search_empty_state(flow: &searchdeck_core::SearchFlow) -> &'static str {
    if flow.loading {
        messages::LOADING
    } else if !flow.has_searched() {
        "输入关键词开始搜索"
    } else if flow.status.as_ref().is_some_and(|s| s.is_error()) {
        messages::SEARCH_FAILED
    } else {
        messages::NO_RESULTS
    }
}

/// Placeholder for an empty records area, same shape as the search one.
fn repository_empty_state(flow: &searchdeck_core::RepositoryFlow) -> &'static str {
    if flow.loading {
        messages::LOADING
    } else if !flow.has_queried() {
        messages::ENTER_QUERY_HINT
    } else if flow.status.as_ref().is_some_and(|s| s.is_error()) {
        messages::QUERY_RETRY_HINT
    } else {
        messages::NO_MATCHING_DATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchdeck_core::{RepositoryFlow, SearchFlow};

    #[test]
    fn test_pristine_screen_keeps_start_hint_after_validation_error() {
        let mut flow = SearchFlow::new();
        flow.input = "   ".into();
        assert_eq!(flow.submit(), None);

        // The validation error goes to the status line; the results area
        // must still invite a first search, not claim one failed.
        assert_eq!(search_empty_state(&flow), "输入关键词开始搜索");
    }

    #[test]
    fn test_failed_search_shows_retry_hint() {
        let mut flow = SearchFlow::new();
        flow.input = "rust".into();
        flow.submit().unwrap();
        flow.apply_search(Err(searchdeck_api::ApiError::Timeout));

        assert_eq!(search_empty_state(&flow), messages::SEARCH_FAILED);
    }

    #[test]
    fn test_empty_result_set_shows_no_results() {
        let mut flow = SearchFlow::new();
        flow.input = "rust".into();
        flow.submit().unwrap();
        let response: searchdeck_api::SearchResponse =
            serde_json::from_str(r#"{"status": "success", "data": []}"#).unwrap();
        flow.apply_search(Ok(response));

        assert_eq!(search_empty_state(&flow), messages::NO_RESULTS);
    }

    #[test]
    fn test_repository_empty_states() {
        let mut flow = RepositoryFlow::new();
        assert_eq!(repository_empty_state(&flow), messages::ENTER_QUERY_HINT);

        flow.submit();
        assert_eq!(repository_empty_state(&flow), messages::LOADING);

        flow.apply_query(Err(searchdeck_api::ApiError::RequestFailed(
            "Status 502".into(),
        )));
        assert_eq!(repository_empty_state(&flow), messages::QUERY_RETRY_HINT);

        let response: searchdeck_api::QueryResponse =
            serde_json::from_str(r#"{"status": "success", "data": []}"#).unwrap();
        flow.submit();
        flow.apply_query(Ok(response));
        assert_eq!(repository_empty_state(&flow), messages::NO_MATCHING_DATA);
    }
}
