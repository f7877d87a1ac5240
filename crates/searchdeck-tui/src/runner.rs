// TUI event loop and terminal management
use crate::{App, InputMode, Tab};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use searchdeck_api::BackendClient;
use std::io;

/// Run the interactive client until the user quits.
///
/// Requests are awaited inline in the event loop, so a second submission
/// cannot start before the previous one resolved; the open question of
/// racing responses never arises here.
pub async fn run_tui(
    mut app: App,
    client: BackendClient,
    mouse_enabled: bool,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.input_mode {
                InputMode::EditingKeyword => match key.code {
                    KeyCode::Enter => {
                        if let Some(keyword) = app.search.submit() {
                            // Redraw so the loading state is visible while
                            // the request is in flight.
                            terminal.draw(|f| crate::ui::render(f, &mut app))?;
                            let result = client.search(&keyword).await;
                            app.search.apply_search(result);
                            app.reset_cursor();
                            app.enter_normal_mode();
                        }
                    }
                    KeyCode::Tab => {
                        app.switch_tab();
                    }
                    KeyCode::Esc => {
                        app.enter_normal_mode();
                    }
                    KeyCode::Char(c) => {
                        app.search.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.search.input.pop();
                    }
                    _ => {}
                },
                InputMode::EditingFilter => match key.code {
                    KeyCode::Enter => {
                        let query = app.repository.submit();
                        terminal.draw(|f| crate::ui::render(f, &mut app))?;
                        let result = client.get_repository_data(&query).await;
                        app.repository.apply_query(result);
                        app.enter_normal_mode();
                    }
                    KeyCode::Esc => {
                        app.enter_normal_mode();
                    }
                    KeyCode::Tab | KeyCode::Right => {
                        app.next_filter();
                    }
                    KeyCode::BackTab | KeyCode::Left => {
                        app.previous_filter();
                    }
                    KeyCode::Char(c) => {
                        app.current_filter_buffer_mut().push(c);
                    }
                    KeyCode::Backspace => {
                        app.current_filter_buffer_mut().pop();
                    }
                    _ => {}
                },
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => {
                        app.quit();
                    }
                    KeyCode::Tab => {
                        app.switch_tab();
                    }
                    KeyCode::Char('1') => {
                        app.tab = Tab::Search;
                    }
                    KeyCode::Char('2') => {
                        app.tab = Tab::Repository;
                    }
                    KeyCode::Char('/') if app.tab == Tab::Search => {
                        app.enter_keyword_mode();
                    }
                    KeyCode::Char('e') if app.tab == Tab::Repository => {
                        app.enter_filter_mode();
                    }
                    KeyCode::Char('r') if app.tab == Tab::Repository => {
                        app.repository.reset();
                    }
                    KeyCode::Enter if app.tab == Tab::Repository => {
                        let query = app.repository.submit();
                        terminal.draw(|f| crate::ui::render(f, &mut app))?;
                        let result = client.get_repository_data(&query).await;
                        app.repository.apply_query(result);
                    }
                    KeyCode::Char('j') | KeyCode::Down if app.tab == Tab::Search => {
                        app.next_result();
                    }
                    KeyCode::Char('k') | KeyCode::Up if app.tab == Tab::Search => {
                        app.previous_result();
                    }
                    KeyCode::Char(' ') if app.tab == Tab::Search => {
                        app.toggle_current();
                    }
                    KeyCode::Char('s') if app.tab == Tab::Search => {
                        if let Some((items, keyword)) = app.search.begin_save() {
                            terminal.draw(|f| crate::ui::render(f, &mut app))?;
                            let result = client.save_data(&items, &keyword).await;
                            app.search.apply_save(result);
                        }
                    }
                    KeyCode::Char('o') if app.tab == Tab::Search => {
                        if let Some(url) = app.current_url() {
                            if let Err(e) = open::that(&url) {
                                app.search.status =
                                    Some(searchdeck_core::StatusMessage::error(format!(
                                        "无法打开浏览器: {}",
                                        e
                                    )));
                            }
                        }
                    }
                    _ => {}
                },
            },
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.click_at(mouse.column, mouse.row);
                }
            }
            _ => {}
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    Ok(())
}
