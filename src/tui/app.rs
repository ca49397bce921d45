//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, maps
//! key presses onto store operations, and redraws the list after every
//! event. The screen has a new-task input at the top, the task table in the
//! middle, and a footer with the remaining count and the filter selector.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tracing::info;

use crate::config::Config;
use crate::fields::{format_filter, Filter};
use crate::intent::format_remaining;
use crate::store::TaskStore;
use crate::tui::{
    colors::{BRAND, DONE_GREY, EDIT_CYAN, GOLD},
    enums::{AppState, Focus},
    input::InputField,
    utils::centered_rect,
};

const HIGHLIGHT_SYMBOL: &str = ">> ";
const CHECK_WIDTH: u16 = 3;
const ID_WIDTH: u16 = 5;
const PLACEHOLDER: &str = "What needs to be done?";

/// Terminal renderer for the task store.
///
/// Every key press is handled to completion (one store operation at most)
/// before the next frame is drawn.
pub struct App {
    state: AppState,
    focus: Focus,
    store: TaskStore,
    task_list_state: TableState,
    visible: Vec<u64>,
    new_task: InputField,
    edit_field: InputField,
    status_message: String,
    poll_timeout: Duration,
}

impl App {
    /// Create an App with an empty store showing `filter`.
    pub fn new(config: &Config, filter: Filter) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            focus: Focus::NewTask,
            store: TaskStore::with_filter(filter),
            task_list_state: TableState::default(),
            visible: Vec::new(),
            new_task: InputField::new(),
            edit_field: InputField::new(),
            status_message: String::new(),
            poll_timeout: config.poll_timeout,
        };
        app.refresh_visible();
        app
    }

    /// Re-read the visible task ids from the store.
    ///
    /// Keeps the selection on the same task when it is still shown,
    /// otherwise holds the row position, clamped to the new list.
    fn refresh_visible(&mut self) {
        let old_idx = self.task_list_state.selected();
        let old_id = old_idx.and_then(|idx| self.visible.get(idx)).copied();

        self.visible = self.store.visible_tasks().map(|t| t.id).collect();

        let new_idx = match old_id.and_then(|id| self.visible.iter().position(|&v| v == id)) {
            Some(idx) => Some(idx),
            None if self.visible.is_empty() => None,
            None => Some(old_idx.unwrap_or(0).min(self.visible.len() - 1)),
        };
        self.task_list_state.select(new_idx);
    }

    fn selected_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    fn select_task(&mut self, id: u64) {
        if let Some(idx) = self.visible.iter().position(|&v| v == id) {
            self.task_list_state.select(Some(idx));
        }
    }

    fn move_selection(&mut self, down: bool) {
        match self.task_list_state.selected() {
            Some(selected) if down => {
                if selected + 1 < self.visible.len() {
                    self.task_list_state.select(Some(selected + 1));
                }
            }
            Some(selected) => {
                if selected > 0 {
                    self.task_list_state.select(Some(selected - 1));
                }
            }
            None if !self.visible.is_empty() => self.task_list_state.select(Some(0)),
            None => {}
        }
    }

    fn is_editing(&self) -> bool {
        self.store.edit_session().is_some()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn set_filter(&mut self, filter: Filter) {
        self.store.set_filter(filter);
        self.refresh_visible();
        self.set_status_message(format!(
            "Showing {} tasks ({})",
            format_filter(filter),
            self.visible.len()
        ));
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        if self.store.toggle_completion(id) {
            let done = self.store.get(id).is_some_and(|t| t.completed);
            self.refresh_visible();
            self.set_status_message(format!(
                "Task {} marked {}",
                id,
                if done { "done" } else { "not done" }
            ));
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        if self.store.delete_task(id) {
            self.refresh_visible();
            self.set_status_message(format!("Deleted task {id}"));
        }
    }

    fn begin_edit_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No task selected".to_string());
            return;
        };
        if self.store.begin_edit(id) {
            let text = self
                .store
                .edit_session()
                .map(|s| s.editing_text.clone())
                .unwrap_or_default();
            self.edit_field = InputField::with_value(&text);
        }
    }

    /// Commit the active edit. Also used when the edited row loses focus.
    fn commit_edit(&mut self) {
        if let Some(id) = self.store.commit_edit() {
            self.set_status_message(format!("Task {id} updated"));
        }
        self.edit_field.clear();
        self.refresh_visible();
    }

    fn cancel_edit(&mut self) {
        if self.store.cancel_edit() {
            self.set_status_message("Edit cancelled".to_string());
        }
        self.edit_field.clear();
        self.refresh_visible();
    }

    fn sync_edit_text(&mut self) {
        self.store.update_editing_text(&self.edit_field.value);
    }

    /// Dispatch one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.clear_status_message();
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.state {
            AppState::Help => {
                self.handle_help_input(key);
                false
            }
            AppState::TaskList if self.is_editing() => {
                self.handle_edit_input(key);
                false
            }
            AppState::TaskList => match self.focus {
                Focus::NewTask => {
                    self.handle_new_task_input(key);
                    false
                }
                Focus::List => self.handle_task_list_input(key),
            },
        }
    }

    /// Keys typed into the new-task input.
    fn handle_new_task_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => match self.store.add_task(&self.new_task.value) {
                Some(id) => {
                    self.new_task.clear();
                    self.refresh_visible();
                    self.select_task(id);
                    self.set_status_message(format!("Added task {id}"));
                }
                None => self.set_status_message("Nothing to add".to_string()),
            },
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Backspace => self.new_task.handle_backspace(),
            KeyCode::Delete => self.new_task.handle_delete(),
            KeyCode::Left => self.new_task.move_cursor_left(),
            KeyCode::Right => self.new_task.move_cursor_right(),
            KeyCode::Home => self.new_task.move_cursor_home(),
            KeyCode::End => self.new_task.move_cursor_end(),
            KeyCode::Char(c) => self.new_task.handle_char(c),
            _ => {}
        }
    }

    /// Keys while the task list has focus. Returns true to quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Enter | KeyCode::Char('e') => self.begin_edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('f') | KeyCode::Right => self.set_filter(self.store.filter().next()),
            KeyCode::Char('F') | KeyCode::Left => self.set_filter(self.store.filter().prev()),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Completed),
            KeyCode::Char('3') => self.set_filter(Filter::Incomplete),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => self.focus = Focus::NewTask,
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Keys while a task's text is being edited in place.
    fn handle_edit_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Up => {
                self.commit_edit();
                self.move_selection(false);
            }
            KeyCode::Down => {
                self.commit_edit();
                self.move_selection(true);
            }
            KeyCode::Tab => {
                self.commit_edit();
                self.focus = Focus::NewTask;
            }
            KeyCode::Backspace => {
                self.edit_field.handle_backspace();
                self.sync_edit_text();
            }
            KeyCode::Delete => {
                self.edit_field.handle_delete();
                self.sync_edit_text();
            }
            KeyCode::Char(c) => {
                self.edit_field.handle_char(c);
                self.sync_edit_text();
            }
            KeyCode::Left => self.edit_field.move_cursor_left(),
            KeyCode::Right => self.edit_field.move_cursor_right(),
            KeyCode::Home => self.edit_field.move_cursor_home(),
            KeyCode::End => self.edit_field.move_cursor_end(),
            _ => {}
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1)
        ) {
            self.state = AppState::TaskList;
        }
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(self.poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                return Ok(self.handle_key(key.code, key.modifiers));
            }
        }
        Ok(false)
    }

    fn render_header(&mut self, f: &mut Frame, area: Rect) {
        let focused =
            self.state == AppState::TaskList && self.focus == Focus::NewTask && !self.is_editing();

        let text = if self.new_task.value.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.new_task.value.as_str(), Style::default().fg(Color::White))
        };
        let border_style = if focused {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };

        let input = Paragraph::new(Line::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(
                    " todos ",
                    Style::default().fg(BRAND).add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(input, area);

        if focused {
            let x = (area.x + 1).saturating_add(self.new_task.cursor_width());
            f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
        }
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let editing = self.store.edit_session().cloned();

        let header = Row::new(["", "ID", "Task"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .height(1);

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| self.store.get(id))
            .map(|task| {
                let check = if task.completed { "[x]" } else { "[ ]" };
                let (text, style) = match &editing {
                    Some(session) if session.editing_id == task.id => (
                        self.edit_field.value.clone(),
                        Style::default()
                            .fg(EDIT_CYAN)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                    _ if task.completed => (
                        display_text(&task.text),
                        Style::default()
                            .fg(DONE_GREY)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                    _ => (display_text(&task.text), Style::default().fg(Color::White)),
                };
                Row::new(vec![
                    Cell::from(check),
                    Cell::from(task.id.to_string()),
                    Cell::from(text),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(CHECK_WIDTH),
            Constraint::Length(ID_WIDTH),
            Constraint::Min(10),
        ];

        let highlight = if self.focus == Focus::List || editing.is_some() {
            Style::default().bg(Color::Gray).fg(Color::Black)
        } else {
            Style::default()
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Tasks ({}/{}) - {}",
                self.visible.len(),
                self.store.len(),
                format_filter(self.store.filter())
            )))
            .row_highlight_style(highlight)
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        f.render_stateful_widget(table, area, &mut self.task_list_state);

        // Put the terminal cursor inside the row being edited.
        if let (Some(session), Some(selected)) = (editing, self.task_list_state.selected()) {
            if self.visible.get(selected) == Some(&session.editing_id) {
                let row = selected.saturating_sub(self.task_list_state.offset()) as u16;
                let text_x = area.x
                    + 1
                    + HIGHLIGHT_SYMBOL.len() as u16
                    + CHECK_WIDTH
                    + 1
                    + ID_WIDTH
                    + 1;
                let x = text_x
                    .saturating_add(self.edit_field.cursor_width())
                    .min(area.right().saturating_sub(2));
                let y = area.y + 2 + row;
                if y + 1 < area.bottom() {
                    f.set_cursor_position((x, y));
                }
            }
        }
    }

    fn render_footer(&mut self, f: &mut Frame, area: Rect) {
        let current = self.store.filter();
        let mut spans = vec![
            Span::styled(
                format_remaining(self.store.remaining_count()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
        ];
        for filter in Filter::ALL {
            let style = if filter == current {
                Style::default()
                    .bg(GOLD)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", format_filter(filter)), style));
            spans.push(Span::raw(" "));
        }

        let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if let Some(session) = self.store.edit_session() {
            format!("Editing task {} | Enter save | Esc cancel", session.editing_id)
        } else {
            match (self.state, self.focus) {
                (AppState::Help, _) => "Help".to_string(),
                (AppState::TaskList, Focus::NewTask) => {
                    "Type a task, Enter to add | Tab to list | Ctrl+C quit".to_string()
                }
                (AppState::TaskList, Focus::List) => {
                    "Space toggle | e edit | d delete | f filter | a add | h help | q quit"
                        .to_string()
                }
            }
        };

        let status = Paragraph::new(status_text).style(Style::default().bg(BRAND).fg(Color::White));
        f.render_widget(status, area);
    }

    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("New task input:", bold)),
            Line::from("  Enter        Add task"),
            Line::from("  Tab/Esc/Down Go to task list"),
            Line::from(""),
            Line::from(Span::styled("Task list:", bold)),
            Line::from("  Up/Down, k/j Select task"),
            Line::from("  Space/x      Toggle completion"),
            Line::from("  Enter/e      Edit task text"),
            Line::from("  d/Delete     Delete task"),
            Line::from("  f/Right      Next filter"),
            Line::from("  F/Left       Previous filter"),
            Line::from("  1 2 3        All / Completed / Incomplete"),
            Line::from("  a/i/Tab      Go to new task input"),
            Line::from("  q/Esc        Quit"),
            Line::from(""),
            Line::from(Span::styled("Editing:", bold)),
            Line::from("  Enter        Save"),
            Line::from("  Esc          Cancel"),
            Line::from("  Up/Down/Tab  Save and leave"),
        ];

        let area = centered_rect(60, 80, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Esc to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    /// Draw the whole screen.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_task_list(f, chunks[1]);
        self.render_footer(f, chunks[2]);
        self.render_status_bar(f, chunks[3]);

        if self.state == AppState::Help {
            self.render_help(f, f.area());
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!("ui started");
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        info!(tasks = self.store.len(), remaining = self.store.remaining_count(), "ui exiting");
        Ok(())
    }
}

/// Committed edits may leave a task with empty text; show a marker instead.
fn display_text(text: &str) -> String {
    if text.is_empty() {
        "(empty)".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(&Config::default(), Filter::All)
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.handle_key(key, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Two tasks added through the input, list focused with "Buy milk" selected.
    fn milk_and_dog() -> App {
        let mut app = app();
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Walk dog");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Up);
        app
    }

    fn text_of(app: &App, id: u64) -> &str {
        app.store.get(id).map(|t| t.text.as_str()).unwrap_or_default()
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_enter_adds_task_and_clears_input() {
        let mut app = app();
        type_str(&mut app, "  Buy milk ");
        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert!(app.new_task.value.is_empty());
        assert_eq!(app.focus, Focus::NewTask);
        assert_eq!(app.selected_id(), Some(1));
    }

    #[test]
    fn test_blank_input_is_kept_and_ignored() {
        let mut app = app();
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.store.is_empty());
        assert_eq!(app.new_task.value, "   ");
        assert_eq!(app.status_message, "Nothing to add");
    }

    #[test]
    fn test_q_types_into_input_but_quits_from_list() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.new_task.value, "q");
        press(&mut app, KeyCode::Tab);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_toggle_and_completed_filter() {
        let mut app = milk_and_dog();
        assert_eq!(app.selected_id(), Some(1));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.get(1).unwrap().completed);
        assert_eq!(app.store.remaining_count(), 1);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.store.filter(), Filter::Completed);
        assert_eq!(app.visible, vec![1]);
        assert_eq!(app.selected_id(), Some(1));
    }

    #[test]
    fn test_toggle_out_of_view_keeps_valid_selection() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.visible, vec![2]);
        assert_eq!(app.selected_id(), Some(2));
        press(&mut app, KeyCode::Char('x'));
        assert!(app.visible.is_empty());
        assert_eq!(app.task_list_state.selected(), None);
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_filter_cycles_with_f_and_arrows() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.store.filter(), Filter::Completed);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.store.filter(), Filter::Incomplete);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.store.filter(), Filter::All);
    }

    #[test]
    fn test_edit_commit() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.store.edit_session().map(|s| s.editing_id), Some(1));
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "oat milk");
        assert_eq!(text_of(&app, 1), "Buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(text_of(&app, 1), "Buy oat milk");
        assert_eq!(text_of(&app, 2), "Walk dog");
        assert!(app.store.edit_session().is_none());
    }

    #[test]
    fn test_edit_cancel_does_not_quit() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "x");
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(text_of(&app, 1), "Buy milk");
        assert!(app.store.edit_session().is_none());
        assert_eq!(app.status_message, "Edit cancelled");
    }

    #[test]
    fn test_leaving_row_commits_edit() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "!");
        press(&mut app, KeyCode::Down);
        assert_eq!(text_of(&app, 1), "Buy milk!");
        assert_eq!(app.selected_id(), Some(2));

        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "?");
        press(&mut app, KeyCode::Tab);
        assert_eq!(text_of(&app, 2), "Walk dog?");
        assert_eq!(app.focus, Focus::NewTask);
    }

    #[test]
    fn test_edit_to_empty_text_is_committed() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        for _ in 0.."Buy milk".len() {
            press(&mut app, KeyCode::Backspace);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(text_of(&app, 1), "");
        assert!(screen(&mut app).contains("(empty)"));
    }

    #[test]
    fn test_delete_selected() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.store.get(1).is_none());
        assert_eq!(app.selected_id(), Some(2));
        press(&mut app, KeyCode::Delete);
        assert!(app.store.is_empty());
        assert_eq!(app.selected_id(), None);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.status_message, "No task selected");
    }

    #[test]
    fn test_help_screen_round_trip() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state, AppState::Help);
        assert!(!press(&mut app, KeyCode::Char('d')));
        assert_eq!(app.store.len(), 2);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::TaskList);
    }

    #[test]
    fn test_render_shows_tasks_count_and_filters() {
        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char(' '));
        let text = screen(&mut app);
        assert!(text.contains("Buy milk"));
        assert!(text.contains("Walk dog"));
        assert!(text.contains("[x]"));
        assert!(text.contains("[ ]"));
        assert!(text.contains("1 item left"));
        assert!(text.contains("Completed"));
        assert!(text.contains("Incomplete"));
        assert!(text.contains("Tasks (2/2)"));
    }

    #[test]
    fn test_render_placeholder_and_edit_buffer() {
        let mut app = app();
        assert!(screen(&mut app).contains(PLACEHOLDER));

        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, " now");
        let text = screen(&mut app);
        assert!(text.contains("Buy milk now"));
        assert!(text.contains("Editing task 1"));
    }

    fn cursor_after_draw(app: &mut App) -> ratatui::layout::Position {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal.get_cursor_position().unwrap()
    }

    #[test]
    fn test_input_cursor_uses_display_width() {
        let mut app = app();
        type_str(&mut app, "日本");
        let pos = cursor_after_draw(&mut app);
        assert_eq!((pos.x, pos.y), (5, 1));
    }

    #[test]
    fn test_cursor_stays_inside_boxes_for_long_text() {
        let mut app = app();
        type_str(&mut app, &"x".repeat(120));
        let pos = cursor_after_draw(&mut app);
        assert_eq!(pos.x, 68);

        let mut app = milk_and_dog();
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, &"寿".repeat(80));
        let pos = cursor_after_draw(&mut app);
        assert_eq!(pos.x, 68);
        assert_eq!(pos.y, 5);
    }
}
