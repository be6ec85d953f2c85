use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::DefaultTerminal;
use ratatui::layout::Position;
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::store::TaskList;

use super::event::{self, AppEvent};
use super::input::InputField;
use super::theme::Theme;
use super::ui::{self, LayoutMap};

const EMPTY_INPUT_WARNING: &str = "Write a task before adding.";
const SELECT_TO_MARK: &str = "Select a task to mark it.";
const SELECT_TO_DELETE: &str = "Select a task to delete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

/// A prompt overlaying the UI. While one is open it owns all key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Non-fatal validation warning (empty input on add).
    Warning(String),
    /// Informational prompt (action needs a selection).
    Info(String),
    /// Yes/no gate before removal. The index is frozen when the prompt
    /// opens; the modal blocks any input that could move the selection.
    ConfirmDelete { index: usize },
}

pub struct App {
    pub store: TaskList,
    pub should_quit: bool,
    pub focus: Focus,
    pub input: InputField,
    /// Selection and scroll position of the task list.
    pub list_state: ListState,
    pub modal: Option<Modal>,
    pub theme: Theme,
    /// Regions recorded by the last draw, for mouse hit-testing.
    pub layout: LayoutMap,

    double_click_window: Duration,
    last_click: Option<(usize, Instant)>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            store: TaskList::new(),
            should_quit: false,
            focus: Focus::Input,
            input: InputField::default(),
            list_state: ListState::default(),
            modal: None,
            theme: config.theme.build(),
            layout: LayoutMap::default(),
            double_click_window: Duration::from_millis(config.double_click_ms),
            last_click: None,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            match event::poll(tick_rate)? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers),
                AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
                AppEvent::Tick => {}
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.modal.is_some() {
            self.handle_modal_key(code);
            return;
        }

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if code == KeyCode::Tab {
            self.focus = match self.focus {
                Focus::Input => Focus::List,
                Focus::List => Focus::Input,
            };
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(code, modifiers),
            Focus::List => self.handle_list_key(code),
        }
    }

    fn handle_input_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => self.add_from_input(),
            KeyCode::Esc => self.focus = Focus::List,
            _ => {
                self.input.handle_key(code, modifiers);
            }
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, code: KeyCode) {
        match self.modal.clone() {
            Some(Modal::Warning(_) | Modal::Info(_)) => {
                if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                    self.modal = None;
                }
            }
            Some(Modal::ConfirmDelete { index }) => match code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.modal = None;
                    if self.store.remove(Some(index)).is_ok() {
                        self.clamp_selection();
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.modal = None;
                }
                _ => {}
            },
            None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Modals are keyboard-driven; swallow clicks while one is open.
        if self.modal.is_some() {
            return;
        }
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }

        let pos = Position::new(mouse.column, mouse.row);
        let layout = self.layout;

        if layout.input.contains(pos) {
            self.focus = Focus::Input;
        } else if layout.add_button.contains(pos) {
            self.add_from_input();
        } else if layout.complete_button.contains(pos) {
            self.toggle_selected();
        } else if layout.delete_button.contains(pos) {
            self.request_delete();
        } else if let Some(row) = ui::row_at(&layout, mouse.column, mouse.row, self.store.len()) {
            self.focus = Focus::List;
            self.on_row_click(row, Instant::now());
        }
    }

    /// A click selects the row; a second click on the same row inside the
    /// double-click window toggles it.
    fn on_row_click(&mut self, row: usize, now: Instant) {
        let is_double = self
            .last_click
            .is_some_and(|(prev, at)| prev == row && now.duration_since(at) <= self.double_click_window);

        self.list_state.select(Some(row));

        if is_double {
            self.last_click = None;
            self.toggle_selected();
        } else {
            self.last_click = Some((row, now));
        }
    }

    /// Add the input buffer as a new task. On success the input clears and
    /// keeps focus; on empty input the buffer is left as-is so the user can
    /// keep typing after dismissing the warning.
    fn add_from_input(&mut self) {
        match self.store.add(self.input.text()) {
            Ok(_) => self.input.clear(),
            Err(_) => self.modal = Some(Modal::Warning(EMPTY_INPUT_WARNING.to_string())),
        }
    }

    fn toggle_selected(&mut self) {
        if self.store.toggle(self.list_state.selected()).is_err() {
            self.modal = Some(Modal::Info(SELECT_TO_MARK.to_string()));
        }
    }

    fn request_delete(&mut self) {
        match self.list_state.selected() {
            Some(index) if index < self.store.len() => {
                self.modal = Some(Modal::ConfirmDelete { index });
            }
            _ => self.modal = Some(Modal::Info(SELECT_TO_DELETE.to_string())),
        }
    }

    fn move_down(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    fn move_up(&mut self) {
        if self.store.is_empty() {
            return;
        }
        let next = self
            .list_state
            .selected()
            .map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(next));
    }

    /// Keep the selection valid after a removal: clamp to the new last
    /// index, clear when the list empties.
    fn clamp_selection(&mut self) {
        let len = self.store.len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;

    fn app() -> App {
        App::new(&Config::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(code, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// The regions a draw over a small terminal would record.
    fn lay_out(app: &mut App) {
        app.layout = LayoutMap {
            input: Rect::new(0, 1, 40, 3),
            list_rows: Rect::new(1, 5, 38, 7),
            list_offset: 0,
            add_button: Rect::new(0, 13, 13, 3),
            complete_button: Rect::new(13, 13, 13, 3),
            delete_button: Rect::new(26, 13, 13, 3),
        };
    }

    #[test]
    fn typing_and_enter_adds_a_task() {
        let mut app = app();
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert!(!app.store.tasks()[0].completed);
        assert_eq!(app.input.text(), "");
        assert_eq!(app.modal, None);
        // Focus stays on the input for the next task
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn adding_whitespace_shows_warning_and_keeps_input() {
        let mut app = app();
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.store.is_empty());
        assert_eq!(
            app.modal,
            Some(Modal::Warning(EMPTY_INPUT_WARNING.to_string()))
        );
        assert_eq!(app.input.text(), "   ");
    }

    #[test]
    fn warning_dismisses_without_side_effects() {
        let mut app = app();
        press(&mut app, KeyCode::Enter); // empty add
        assert!(matches!(app.modal, Some(Modal::Warning(_))));

        press(&mut app, KeyCode::Enter); // dismiss, must not re-add
        assert_eq!(app.modal, None);
        assert!(app.store.is_empty());
    }

    #[test]
    fn toggle_without_selection_prompts() {
        let mut app = app();
        app.store.add("a").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));

        assert_eq!(app.modal, Some(Modal::Info(SELECT_TO_MARK.to_string())));
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn delete_without_selection_prompts() {
        let mut app = app();
        app.store.add("a").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.modal, Some(Modal::Info(SELECT_TO_DELETE.to_string())));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn space_toggles_the_selected_task_both_ways() {
        let mut app = app();
        app.store.add("a").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.tasks()[0].completed);

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn confirmed_delete_removes_the_selected_task() {
        let mut app = app();
        app.store.add("first").unwrap();
        app.store.add("second").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down); // select 0

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.modal, Some(Modal::ConfirmDelete { index: 0 }));

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.modal, None);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "second");
    }

    #[test]
    fn declined_delete_leaves_the_list_unchanged() {
        let mut app = app();
        app.store.add("keep me").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.modal, None);
        assert_eq!(app.store.len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.modal, None);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn deleting_the_last_task_clears_the_selection() {
        let mut app = app();
        app.store.add("only").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.store.is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn deleting_the_tail_clamps_the_selection() {
        let mut app = app();
        app.store.add("first").unwrap();
        app.store.add("second").unwrap();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down); // select 1 (the tail)
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn double_click_toggles_the_row() {
        let mut app = app();
        app.store.add("a").unwrap();
        let base = Instant::now();

        app.on_row_click(0, base);
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(!app.store.tasks()[0].completed);

        app.on_row_click(0, base + Duration::from_millis(200));
        assert!(app.store.tasks()[0].completed);
    }

    #[test]
    fn slow_second_click_only_selects() {
        let mut app = app();
        app.store.add("a").unwrap();
        let base = Instant::now();

        app.on_row_click(0, base);
        app.on_row_click(0, base + Duration::from_millis(600));
        assert!(!app.store.tasks()[0].completed);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn clicks_on_different_rows_are_not_a_double_click() {
        let mut app = app();
        app.store.add("a").unwrap();
        app.store.add("b").unwrap();
        let base = Instant::now();

        app.on_row_click(0, base);
        app.on_row_click(1, base + Duration::from_millis(100));
        assert!(!app.store.tasks()[0].completed);
        assert!(!app.store.tasks()[1].completed);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn triple_click_does_not_toggle_twice() {
        let mut app = app();
        app.store.add("a").unwrap();
        let base = Instant::now();

        app.on_row_click(0, base);
        app.on_row_click(0, base + Duration::from_millis(100));
        assert!(app.store.tasks()[0].completed);

        // The pair is consumed; a third fast click starts a new sequence.
        app.on_row_click(0, base + Duration::from_millis(200));
        assert!(app.store.tasks()[0].completed);
    }

    #[test]
    fn clicking_the_add_button_adds_the_input() {
        let mut app = app();
        lay_out(&mut app);
        type_text(&mut app, "Buy milk");
        click(&mut app, 2, 14);

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn clicking_the_complete_button_without_selection_prompts() {
        let mut app = app();
        lay_out(&mut app);
        app.store.add("a").unwrap();
        click(&mut app, 15, 14);

        assert_eq!(app.modal, Some(Modal::Info(SELECT_TO_MARK.to_string())));
        assert!(!app.store.tasks()[0].completed);
    }

    #[test]
    fn clicking_a_row_selects_it_and_focuses_the_list() {
        let mut app = app();
        lay_out(&mut app);
        app.store.add("a").unwrap();
        app.store.add("b").unwrap();
        click(&mut app, 2, 6); // second visible row

        assert_eq!(app.list_state.selected(), Some(1));
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.modal, None);
    }

    #[test]
    fn clicking_the_delete_button_asks_for_confirmation() {
        let mut app = app();
        lay_out(&mut app);
        app.store.add("a").unwrap();
        click(&mut app, 2, 5); // select row 0
        click(&mut app, 28, 14);

        assert_eq!(app.modal, Some(Modal::ConfirmDelete { index: 0 }));
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn clicking_the_input_focuses_it() {
        let mut app = app();
        lay_out(&mut app);
        app.focus = Focus::List;
        click(&mut app, 5, 2);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn clicks_below_the_last_task_do_nothing() {
        let mut app = app();
        lay_out(&mut app);
        app.store.add("a").unwrap();
        click(&mut app, 2, 9); // inside the list block, past row 0

        assert_eq!(app.list_state.selected(), None);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn an_open_modal_swallows_clicks() {
        let mut app = app();
        lay_out(&mut app);
        type_text(&mut app, "queued");
        app.modal = Some(Modal::Warning(EMPTY_INPUT_WARNING.to_string()));
        click(&mut app, 2, 14); // the add button

        assert!(app.store.is_empty());
        assert!(matches!(app.modal, Some(Modal::Warning(_))));
    }

    #[test]
    fn q_in_the_input_is_text_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.input.text(), "q");
    }

    #[test]
    fn q_in_the_list_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn tab_switches_focus_back_and_forth() {
        let mut app = app();
        assert_eq!(app.focus, Focus::Input);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::List);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn full_session_scenario() {
        let mut app = app();
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Walk dog");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down); // select "Buy milk"
        press(&mut app, KeyCode::Char(' '));

        assert!(app.store.tasks()[0].completed);
        assert!(!app.store.tasks()[1].completed);

        press(&mut app, KeyCode::Down); // select "Walk dog"
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert!(app.store.tasks()[0].completed);
    }
}
