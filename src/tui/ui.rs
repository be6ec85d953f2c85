use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::app::{App, Focus, Modal};

/// Screen regions recorded while drawing, used for mouse hit-testing on the
/// next input event. Refreshed on every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutMap {
    pub input: Rect,
    /// Inner area of the task list block: one row per line.
    pub list_rows: Rect,
    /// Index of the first visible row (the list scrolls).
    pub list_offset: usize,
    pub add_button: Rect,
    pub complete_button: Rect,
    pub delete_button: Rect,
}

/// Map a click position to a task row, if it lands on one.
pub fn row_at(layout: &LayoutMap, x: u16, y: u16, task_count: usize) -> Option<usize> {
    if !layout.list_rows.contains(Position::new(x, y)) {
        return None;
    }
    let row = layout.list_offset + (y - layout.list_rows.y) as usize;
    (row < task_count).then_some(row)
}

/// Escape characters that rich-text list renderers treat as markup, so task
/// text always displays literally. `&` first, so entities don't double-escape.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(3), // input field
            Constraint::Min(0),    // task list
            Constraint::Length(3), // button bar
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    draw_title(frame, app, outer[0]);
    draw_input(frame, app, outer[1]);
    draw_tasks(frame, app, outer[2]);
    draw_buttons(frame, app, outer[3]);
    draw_status(frame, app, outer[4]);

    match &app.modal {
        Some(Modal::Warning(message)) => draw_modal(
            frame,
            " Warning ",
            message,
            "Enter to dismiss",
            Style::default().fg(app.theme.modal_warning),
        ),
        Some(Modal::Info(message)) => draw_modal(
            frame,
            " Notice ",
            message,
            "Enter to dismiss",
            Style::default().fg(app.theme.modal_info),
        ),
        Some(Modal::ConfirmDelete { .. }) => draw_modal(
            frame,
            " Confirm Deletion ",
            "Delete the selected task?",
            "y:delete  n:cancel",
            Style::default().fg(app.theme.modal_confirm),
        ),
        None => {}
    }
}

fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Task List ",
            Style::default()
                .fg(app.theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Tab:switch focus  q:quit",
            Style::default().fg(app.theme.text_secondary),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .title(" New Task ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(focused));

    app.layout.input = area;

    let content = if focused {
        app.input.display_with_cursor()
    } else if app.input.text().is_empty() {
        String::from("Type a task, press Enter to add")
    } else {
        app.input.text().to_string()
    };
    let style = if focused || !app.input.text().is_empty() {
        Style::default().fg(app.theme.text_primary)
    } else {
        Style::default().fg(app.theme.text_secondary)
    };

    frame.render_widget(Paragraph::new(content).style(style).block(block), area);
}

fn draw_tasks(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::List;
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(focused));

    app.layout.list_rows = block.inner(area);

    if app.store.is_empty() {
        app.layout.list_offset = 0;
        let msg = Paragraph::new("  No tasks yet.")
            .style(Style::default().fg(app.theme.text_secondary))
            .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let selected = app.list_state.selected();
    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected == Some(i);
            let indicator = if is_selected { "\u{25b8} " } else { "  " };
            let mut style = app.theme.task_style(task.completed);
            if is_selected {
                style = style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(
                    indicator,
                    Style::default().fg(app.theme.selection_indicator),
                ),
                Span::styled(escape_text(&task.text), style),
            ]))
        })
        .collect();

    frame.render_stateful_widget(List::new(items).block(block), area, &mut app.list_state);
    app.layout.list_offset = app.list_state.offset();
}

fn draw_buttons(frame: &mut Frame, app: &mut App, area: Rect) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    app.layout.add_button = cells[0];
    app.layout.complete_button = cells[1];
    app.layout.delete_button = cells[2];

    draw_button(frame, app, cells[0], "Add Task");
    draw_button(frame, app, cells[1], "Mark as Completed");
    draw_button(frame, app, cells[2], "Delete Task");
}

fn draw_button(frame: &mut Frame, app: &App, area: Rect, label: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_unfocused));
    let button = Paragraph::new(Span::styled(
        label,
        Style::default().fg(app.theme.button),
    ))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(button, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let done = app.store.tasks().iter().filter(|t| t.completed).count();

    let hints = match (&app.modal, app.focus) {
        (Some(Modal::ConfirmDelete { .. }), _) => "y:delete  n:cancel",
        (Some(_), _) => "Enter:dismiss",
        (None, Focus::Input) => "Enter:add  Tab:list",
        (None, Focus::List) => "Space:toggle  d:delete  j/k:move  Tab:input",
    };

    let status = Line::from(vec![
        Span::styled(
            format!(" {done}/{} done  ", app.store.len()),
            Style::default().fg(app.theme.accent),
        ),
        Span::styled(hints, Style::default().fg(app.theme.text_secondary)),
    ]);
    frame.render_widget(Paragraph::new(status), area);
}

/// Centered modal overlay: `Clear` background, bordered block, a message
/// line and a dim key hint. Owns the screen until dismissed.
fn draw_modal(frame: &mut Frame, title: &str, message: &str, hint: &str, border: Style) {
    let area = frame.area();
    let width = (message.len().max(hint.len()).max(title.len()) as u16 + 6)
        .min(area.width.saturating_sub(4));
    let height = 5u16.min(area.height.saturating_sub(2));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    let panel = Rect::new(x, y, width, height);

    frame.render_widget(Clear, panel);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}
