//! UI rendering functions for the TUI.
//!
//! Implements the three-panel layout with search input, note list, and detail
//! view using ratatui widgets, plus the edit and delete-confirmation overlays.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, Editor, EditorField, Focus, Mode};

/// Main rendering function for the TUI.
///
/// Draws the three-panel layout, then any active overlay on top.
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main layout: search input at top, content in middle, status line and
    // shortcut bar at the bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Content area
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Shortcut bar
        ])
        .split(size);

    // Split content area horizontally: note list (40%) | detail view (60%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    render_search_input(frame, app, main_chunks[0]);
    render_note_list(frame, app, content_chunks[0]);
    render_detail_view(frame, app, content_chunks[1]);
    render_status_line(frame, app, main_chunks[2]);
    render_shortcut_bar(frame, app, main_chunks[3]);

    match app.mode() {
        Mode::Edit(editor) => render_editor_overlay(frame, editor, size),
        Mode::ConfirmDelete(_) => render_confirm_overlay(frame, app, size),
        Mode::Browse => {}
    }
}

/// Renders the search input panel at the top of the screen.
///
/// Shows the current query with a cursor indicator when focused. Typing
/// narrows the note list immediately.
fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::SearchInput && matches!(app.mode(), Mode::Browse);

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(border_style);

    let mut content = app.search_input().to_string();
    if is_focused {
        content.push('█'); // Cursor indicator
    }

    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Formats a one-line list entry for a note: display title plus a dimmed
/// content preview.
fn note_list_line(note: &crate::models::Note) -> Line<'static> {
    let preview: String = note
        .content
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(40)
        .collect();

    let mut spans = vec![Span::raw(note.display_title().to_string())];
    if !preview.is_empty() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            preview,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// Renders the note list panel.
///
/// The panel title shows the active sort option; blank titles render as
/// "Untitled". An empty list shows a hint for adding the first note.
fn render_note_list(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::NoteList;

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let title = format!("Notes ({})", app.sort_option());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if app.notes().is_empty() {
        let message = if app.search_input().is_empty() {
            "No notes. Press a to add one."
        } else {
            "No notes match the search."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = app.notes().iter().map(|n| ListItem::new(note_list_line(n))).collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::REVERSED),
    );

    let mut list_state = ListState::default();
    list_state.select(app.selected_index());

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Renders the detail view panel showing the selected note in full.
fn render_detail_view(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::DetailView;

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Detail")
        .border_style(border_style);

    let content = if let Some(note) = app.selected_note() {
        let mut text = Text::default();
        text.lines.push(Line::from(vec![
            Span::styled("Title: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(note.display_title().to_string()),
        ]));
        text.lines.push(Line::from(vec![
            Span::styled("Id: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                note.id.to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        text.lines.push(Line::from(""));
        for line in note.content.lines() {
            text.lines.push(Line::from(line.to_string()));
        }
        text
    } else {
        Text::from("No note selected")
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Renders the transient status line (weather reading, errors, hints).
fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = Paragraph::new(app.status().unwrap_or_default())
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, area);
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted in cyan;
/// shortcuts change with the active mode and focus.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let pairs: Vec<(&str, &str)> = match app.mode() {
        Mode::Edit(_) => vec![
            ("Ctrl+S", "save"),
            ("Tab", "switch field"),
            ("Esc", "cancel"),
        ],
        Mode::ConfirmDelete(_) => vec![("y", "delete"), ("n", "cancel")],
        Mode::Browse => match app.focus() {
            Focus::SearchInput => vec![
                ("Tab", "next panel"),
                ("Enter", "to list"),
                ("Esc", "clear search"),
            ],
            Focus::NoteList => vec![
                ("q", "quit"),
                ("j/k", "navigate"),
                ("Enter", "edit"),
                ("a", "add"),
                ("d", "delete"),
                ("s", "sort"),
                ("w", "weather"),
            ],
            Focus::DetailView => vec![
                ("q", "quit"),
                ("j/k", "scroll"),
                ("Enter", "edit"),
                ("Esc", "back"),
            ],
        },
    };

    let mut spans = Vec::new();
    for (i, (k, action)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", sep_style));
        }
        spans.push(Span::styled(*k, key_style));
        spans.push(Span::raw(format!(": {action}")));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders the edit overlay centered over the main layout.
fn render_editor_overlay(frame: &mut Frame, editor: &Editor, area: Rect) {
    let popup = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Edit note {}", editor.note_id))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let field_style = |field| {
        if editor.field == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    let mut title = editor.title.clone();
    if editor.field == EditorField::Title {
        title.push('█');
    }
    frame.render_widget(
        Paragraph::new(title).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title")
                .border_style(field_style(EditorField::Title)),
        ),
        chunks[0],
    );

    let mut content = editor.content.clone();
    if editor.field == EditorField::Content {
        content.push('█');
    }
    frame.render_widget(
        Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Content")
                    .border_style(field_style(EditorField::Content)),
            ),
        chunks[1],
    );
}

/// Renders the delete confirmation dialog.
fn render_confirm_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup);

    let title = app
        .selected_note()
        .map(|n| n.display_title().to_string())
        .unwrap_or_else(|| "this note".to_string());

    let paragraph = Paragraph::new(format!("Delete \"{title}\"? (y/n)"))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm delete")
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(paragraph, popup);
}

/// Returns a rectangle centered in `area` covering the given percentages.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteId};

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note::new(NoteId::new(id), title, content)
    }

    #[test]
    fn four_row_layout_structure() {
        let area = Rect::new(0, 0, 100, 30);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        assert_eq!(main_chunks[0].height, 3, "search input should be 3 lines tall");
        assert_eq!(main_chunks[2].height, 1, "status line should be 1 line tall");
        assert_eq!(main_chunks[3].height, 1, "shortcut bar should be 1 line tall");

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[1]);

        let total_width = content_chunks[0].width + content_chunks[1].width;
        let left_percentage = (f32::from(content_chunks[0].width) / f32::from(total_width)) * 100.0;
        assert!(
            (left_percentage - 40.0).abs() < 5.0,
            "left panel should be approximately 40% wide, got {left_percentage}%"
        );
    }

    #[test]
    fn list_line_shows_untitled_for_blank_titles() {
        let line = note_list_line(&note(1, "   ", "some content"));
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(rendered.starts_with("Untitled"));
        assert!(rendered.contains("some content"));
    }

    #[test]
    fn list_line_truncates_preview_to_first_line() {
        let line = note_list_line(&note(1, "Title", "first line\nsecond line"));
        let rendered: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(rendered.contains("first line"));
        assert!(!rendered.contains("second line"));
    }

    #[test]
    fn list_line_caps_preview_length() {
        let long = "x".repeat(100);
        let line = note_list_line(&note(1, "Title", &long));
        let preview = line.spans.last().unwrap().content.as_ref();
        assert_eq!(preview.chars().count(), 40);
    }

    #[test]
    fn centered_rect_is_contained() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(70, 60, area);
        assert!(popup.x > 0);
        assert!(popup.y > 0);
        assert!(popup.right() <= area.right());
        assert!(popup.bottom() <= area.bottom());
    }
}
