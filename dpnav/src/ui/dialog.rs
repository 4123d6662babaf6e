//! Centred modal box for the credential prompt.
//!
//! Drawn after both panes inside the same `terminal.draw()` closure; `Clear`
//! erases what is underneath. The terminal cursor is placed on the answer's
//! cursor position so the prompt behaves like a normal input line.

use ratatui::{
    layout::{Constraint, Position},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use dpnav_core::dialog::DialogView;

use crate::theme::Theme;
use crate::ui::layout::inner_rect;

const PROMPT_MARKER: &str = "> ";

pub fn render_dialog(frame: &mut Frame, view: &DialogView, theme: &Theme) {
    let width = frame.area().width.min(64);
    let area = frame.area().centered(Constraint::Length(width), Constraint::Length(4));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Credential required ")
        .border_style(Style::default().fg(theme.dialog_border));
    let inner = inner_rect(area);

    // Keep the cursor inside the box by scrolling long answers horizontally.
    let room = usize::from(inner.width).saturating_sub(PROMPT_MARKER.len() + 1);
    let skip = view.cursor.saturating_sub(room);
    let shown: String = view.answer.chars().skip(skip).take(room + 1).collect();

    let text = Text::from(vec![
        Line::from(view.prompt.clone()),
        Line::from(format!("{PROMPT_MARKER}{shown}")),
    ]);
    frame.render_widget(
        Paragraph::new(text).block(block).style(Style::default().fg(theme.dialog_text)),
        area,
    );

    let column = PROMPT_MARKER.len() + view.cursor - skip;
    let x = inner.x.saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
    frame.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y + 1));
}
