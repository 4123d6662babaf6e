//! Renders one pane: a bordered listing with mark, name, size and
//! modification columns.
//!
//! Only the rows in the pane's scroll window are turned into `ListItem`s, so a
//! filestore with thousands of entries costs no more per frame than a small one.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use dpnav_core::{Item, PaneState};

use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const SIZE_WIDTH: usize = 10;
const MODIFIED_WIDTH: usize = 19;
/// Narrower panes show names only.
const MIN_WIDTH_FOR_DETAILS: usize = 50;

/// Renders `pane` into `area`.
///
/// # Arguments
///
/// * `frame`: current render frame
/// * `area`: the `Rect` for the pane (includes borders)
/// * `pane`: snapshot of the pane state
/// * `is_active`: whether the pane receives keys; only then is the cursor row highlighted
/// * `theme`: active color theme
pub fn render_pane(frame: &mut Frame, area: Rect, pane: &PaneState, is_active: bool, theme: &Theme) {
    let marked = pane.items.iter().filter(|i| i.selected).count();
    let title = if marked > 0 {
        format!(" {} [{marked} marked] ", pane.title)
    } else {
        format!(" {} ", pane.title)
    };
    let block = panel_block(&title, is_active, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if pane.items.is_empty() {
        frame.render_widget(List::new([ListItem::new(Line::raw("(empty)"))]), inner);
        return;
    }

    let width = usize::from(inner.width);
    let items: Vec<ListItem> = pane
        .visible_items()
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            let at_cursor = is_active && pane.scroll + offset == pane.cursor;
            ListItem::new(row(item, width, at_cursor, theme))
        })
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn row(item: &Item, width: usize, at_cursor: bool, theme: &Theme) -> Line<'static> {
    let details = width >= MIN_WIDTH_FOR_DETAILS;
    let name_width = if details {
        width.saturating_sub(2 + 1 + SIZE_WIDTH + 1 + MODIFIED_WIDTH)
    } else {
        width.saturating_sub(2)
    };

    let name_color = if item.selected {
        theme.marked
    } else if item.location.kind.is_container() {
        theme.container
    } else {
        theme.file
    };
    let mark = if item.selected { "* " } else { "  " };
    let mut spans = vec![
        Span::styled(mark, Style::default().fg(theme.marked).add_modifier(Modifier::BOLD)),
        Span::styled(fit(&item.name, name_width), Style::default().fg(name_color)),
    ];
    if details {
        spans.push(Span::styled(
            format!(" {:>SIZE_WIDTH$} {:<MODIFIED_WIDTH$}", item.size, fit(&item.modified, MODIFIED_WIDTH)),
            Style::default().fg(theme.details),
        ));
    }

    let line = Line::from(spans);
    if at_cursor {
        line.style(Style::default().bg(theme.cursor_bg).fg(theme.cursor_fg))
    } else {
        line
    }
}

/// Pads or truncates `text` to exactly `width` characters; truncation ends in `~`.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text:<width$}")
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        cut
    }
}
