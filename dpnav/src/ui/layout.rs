//! Two-pane layout for dpnav.
//!
//! Pure layout arithmetic, recomputed inside every `terminal.draw()` so each
//! frame reflects the live terminal size. `Spacing::Overlap(1)` together with
//! `MergeStrategy::Fuzzy` lets the two pane borders share the middle column.

use ratatui::{
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Key hints shown in the status bar, as `(key, description)` pairs.
const HINTS: &[(&str, &str)] = &[
    ("Tab", "switch"),
    ("Enter", "open"),
    ("Space", "mark"),
    ("Shift+↑↓", "mark range"),
    ("r", "reload"),
    ("q", "quit"),
];

/// Returns `[left, right, status_bar]` for a frame of size `area`.
pub fn compute_layout(area: Rect) -> [Rect; 3] {
    let [main_area, status_bar] =
        area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));
    let [left, right] = main_area.layout(
        &Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(Spacing::Overlap(1)),
    );
    [left, right, status_bar]
}

/// Returns the inner `Rect` of a pane after removing its 1-cell border.
///
/// # Arguments
///
/// * `area`: the outer `Rect` of the pane (including borders)
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds the bordered `Block` of a pane: thick and in the active color when
/// the pane receives keys, plain otherwise. `Exact` merging draws broken
/// junctions between `Thick` and `Plain` borders, hence `Fuzzy`.
///
/// # Arguments
///
/// * `title`: breadcrumb shown in the top border
/// * `is_active`: `true` for the pane that receives navigation keys
/// * `theme`: active color theme
pub fn panel_block<'a>(title: &'a str, is_active: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row key-hint bar at the bottom of the terminal.
pub fn render_status_bar(frame: &mut Frame, area: Rect, theme: &Theme) {
    let key_style = Style::default().fg(theme.status_key).add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = HINTS
        .iter()
        .flat_map(|(key, what)| {
            [Span::styled(format!(" {key}"), key_style), Span::raw(format!(" {what} "))]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
