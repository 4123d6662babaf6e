//! UI rendering module for dpnav.
//!
//! `render()` is the single entry point called from the render loop's
//! `terminal.draw()` closure. It only ever reads the snapshot carried by a
//! redraw request; live coordinator state is never visible here.

mod dialog;
mod layout;
mod pane_view;

use ratatui::Frame;

use dpnav_core::{RedrawRequest, SessionState, Side};

use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};
use pane_view::render_pane;

/// Draws one complete frame for `request`. `Quit` draws nothing.
///
/// # Arguments
///
/// * `frame`: current render frame provided by `terminal.draw()`
/// * `request`: the newest redraw request from the coordinator
/// * `theme`: active color theme
pub fn render(frame: &mut Frame, request: &RedrawRequest, theme: &Theme) {
    match request {
        RedrawRequest::Refresh(session) => render_session(frame, session, theme),
        RedrawRequest::ShowDialog { session, dialog: view } => {
            render_session(frame, session, theme);
            dialog::render_dialog(frame, view, theme);
        }
        RedrawRequest::Quit => {}
    }
}

fn render_session(frame: &mut Frame, session: &SessionState, theme: &Theme) {
    let [left, right, status_bar] = compute_layout(frame.area());
    let active = session.active_side();
    render_pane(frame, left, session.pane(Side::Left), active == Side::Left, theme);
    render_pane(frame, right, session.pane(Side::Right), active == Side::Right, theme);
    render_status_bar(frame, status_bar, theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpnav_core::dialog::DialogView;
    use dpnav_core::item::with_parent_entry;
    use dpnav_core::{Item, Kind, Location, PaneState};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn session() -> SessionState {
        let listed = Location::descend(&Location::root(), Kind::LocalDirectory, "", "", "/srv");
        let mut file = Item::new(
            "gateway.xsl",
            Location::descend(&listed, Kind::LocalFile, "", "", "/srv/gateway.xsl"),
        )
        .with_details("2048", "2024-03-01 12:00:00");
        file.selected = true;
        let items = with_parent_entry(&listed, vec![file]);
        let left = PaneState::new(Location::root(), "DataPower appliances".into(), Vec::new());
        let right = PaneState::new(listed, "/srv".into(), items);
        let mut state = SessionState::new(left, right);
        state.set_viewport(10, 40);
        state
    }

    fn draw(request: &RedrawRequest) -> (String, Terminal<TestBackend>) {
        let mut terminal = Terminal::new(TestBackend::new(120, 14)).unwrap();
        terminal
            .draw(|frame| render(frame, request, &Theme::dark()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (text, terminal)
    }

    #[test]
    fn panes_show_titles_marks_and_details() {
        let (text, _) = draw(&RedrawRequest::Refresh(Box::new(session())));
        assert!(text.contains("DataPower appliances"));
        assert!(text.contains("/srv [1 marked]"));
        assert!(text.contains("* gateway.xsl"));
        assert!(text.contains("2024-03-01 12:00:00"));
        assert!(text.contains("(empty)"));
    }

    #[test]
    fn dialog_shows_masked_answer_and_places_cursor() {
        let view = DialogView { prompt: "Password for appliance 'dev':".into(), answer: "****".into(), cursor: 4 };
        let request = RedrawRequest::ShowDialog { session: Box::new(session()), dialog: view };
        let (text, mut terminal) = draw(&request);
        assert!(text.contains("Credential required"));
        assert!(text.contains("> ****"));
        let cursor = terminal.get_cursor_position().unwrap();
        // 64-wide box centred in 120 columns: border at 28, text from 29.
        assert_eq!(cursor.x, 29 + 2 + 4);
    }
}
