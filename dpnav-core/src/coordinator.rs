//! The event loop: the single consumer of input and the only writer of
//! session state.
//!
//! Each input event is handled to completion before the next is read. An open
//! dialog takes every key; otherwise keys go through the flat table in
//! [`crate::keys`]. Entering a location is the only handler that talks to a
//! repository, and it blocks this thread for the duration of the call.

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::dialog::{DialogKind, DialogSession, DialogStep};
use crate::error::Result;
use crate::events::{InputEvent, RedrawRequest, RedrawSink};
use crate::item::Item;
use crate::keys::{self, Action, KeyCode};
use crate::repo::Repository;
use crate::session::{PaneState, SessionState, Side};

/// Terminal rows not available to pane listings: two pane borders and the
/// status line.
pub const CHROME_ROWS: u16 = 3;

/// Outcome of trying to enter the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The active pane now shows the entered location.
    Entered,
    /// The item belongs to an appliance without a credential; nothing was listed.
    MissingCredential { appliance: String },
    /// The current item cannot be entered (a file, or an empty listing).
    Ignored,
}

pub struct Coordinator {
    session: SessionState,
    dialog: Option<DialogSession>,
    /// Indexed by [`Side`].
    repos: [Repository; 2],
}

impl Coordinator {
    /// Loads the initial location of both sides. Any failure here is fatal.
    ///
    /// # Arguments
    ///
    /// * `repos`: left and right repositories, in that order
    /// * `cols`, `rows`: terminal size in cells
    pub fn start(mut repos: [Repository; 2], cols: u16, rows: u16) -> Result<Self> {
        let left = initial_pane(&mut repos[Side::Left.index()])?;
        let right = initial_pane(&mut repos[Side::Right.index()])?;
        let mut session = SessionState::new(left, right);
        let (pane_rows, pane_cols) = viewport(cols, rows);
        session.set_viewport(pane_rows, pane_cols);
        tracing::info!(
            left = %session.pane(Side::Left).location,
            right = %session.pane(Side::Right).location,
            "session started"
        );
        Ok(Self { session, dialog: None, repos })
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn repository(&self, side: Side) -> &Repository {
        &self.repos[side.index()]
    }

    pub fn dialog(&self) -> Option<&DialogSession> {
        self.dialog.as_ref()
    }

    /// The request that draws the current state.
    pub fn redraw(&self) -> RedrawRequest {
        let session = Box::new(self.session.clone());
        match &self.dialog {
            Some(dialog) => RedrawRequest::ShowDialog { session, dialog: dialog.view() },
            None => RedrawRequest::Refresh(session),
        }
    }

    /// Enters the active pane's current item.
    ///
    /// Descending puts the cursor on the first row; ascending through ".."
    /// puts it back on the row of the location just left.
    pub fn enter(&mut self) -> Result<Navigation> {
        let side = self.session.active_side();
        let Some(item) = self.session.current_item().cloned() else {
            return Ok(Navigation::Ignored);
        };
        if !item.location.kind.is_container() {
            tracing::debug!(name = %item.name, "not a container");
            return Ok(Navigation::Ignored);
        }
        let repo = &mut self.repos[side.index()];
        if let Some(appliance) = repo.missing_credential(&item) {
            return Ok(Navigation::MissingCredential { appliance });
        }

        let departed = Arc::clone(&self.session.active_pane().location);
        let items = repo.get_list(&item)?;
        let title = repo.title(&item);
        tracing::debug!(?side, location = %item.location, count = items.len(), "entered");
        self.session.set_pane(side, Arc::clone(&item.location), title, items);
        if item.is_parent_entry() {
            self.session.restore_cursor(&departed);
        }
        Ok(Navigation::Entered)
    }

    /// Relists the active pane's location after dropping any cached snapshot.
    /// The cursor stays on the same row index, clamped to the new listing.
    pub fn reload(&mut self) -> Result<()> {
        let side = self.session.active_side();
        let pane = self.session.active_pane();
        let (cursor, current) = (pane.cursor, Item::new("", Arc::clone(&pane.location)));
        let repo = &mut self.repos[side.index()];
        repo.invalidate_cache();
        let items = repo.get_list(&current)?;
        let title = repo.title(&current);
        self.session.set_pane(side, current.location, title, items);
        self.session.restore_row(cursor);
        Ok(())
    }

    /// Applies one input event and returns the redraw it calls for.
    pub fn handle(&mut self, event: InputEvent) -> Result<RedrawRequest> {
        let key = match event {
            InputEvent::Resize { cols, rows } => {
                let (pane_rows, pane_cols) = viewport(cols, rows);
                self.session.set_viewport(pane_rows, pane_cols);
                return Ok(self.redraw());
            }
            InputEvent::Key(key) => key,
        };
        if self.dialog.is_some() {
            self.dialog_key(key);
            return Ok(self.redraw());
        }

        let Some(action) = keys::action_for(key) else {
            return Ok(self.redraw());
        };
        tracing::debug!(?key, ?action, "key");
        match action {
            Action::Quit => return Ok(RedrawRequest::Quit),
            Action::ToggleSide => self.session.toggle_active_side(),
            Action::ToggleMark => self.session.toggle_current_selection(),
            Action::Move(motion) => self.session.navigate(motion),
            Action::SelectThrough(motion) => self.session.select_through(motion),
            Action::Reload => self.reload()?,
            Action::Enter => {
                if let Navigation::MissingCredential { appliance } = self.enter()? {
                    tracing::info!(%appliance, "credential required");
                    self.dialog = Some(DialogSession::credential_prompt(&appliance));
                }
            }
        }
        Ok(self.redraw())
    }

    fn dialog_key(&mut self, key: KeyCode) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let DialogStep::Closed(answer) = dialog.handle_key(key) else {
            return;
        };
        let DialogKind::CredentialPrompt { appliance } = dialog.kind.clone();
        self.dialog = None;
        match answer {
            Some(secret) => {
                let side = self.session.active_side();
                self.repos[side.index()].store_credential(&appliance, secret);
            }
            None => tracing::debug!(%appliance, "credential prompt dismissed"),
        }
    }

    /// Runs until quit, until either channel closes, or until a listing fails.
    ///
    /// A failure is logged, the view is told to quit, and the error is
    /// returned so the process can exit with it.
    pub fn run(mut self, input: Receiver<InputEvent>, sink: &impl RedrawSink) -> Result<()> {
        if !sink.send_redraw(self.redraw()) {
            return Ok(());
        }
        while let Ok(event) = input.recv() {
            let request = match self.handle(event) {
                Ok(request) => request,
                Err(err) => {
                    tracing::error!(error = %error_chain(&err), "fatal error, shutting down");
                    sink.send_redraw(RedrawRequest::Quit);
                    return Err(err);
                }
            };
            let quit = matches!(request, RedrawRequest::Quit);
            if !sink.send_redraw(request) {
                tracing::info!("render side closed");
                return Ok(());
            }
            if quit {
                tracing::info!("quit requested");
                return Ok(());
            }
        }
        tracing::info!("input closed");
        Ok(())
    }
}

fn initial_pane(repo: &mut Repository) -> Result<PaneState> {
    let item = repo.initial_item()?;
    let items = repo.get_list(&item)?;
    let title = repo.title(&item);
    Ok(PaneState::new(item.location, title, items))
}

/// Pane viewport `(rows, cols)` for a terminal of `cols` x `rows` cells.
pub fn viewport(cols: u16, rows: u16) -> (usize, usize) {
    let pane_rows = rows.saturating_sub(CHROME_ROWS).max(1);
    let pane_cols = (cols / 2).saturating_sub(2).max(1);
    (usize::from(pane_rows), usize::from(pane_cols))
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
