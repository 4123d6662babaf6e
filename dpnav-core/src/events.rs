//! Messages crossing the thread boundaries of the coordinator.
//!
//! Input flows in as [`InputEvent`]s over a bounded crossbeam channel;
//! rendering work flows out as [`RedrawRequest`]s through a [`RedrawSink`].
//! Every request carries a full snapshot, so the render side may drop all but
//! the newest one.

use crate::dialog::DialogView;
use crate::keys::KeyCode;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyCode),
    /// Terminal size in cells.
    Resize { cols: u16, rows: u16 },
}

#[derive(Debug, Clone)]
pub enum RedrawRequest {
    /// Draw both panes.
    Refresh(Box<SessionState>),
    /// Draw both panes with the dialog on top.
    ShowDialog { session: Box<SessionState>, dialog: DialogView },
    /// Tear the view down; nothing follows.
    Quit,
}

/// Destination of redraw requests.
pub trait RedrawSink {
    /// Delivers `request`, blocking while the queue is full. Returns `false`
    /// once the render side has gone away.
    fn send_redraw(&self, request: RedrawRequest) -> bool;
}

impl RedrawSink for tokio::sync::mpsc::Sender<RedrawRequest> {
    fn send_redraw(&self, request: RedrawRequest) -> bool {
        self.blocking_send(request).is_ok()
    }
}

impl RedrawSink for crossbeam_channel::Sender<RedrawRequest> {
    fn send_redraw(&self, request: RedrawRequest) -> bool {
        self.send(request).is_ok()
    }
}
