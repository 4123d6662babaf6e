//! Dual-pane session state: two panes plus the side that receives keys.
//!
//! `SessionState` has exactly one owner, the coordinator. The renderer only
//! ever sees clones of it handed over through the redraw queue.

use std::sync::Arc;

use crate::item::Item;
use crate::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Cursor movements shared by plain and select-through navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Up,
    Down,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Navigation context of one side.
#[derive(Debug, Clone)]
pub struct PaneState {
    pub location: Arc<Location>,
    pub title: String,
    pub items: Vec<Item>,
    pub cursor: usize,
    /// Index of the first visible row.
    pub scroll: usize,
    pub rows: usize,
    pub cols: usize,
}

impl PaneState {
    pub fn new(location: Arc<Location>, title: String, items: Vec<Item>) -> Self {
        Self { location, title, items, cursor: 0, scroll: 0, rows: 1, cols: 1 }
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// Rows `[scroll, scroll + rows)` clipped to the listing.
    pub fn visible_items(&self) -> &[Item] {
        let start = self.scroll.min(self.items.len());
        let end = (self.scroll + self.rows).min(self.items.len());
        &self.items[start..end]
    }

    fn target(&self, motion: Motion) -> usize {
        let last = self.items.len().saturating_sub(1);
        let target = match motion {
            Motion::Up => self.cursor.saturating_sub(1),
            Motion::Down => self.cursor + 1,
            Motion::PageUp => self.cursor.saturating_sub(self.rows),
            Motion::PageDown => self.cursor + self.rows,
            Motion::Top => 0,
            Motion::Bottom => last,
        };
        target.min(last)
    }

    /// Places the cursor on `index` (clamped) and scrolls it into view.
    pub fn move_to(&mut self, index: usize) {
        self.cursor = index.min(self.items.len().saturating_sub(1));
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.rows {
            self.scroll = self.cursor + 1 - self.rows;
        }
    }

    fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            // ".." only ascends; it never carries a mark.
            if !item.is_parent_entry() {
                item.selected = !item.selected;
            }
        }
    }

    fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.move_to(self.cursor);
    }
}

/// The two panes and the active side.
#[derive(Debug, Clone)]
pub struct SessionState {
    panes: [PaneState; 2],
    active: Side,
}

impl SessionState {
    pub fn new(left: PaneState, right: PaneState) -> Self {
        Self { panes: [left, right], active: Side::Left }
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    pub fn pane(&self, side: Side) -> &PaneState {
        &self.panes[side.index()]
    }

    pub fn active_pane(&self) -> &PaneState {
        self.pane(self.active)
    }

    fn active_pane_mut(&mut self) -> &mut PaneState {
        &mut self.panes[self.active.index()]
    }

    /// Replaces one pane's navigation context wholesale. Marks on the old
    /// listing go with it; cursor and scroll restart at the top.
    pub fn set_pane(&mut self, side: Side, location: Arc<Location>, title: String, items: Vec<Item>) {
        let pane = &mut self.panes[side.index()];
        pane.location = location;
        pane.title = title;
        pane.items = items;
        pane.cursor = 0;
        pane.scroll = 0;
    }

    pub fn toggle_active_side(&mut self) {
        self.active = self.active.other();
    }

    pub fn toggle_current_selection(&mut self) {
        let pane = self.active_pane_mut();
        let cursor = pane.cursor;
        pane.toggle(cursor);
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.active_pane().current_item()
    }

    pub fn navigate(&mut self, motion: Motion) {
        let pane = self.active_pane_mut();
        let target = pane.target(motion);
        pane.move_to(target);
    }

    /// Moves like [`navigate`](Self::navigate) and toggles every row the
    /// cursor leaves behind: the starting row and the rows between it and
    /// the landing row. When the cursor cannot move, the current row is
    /// toggled so a range selection at either end still marks something.
    pub fn select_through(&mut self, motion: Motion) {
        let pane = self.active_pane_mut();
        let from = pane.cursor;
        let to = pane.target(motion);
        let passed = if to > from {
            from..to
        } else if to < from {
            to + 1..from + 1
        } else {
            from..from + 1
        };
        for index in passed {
            pane.toggle(index);
        }
        pane.move_to(to);
    }

    /// Puts the active pane's cursor on the row for `departed`, if listed.
    pub fn restore_cursor(&mut self, departed: &Location) {
        let pane = self.active_pane_mut();
        let found = pane
            .items
            .iter()
            .position(|item| !item.is_parent_entry() && item.location.same_place(departed));
        if let Some(index) = found {
            pane.move_to(index);
        }
    }

    /// Puts the active pane's cursor on row `index`, clamped to the listing.
    pub fn restore_row(&mut self, index: usize) {
        self.active_pane_mut().move_to(index);
    }

    /// Applies a new pane viewport size to both sides and re-clamps scrolling.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        for pane in &mut self.panes {
            pane.set_viewport(rows, cols);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::with_parent_entry;
    use crate::location::Kind;

    fn pane(n: usize) -> PaneState {
        let listed = Location::descend(&Location::root(), Kind::LocalDirectory, "", "", "/d");
        let children = (0..n)
            .map(|i| {
                let name = format!("f{i:02}");
                let loc = Location::descend(&listed, Kind::LocalFile, "", "", format!("/d/{name}"));
                Item::new(name, loc)
            })
            .collect();
        let items = with_parent_entry(&listed, children);
        PaneState::new(listed, "/d".into(), items)
    }

    fn session(n: usize, rows: usize) -> SessionState {
        let mut s = SessionState::new(pane(n), pane(2));
        s.set_viewport(rows, 40);
        s
    }

    fn marked(s: &SessionState) -> Vec<usize> {
        s.active_pane()
            .items
            .iter()
            .enumerate()
            .filter(|(_, i)| i.selected)
            .map(|(idx, _)| idx)
            .collect()
    }

    #[test]
    fn page_down_scrolls_cursor_into_view() {
        let mut s = session(20, 5);
        s.navigate(Motion::PageDown);
        s.navigate(Motion::PageDown);
        let p = s.active_pane();
        assert_eq!(p.cursor, 10);
        assert_eq!(p.scroll, 6);
        s.navigate(Motion::Top);
        assert_eq!((s.active_pane().cursor, s.active_pane().scroll), (0, 0));
        s.navigate(Motion::Bottom);
        assert_eq!(s.active_pane().cursor, 20);
        assert_eq!(s.active_pane().visible_items().len(), 5);
    }

    #[test]
    fn parent_entry_is_never_marked() {
        let mut s = session(3, 10);
        s.toggle_current_selection();
        assert!(marked(&s).is_empty());
        s.navigate(Motion::Down);
        s.toggle_current_selection();
        assert_eq!(marked(&s), [1]);
        s.navigate(Motion::Down);
        assert_eq!(marked(&s), [1]);
    }

    #[test]
    fn select_through_marks_departed_rows() {
        let mut s = session(10, 4);
        s.navigate(Motion::Down);
        s.select_through(Motion::PageDown);
        assert_eq!(marked(&s), [1, 2, 3, 4]);
        assert_eq!(s.active_pane().cursor, 5);
        s.select_through(Motion::Up);
        assert_eq!(marked(&s), [1, 2, 3, 4, 5]);
        assert_eq!(s.active_pane().cursor, 4);
        // Leaving row 4 upwards unmarks 4..=1; row 5 was not departed.
        s.select_through(Motion::Top);
        assert_eq!(marked(&s), [5]);
        assert_eq!(s.active_pane().cursor, 0);
    }

    #[test]
    fn select_through_at_the_edge_toggles_current() {
        let mut s = session(3, 4);
        s.navigate(Motion::Bottom);
        s.select_through(Motion::Down);
        assert_eq!(marked(&s), [3]);
    }

    #[test]
    fn toggling_side_keeps_each_cursor() {
        let mut s = session(5, 4);
        s.navigate(Motion::Down);
        s.toggle_active_side();
        assert_eq!(s.active_side(), Side::Right);
        assert_eq!(s.active_pane().cursor, 0);
        s.toggle_active_side();
        assert_eq!(s.active_pane().cursor, 1);
    }

    #[test]
    fn shrinking_viewport_keeps_cursor_visible() {
        let mut s = session(30, 20);
        s.navigate(Motion::Bottom);
        s.set_viewport(3, 10);
        let p = s.active_pane();
        assert!(p.cursor >= p.scroll && p.cursor < p.scroll + p.rows);
    }

    #[test]
    fn restore_cursor_finds_departed_location() {
        let mut s = session(5, 4);
        let departed = Location::descend(&Location::root(), Kind::LocalFile, "", "", "/d/f03");
        s.restore_cursor(&departed);
        assert_eq!(s.current_item().unwrap().name, "f03");
    }
}
