//! Which article list is on screen.
//!
//! Exactly one [`ViewMode`] is active. Activating a list view that is already
//! active returns to the feed; activating a different list view switches to it
//! directly.

use crate::lists::ListKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Feed,
    Bookmarks,
    History,
    Offline,
}

impl ViewMode {
    /// The list backing this view, `None` for the feed.
    pub fn list(self) -> Option<ListKind> {
        match self {
            ViewMode::Feed => None,
            ViewMode::Bookmarks => Some(ListKind::Bookmarks),
            ViewMode::History => Some(ListKind::History),
            ViewMode::Offline => Some(ListKind::Offline),
        }
    }

    pub fn for_list(kind: ListKind) -> Self {
        match kind {
            ListKind::Bookmarks => ViewMode::Bookmarks,
            ListKind::History => ViewMode::History,
            ListKind::Offline => ViewMode::Offline,
        }
    }
}

/// Outcome of [`ViewSelector::activate`], telling the caller what to materialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Snapshot this list into the display buffer.
    Entered(ListKind),
    /// Drop the snapshot and fetch the feed from page 1.
    ReturnedToFeed,
}

#[derive(Debug, Clone, Default)]
pub struct ViewSelector {
    mode: ViewMode,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_feed(&self) -> bool {
        self.mode == ViewMode::Feed
    }

    /// Toggles the view for `kind`.
    pub fn activate(&mut self, kind: ListKind) -> Transition {
        let target = ViewMode::for_list(kind);
        if self.mode == target {
            self.mode = ViewMode::Feed;
            Transition::ReturnedToFeed
        } else {
            self.mode = target;
            Transition::Entered(kind)
        }
    }

    /// Leaves any list view. Returns false when already on the feed.
    pub fn return_to_feed(&mut self) -> bool {
        let was_list = !self.is_feed();
        self.mode = ViewMode::Feed;
        was_list
    }
}
