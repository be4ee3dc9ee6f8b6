//! Persisted article collections: bookmarks, reading history and the offline list.
//!
//! All three share one shape, an ordered `Vec` of entries with no two entries
//! sharing an [`ArticleKey`](crate::article::ArticleKey). They differ only in
//! where new entries go and whether the list is capped:
//!
//! | list      | insert  | cap                   |
//! |-----------|---------|-----------------------|
//! | bookmarks | append  | none                  |
//! | history   | prepend | `history_cap` (50)    |
//! | offline   | append  | none                  |
//!
//! Mutations only touch memory. Callers write through with [`ArticleList::persist`]
//! after each one.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::article::Article;
use crate::config::ListConfig;
use crate::error::StorageError;
use crate::storage::{read_json, write_json, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bookmarks,
    History,
    Offline,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Bookmarks, ListKind::History, ListKind::Offline];

    pub fn storage_key(self) -> &'static str {
        match self {
            ListKind::Bookmarks => "bookmarkedArticles",
            ListKind::History => "readingHistory",
            ListKind::Offline => "offlineArticles",
        }
    }

    fn prepends(self) -> bool {
        matches!(self, ListKind::History)
    }

    /// Cap applied to this list under the given config.
    pub fn cap(self, config: &ListConfig) -> Option<usize> {
        match self {
            ListKind::History => Some(config.history_cap),
            ListKind::Bookmarks | ListKind::Offline => None,
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListKind::Bookmarks => "bookmarks",
            ListKind::History => "history",
            ListKind::Offline => "offline",
        };
        f.write_str(name)
    }
}

/// An article plus the moment it entered the list. The stamp is not part of
/// the identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEntry {
    #[serde(flatten)]
    pub article: Article,
    #[serde(
        rename = "stampedAt",
        alias = "readAt",
        alias = "savedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stamped_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleList {
    kind: ListKind,
    cap: Option<usize>,
    entries: Vec<ListEntry>,
}

impl ArticleList {
    pub fn new(kind: ListKind, cap: Option<usize>) -> Self {
        Self {
            kind,
            cap,
            entries: Vec::new(),
        }
    }

    pub fn for_kind(kind: ListKind, config: &ListConfig) -> Self {
        Self::new(kind, kind.cap(config))
    }

    /// Restores a list from storage. Missing or corrupt data gives an empty list.
    ///
    /// Duplicate keys in stored data (hand-edited files, older builds) keep
    /// their first occurrence, and the cap is reapplied.
    pub async fn load<S: Storage + ?Sized>(storage: &S, kind: ListKind, config: &ListConfig) -> Self {
        let stored: Vec<ListEntry> = read_json(storage, kind.storage_key()).await;
        let stored_len = stored.len();

        let mut seen = HashSet::new();
        let mut list = Self::for_kind(kind, config);
        list.entries = stored
            .into_iter()
            .filter(|entry| seen.insert(entry.article.key()))
            .collect();
        if list.entries.len() != stored_len {
            warn!(list = %kind, dropped = stored_len - list.entries.len(), "dropped duplicate stored entries");
        }
        list.enforce_cap();

        debug!(list = %kind, len = list.entries.len(), "list restored");
        list
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn articles(&self) -> Vec<Article> {
        self.entries.iter().map(|e| e.article.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, article: &Article) -> bool {
        self.position(article).is_some()
    }

    fn position(&self, article: &Article) -> Option<usize> {
        self.entries.iter().position(|e| e.article.same_key(article))
    }

    /// Removes the entry matching `article`'s key if present, otherwise inserts
    /// a new entry stamped with `now`.
    pub fn toggle(&mut self, article: &Article, now: DateTime<Utc>) -> Toggled {
        match self.position(article) {
            Some(index) => {
                self.entries.remove(index);
                Toggled::Removed
            }
            None => {
                self.insert(article, now);
                Toggled::Added
            }
        }
    }

    /// Moves `article` to the front (or back, for appending lists) with a fresh stamp.
    ///
    /// Unlike [`toggle`](Self::toggle) this never removes: re-reading an
    /// article only refreshes its position.
    pub fn record(&mut self, article: &Article, now: DateTime<Utc>) {
        if let Some(index) = self.position(article) {
            self.entries.remove(index);
        }
        self.insert(article, now);
    }

    pub fn remove(&mut self, article: &Article) -> bool {
        match self.position(article) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, article: &Article, now: DateTime<Utc>) {
        let entry = ListEntry {
            article: article.clone(),
            stamped_at: Some(now),
        };
        if self.kind.prepends() {
            self.entries.insert(0, entry);
        } else {
            self.entries.push(entry);
        }
        self.enforce_cap();
    }

    fn enforce_cap(&mut self) {
        let Some(cap) = self.cap else { return };
        if self.entries.len() <= cap {
            return;
        }
        if self.kind.prepends() {
            self.entries.truncate(cap);
        } else {
            let excess = self.entries.len() - cap;
            self.entries.drain(..excess);
        }
    }

    /// Overwrites the stored copy with the full in-memory list.
    pub async fn persist<S: Storage + ?Sized>(&self, storage: &S) -> Result<(), StorageError> {
        write_json(storage, self.kind.storage_key(), &self.entries).await
    }
}
