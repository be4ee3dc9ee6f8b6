//! The single owner of reader state.
//!
//! [`NewsApp`] receives [`Command`]s, applies them to the feed query, the view
//! selector and the three persisted lists, and answers with [`Notice`]s for
//! the user. A renderer reads the result through [`NewsApp::render`].
//!
//! Commands are handled one at a time (`&mut self`), so no locking is needed.
//! Fetches can still be split into [`NewsApp::begin_feed_load`] and
//! [`NewsApp::apply_feed_response`] by a caller that runs them elsewhere;
//! responses to superseded requests are then dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::article::Article;
use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::feed::{Category, FeedRequest, FeedState, QueryChange};
use crate::lists::{ArticleList, ListKind, Toggled};
use crate::provider::HeadlinesProvider;
use crate::render::{show_load_more, ArticleCard, RenderModel};
use crate::sample::{fallback_articles, fallback_more_articles};
use crate::storage::{read_json, write_json, Storage};
use crate::view::{Transition, ViewMode, ViewSelector};

const THEME_KEY: &str = "darkMode";

/// Optional platform features. Absent ones only produce a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub notifications: bool,
    pub voice: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Notifications,
    Voice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Search(String),
    SelectCategory(Option<Category>),
    SelectCountry(String),
    LoadMore,
    ShowBookmarks,
    ShowHistory,
    ShowOffline,
    ToggleBookmark(Article),
    ToggleOffline(Article),
    OpenArticle(Article),
    ToggleReadingMode,
    ExitReadingMode,
    ToggleTheme,
    ToggleNotifications,
    StartVoiceSearch,
    VoiceTranscript(String),
    BreakingNews(Article),
}

/// Transient, user-visible messages produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The provider failed; sample headlines are shown instead.
    FallbackContent,
    /// A write did not reach storage. In-memory state is still current.
    StorageUnavailable(&'static str),
    FeatureUnavailable(Feature),
    Bookmarked,
    Unbookmarked,
    SavedOffline,
    RemovedOffline,
    NoArticleSelected,
    NotificationsEnabled,
    NotificationsDisabled,
    Listening,
    BreakingNews(Article),
}

pub struct NewsApp<S: Storage> {
    storage: S,
    provider: Arc<dyn HeadlinesProvider>,
    feed: FeedState,
    view: ViewSelector,
    bookmarks: ArticleList,
    history: ArticleList,
    offline: ArticleList,
    display: Vec<Article>,
    selected: Option<Article>,
    reading_mode: bool,
    dark_mode: bool,
    notifications_enabled: bool,
    capabilities: Capabilities,
}

impl<S: Storage> NewsApp<S> {
    /// Restores lists and theme from `storage`. Does not fetch; call [`start`](Self::start).
    pub async fn load(
        storage: S,
        provider: Arc<dyn HeadlinesProvider>,
        config: &AppConfig,
        capabilities: Capabilities,
    ) -> Self {
        let bookmarks = ArticleList::load(&storage, ListKind::Bookmarks, &config.lists).await;
        let history = ArticleList::load(&storage, ListKind::History, &config.lists).await;
        let offline = ArticleList::load(&storage, ListKind::Offline, &config.lists).await;
        let dark_mode: bool = read_json(&storage, THEME_KEY).await;

        info!(
            bookmarks = bookmarks.len(),
            history = history.len(),
            offline = offline.len(),
            dark_mode,
            "reader state restored"
        );

        Self {
            storage,
            provider,
            feed: FeedState::new(&config.feed, config.provider.page_size),
            view: ViewSelector::new(),
            bookmarks,
            history,
            offline,
            display: Vec::new(),
            selected: None,
            reading_mode: false,
            dark_mode,
            notifications_enabled: false,
            capabilities,
        }
    }

    /// Initial feed load.
    pub async fn start(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        self.load_feed(&mut notices).await;
        notices
    }

    pub async fn dispatch(&mut self, command: Command) -> Vec<Notice> {
        let mut notices = Vec::new();
        debug!(?command, "dispatch");

        match command {
            Command::Refresh => {
                self.view.return_to_feed();
                self.load_feed(&mut notices).await;
            }
            Command::Search(term) => self.search(&term, &mut notices).await,
            Command::SelectCategory(category) => {
                let change = self.feed.set_category(category);
                self.after_query_change(change, &mut notices).await;
            }
            Command::SelectCountry(country) => {
                let change = self.feed.set_country(&country);
                self.after_query_change(change, &mut notices).await;
            }
            Command::LoadMore => self.load_more(&mut notices).await,
            Command::ShowBookmarks => self.toggle_view(ListKind::Bookmarks, &mut notices).await,
            Command::ShowHistory => self.toggle_view(ListKind::History, &mut notices).await,
            Command::ShowOffline => self.toggle_view(ListKind::Offline, &mut notices).await,
            Command::ToggleBookmark(article) => {
                let notice = match self.toggle_in(ListKind::Bookmarks, &article, &mut notices).await {
                    Toggled::Added => Notice::Bookmarked,
                    Toggled::Removed => Notice::Unbookmarked,
                };
                notices.push(notice);
            }
            Command::ToggleOffline(article) => {
                let notice = match self.toggle_in(ListKind::Offline, &article, &mut notices).await {
                    Toggled::Added => Notice::SavedOffline,
                    Toggled::Removed => Notice::RemovedOffline,
                };
                notices.push(notice);
            }
            Command::OpenArticle(article) => {
                self.history.record(&article, Utc::now());
                self.selected = Some(article);
                self.persist(ListKind::History, &mut notices).await;
                self.refresh_snapshot(ListKind::History);
            }
            Command::ToggleReadingMode => {
                if self.selected.is_none() {
                    notices.push(Notice::NoArticleSelected);
                } else {
                    self.reading_mode = !self.reading_mode;
                }
            }
            Command::ExitReadingMode => {
                self.reading_mode = false;
                self.selected = None;
            }
            Command::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                if let Err(e) = write_json(&self.storage, THEME_KEY, &self.dark_mode).await {
                    warn!(error = %e, "failed to persist theme");
                    notices.push(Notice::StorageUnavailable(THEME_KEY));
                }
            }
            Command::ToggleNotifications => {
                if !self.capabilities.notifications {
                    notices.push(Notice::FeatureUnavailable(Feature::Notifications));
                } else {
                    self.notifications_enabled = !self.notifications_enabled;
                    notices.push(if self.notifications_enabled {
                        Notice::NotificationsEnabled
                    } else {
                        Notice::NotificationsDisabled
                    });
                }
            }
            Command::StartVoiceSearch => notices.push(if self.capabilities.voice {
                Notice::Listening
            } else {
                Notice::FeatureUnavailable(Feature::Voice)
            }),
            Command::VoiceTranscript(text) => {
                if self.capabilities.voice {
                    self.search(&text, &mut notices).await;
                } else {
                    notices.push(Notice::FeatureUnavailable(Feature::Voice));
                }
            }
            Command::BreakingNews(article) => {
                if self.capabilities.notifications && self.notifications_enabled {
                    notices.push(Notice::BreakingNews(article));
                } else {
                    debug!(title = %article.title, "breaking news ignored, notifications off");
                }
            }
        }

        notices
    }

    async fn search(&mut self, term: &str, notices: &mut Vec<Notice>) {
        let change = self.feed.set_search(term);
        self.after_query_change(change, notices).await;
    }

    /// Query changes only fetch while the feed is on screen; otherwise they
    /// take effect when the user returns to it.
    async fn after_query_change(&mut self, change: QueryChange, notices: &mut Vec<Notice>) {
        if change.is_changed() && self.view.is_feed() {
            self.load_feed(notices).await;
        }
    }

    async fn toggle_view(&mut self, kind: ListKind, notices: &mut Vec<Notice>) {
        match self.view.activate(kind) {
            Transition::Entered(kind) => {
                self.display = self.list(kind).articles();
                debug!(list = %kind, len = self.display.len(), "showing list");
            }
            Transition::ReturnedToFeed => self.load_feed(notices).await,
        }
    }

    async fn toggle_in(&mut self, kind: ListKind, article: &Article, notices: &mut Vec<Notice>) -> Toggled {
        let outcome = self.list_mut(kind).toggle(article, Utc::now());
        self.persist(kind, notices).await;
        self.refresh_snapshot(kind);
        outcome
    }

    async fn persist(&self, kind: ListKind, notices: &mut Vec<Notice>) {
        if let Err(e) = self.list(kind).persist(&self.storage).await {
            warn!(error = %e, list = %kind, "write-through failed, keeping in-memory list");
            notices.push(Notice::StorageUnavailable(kind.storage_key()));
        }
    }

    /// Keeps a list view in step with its store after a mutation.
    fn refresh_snapshot(&mut self, kind: ListKind) {
        if self.view.mode().list() == Some(kind) {
            self.display = self.list(kind).articles();
        }
    }

    async fn load_feed(&mut self, notices: &mut Vec<Notice>) {
        let request = self.begin_feed_load();
        let result = self.provider.fetch(&request).await;
        notices.extend(self.apply_feed_response(request, result));
    }

    async fn load_more(&mut self, notices: &mut Vec<Notice>) {
        if !self.view.is_feed() {
            debug!(mode = ?self.view.mode(), "load more ignored outside the feed");
            return;
        }
        if self.feed.next_page().is_none() {
            return;
        }
        let request = self.feed.begin_request();
        let result = self.provider.fetch(&request).await;
        notices.extend(self.apply_feed_response(request, result));
    }

    /// Starts a page-1 load of the current query and returns the request to run.
    pub fn begin_feed_load(&mut self) -> FeedRequest {
        self.feed.restart();
        self.feed.begin_request()
    }

    /// Applies a fetch result, unless the query or view moved on since `request` was made.
    pub fn apply_feed_response(
        &mut self,
        request: FeedRequest,
        result: Result<Vec<Article>, ProviderError>,
    ) -> Vec<Notice> {
        if !self.feed.is_current(&request) {
            debug!(
                request_generation = request.generation,
                current_generation = self.feed.generation(),
                page = request.page,
                "dropping stale feed response"
            );
            return Vec::new();
        }
        self.feed.complete(&request);

        if !self.view.is_feed() {
            debug!(mode = ?self.view.mode(), "feed response arrived after leaving the feed");
            return Vec::new();
        }

        let mut notices = Vec::new();
        let articles = match result {
            Ok(articles) => articles,
            Err(e) => {
                warn!(error = %e, page = request.page, "provider failed, using sample headlines");
                notices.push(Notice::FallbackContent);
                if request.page == 1 {
                    fallback_articles()
                } else {
                    fallback_more_articles()
                }
            }
        };

        if request.page == 1 {
            self.display = articles;
        } else {
            self.display.extend(articles);
        }
        notices
    }

    pub fn render(&self, now: DateTime<Utc>) -> RenderModel {
        let mode = self.view.mode();
        RenderModel {
            mode,
            cards: self
                .display
                .iter()
                .map(|article| ArticleCard::new(article, &self.bookmarks, now))
                .collect(),
            reading: self
                .selected
                .as_ref()
                .filter(|_| self.reading_mode)
                .map(|article| ArticleCard::new(article, &self.bookmarks, now)),
            dark_mode: self.dark_mode,
            bookmarks_count: self.bookmarks.len(),
            show_load_more: show_load_more(mode, self.display.len()),
            loading: self.feed.is_in_flight(),
            notifications_enabled: self.notifications_enabled,
        }
    }

    pub fn list(&self, kind: ListKind) -> &ArticleList {
        match kind {
            ListKind::Bookmarks => &self.bookmarks,
            ListKind::History => &self.history,
            ListKind::Offline => &self.offline,
        }
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut ArticleList {
        match kind {
            ListKind::Bookmarks => &mut self.bookmarks,
            ListKind::History => &mut self.history,
            ListKind::Offline => &mut self.offline,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn feed(&self) -> &FeedState {
        &self.feed
    }

    pub fn display(&self) -> &[Article] {
        &self.display
    }

    pub fn selected(&self) -> Option<&Article> {
        self.selected.as_ref()
    }

    pub fn is_reading_mode(&self) -> bool {
        self.reading_mode
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
