pub mod app;
pub mod article;
pub mod classify;
pub mod config;
pub mod error;
pub mod feed;
pub mod lists;
pub mod provider;
pub mod render;
pub mod sample;
pub mod storage;
pub mod view;
pub mod watcher;

pub use app::{Capabilities, Command, Feature, NewsApp, Notice};
pub use article::{Article, ArticleKey, RawArticle};
pub use classify::{classify, icon_for, icon_for_label, reading_time_minutes};
pub use config::AppConfig;
pub use error::{ConfigError, ProviderError, StorageError, WatchError};
pub use feed::{Category, FeedRequest, FeedState, QueryChange, QueryFilter};
pub use lists::{ArticleList, ListEntry, ListKind, Toggled};
pub use provider::{parse_headlines, HeadlinesProvider, NewsApiClient};
pub use render::{format_published, ArticleCard, RenderModel};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use view::{Transition, ViewMode, ViewSelector};
pub use watcher::{check_once, spawn_watcher, Event, WatchOptions, WatcherHandle};
