use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::article::{Article, ArticleKey};
use crate::config::AppConfig;
use crate::error::WatchError;
use crate::feed::FeedRequest;
use crate::provider::HeadlinesProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    BreakingNews(Article),
}

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub interval: Duration,
    pub window: chrono::Duration,
    pub country: String,
    pub page_size: u32,
}

impl WatchOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            interval: config.watch.interval(),
            window: config.watch.breaking_window(),
            country: config.watch.country.clone(),
            page_size: config.provider.page_size,
        }
    }
}

pub struct WatcherHandle {
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
}

impl WatcherHandle {
    pub async fn stop(self) -> Result<(), WatchError> {
        let _ = self.cancel_tx.send(());
        self.join.await.map_err(WatchError::from)
    }
}

/// One check: the newest headline counts as breaking when it was published
/// within the window and has not been reported before.
pub async fn check_once(
    provider: &dyn HeadlinesProvider,
    options: &WatchOptions,
    notified: &mut HashSet<ArticleKey>,
    now: DateTime<Utc>,
) -> Option<Event> {
    let request = FeedRequest::country(options.country.clone(), options.page_size);
    let articles = match provider.fetch(&request).await {
        Ok(articles) => articles,
        Err(err) => {
            warn!(error = %err, "breaking news check failed");
            return None;
        }
    };

    let latest = articles.into_iter().next()?;
    let published = latest.published_at?;
    if now - published >= options.window {
        debug!(title = %latest.title, "latest headline is not recent");
        return None;
    }
    if !notified.insert(latest.key()) {
        return None;
    }
    Some(Event::BreakingNews(latest))
}

/// Runs [`check_once`] every `options.interval`, first after one full interval.
///
/// Only emits events; it holds no reference to feed or view state.
pub fn spawn_watcher(
    provider: Arc<dyn HeadlinesProvider>,
    options: WatchOptions,
    event_tx: mpsc::Sender<Event>,
) -> WatcherHandle {
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
    let join = tokio::spawn(async move {
        let period = options.interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut notified = HashSet::new();

        loop {
            tokio::select! {
                _ = cancel_rx.recv() => {
                    info!("watcher shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    if let Some(event) = check_once(provider.as_ref(), &options, &mut notified, Utc::now()).await {
                        if event_tx.send(event).await.is_err() {
                            warn!("event receiver dropped");
                            break;
                        }
                    }
                }
            }
        }
    });

    WatcherHandle { cancel_tx, join }
}
