use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use newsdesk_core::{
    spawn_watcher, AppConfig, Capabilities, Category, Command, Event, FileStorage, HeadlinesProvider,
    NewsApiClient, NewsApp, Notice, RenderModel, WatchOptions,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: newsdesk [search <terms> | category <name> | country <code> | more | \
bookmarks | history | offline | bookmark <n> | save <n> | open <n> | theme | watch]";

/// What to do after the initial feed load.
enum Action {
    Show,
    Dispatch(Command),
    /// Commands that act on the n-th displayed article.
    OnArticle(usize, fn(newsdesk_core::Article) -> Command),
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(action) = parse_action(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = AppConfig::load();
    let provider: Arc<dyn HeadlinesProvider> = Arc::new(NewsApiClient::from_config(&config.provider)?);
    let capabilities = Capabilities {
        notifications: true,
        voice: false,
    };
    let mut app = NewsApp::load(FileStorage::new(data_dir()), provider.clone(), &config, capabilities).await;

    let mut notices = app.start().await;
    match action {
        Action::Show => {}
        Action::Dispatch(command) => notices.extend(app.dispatch(command).await),
        Action::OnArticle(index, make) => match app.display().get(index).cloned() {
            Some(article) => notices.extend(app.dispatch(make(article)).await),
            None => warn!(index, shown = app.display().len(), "no article at that position"),
        },
        Action::Watch => {
            notices.extend(app.dispatch(Command::ToggleNotifications).await);
            print_notices(&notices);
            return watch(&mut app, provider, &config).await;
        }
    }

    print_notices(&notices);
    print_model(&app.render(Utc::now()));
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn data_dir() -> PathBuf {
    // Linux: ~/.config/newsdesk
    AppConfig::config_dir().unwrap_or_else(|_| {
        let mut dir = dirs::home_dir().unwrap_or_default();
        dir.push(".newsdesk");
        dir
    })
}

fn parse_action(args: &[String]) -> Option<Action> {
    let (first, rest) = match args.split_first() {
        Some((first, rest)) => (first.as_str(), rest),
        None => return Some(Action::Show),
    };
    let index = || rest.first().and_then(|n| n.parse::<usize>().ok());

    let action = match first {
        "search" => Action::Dispatch(Command::Search(rest.join(" "))),
        "category" => {
            let category = match rest.first() {
                Some(name) => Some(name.parse::<Category>().ok()?),
                None => None,
            };
            Action::Dispatch(Command::SelectCategory(category))
        }
        "country" => Action::Dispatch(Command::SelectCountry(rest.first()?.clone())),
        "more" => Action::Dispatch(Command::LoadMore),
        "bookmarks" => Action::Dispatch(Command::ShowBookmarks),
        "history" => Action::Dispatch(Command::ShowHistory),
        "offline" => Action::Dispatch(Command::ShowOffline),
        "theme" => Action::Dispatch(Command::ToggleTheme),
        "bookmark" => Action::OnArticle(index()?, Command::ToggleBookmark),
        "save" => Action::OnArticle(index()?, Command::ToggleOffline),
        "open" => Action::OnArticle(index()?, Command::OpenArticle),
        "watch" => Action::Watch,
        _ => return None,
    };
    Some(action)
}

async fn watch(
    app: &mut NewsApp<FileStorage>,
    provider: Arc<dyn HeadlinesProvider>,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (event_tx, mut event_rx) = mpsc::channel(16);
    let watcher = spawn_watcher(provider, WatchOptions::from_config(config), event_tx);
    info!(minutes = config.watch.interval_minutes, "watching for breaking news, ctrl-c to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = event_rx.recv() => match event {
                Some(Event::BreakingNews(article)) => {
                    print_notices(&app.dispatch(Command::BreakingNews(article)).await);
                }
                None => break,
            },
        }
    }

    watcher.stop().await?;
    Ok(())
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        let text = match notice {
            Notice::FallbackContent => "Headlines unavailable, showing sample stories".to_owned(),
            Notice::StorageUnavailable(key) => format!("Could not save {key}; changes last until exit"),
            Notice::FeatureUnavailable(feature) => format!("{feature:?} is not supported here"),
            Notice::Bookmarked => "Bookmarked".to_owned(),
            Notice::Unbookmarked => "Bookmark removed".to_owned(),
            Notice::SavedOffline => "Article saved for offline reading".to_owned(),
            Notice::RemovedOffline => "Article removed from offline storage".to_owned(),
            Notice::NoArticleSelected => "Select an article to enter reading mode".to_owned(),
            Notice::NotificationsEnabled => "Notifications enabled".to_owned(),
            Notice::NotificationsDisabled => "Notifications disabled".to_owned(),
            Notice::Listening => "Listening...".to_owned(),
            Notice::BreakingNews(article) => format!("Breaking news! {}", article.title),
        };
        println!("* {text}");
    }
}

fn print_model(model: &RenderModel) {
    println!("== {:?} ({} bookmarked)", model.mode, model.bookmarks_count);
    if model.is_empty() {
        println!("No articles found.");
        return;
    }
    for (i, card) in model.cards.iter().enumerate() {
        let mark = if card.bookmarked { "*" } else { " " };
        println!(
            "{i:>3}{mark} [{}] {} ({} min read)",
            card.category, card.article.title, card.reading_minutes
        );
        println!("      {} | {}", card.source, card.published_label);
    }
    if model.show_load_more {
        println!("-- `newsdesk more` loads the next page");
    }
}
