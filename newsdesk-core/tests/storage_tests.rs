mod common;

use common::{article, temp_dir};
use newsdesk_core::config::ListConfig;
use newsdesk_core::storage::{read_json, write_json};
use newsdesk_core::{ArticleList, FileStorage, ListKind, Storage};

#[tokio::test]
async fn file_storage_persists_lists_across_instances() {
    let dir = temp_dir("persist");
    let storage = FileStorage::new(&dir);

    let mut bookmarks = ArticleList::for_kind(ListKind::Bookmarks, &ListConfig::default());
    bookmarks.toggle(&article("Keep me", "Tech Daily"), chrono::Utc::now());
    bookmarks.persist(&storage).await.unwrap();
    assert_eq!(storage.dir(), dir.as_path());
    assert!(storage.dir().join("bookmarkedArticles.json").exists());
    assert!(!storage.dir().join("bookmarkedArticles.json.tmp").exists());

    let reopened = FileStorage::new(&dir);
    let restored = ArticleList::load(&reopened, ListKind::Bookmarks, &ListConfig::default()).await;
    assert_eq!(restored, bookmarks);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn missing_key_loads_as_none() {
    let dir = temp_dir("missing");
    let storage = FileStorage::new(&dir);
    assert!(storage.load("nothing").await.unwrap().is_none());
    let value: bool = read_json(&storage, "darkMode").await;
    assert!(!value);
}

#[tokio::test]
async fn corrupted_file_falls_back_to_tmp_copy() {
    let dir = temp_dir("corrupt");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("offlineArticles.json"), b"{ this is not json ")
        .await
        .unwrap();
    tokio::fs::write(
        dir.join("offlineArticles.json.tmp"),
        br#"[{"title":"Recovered","sourceName":"Wire","savedAt":"2024-01-15T10:30:00Z"}]"#,
    )
    .await
    .unwrap();

    let storage = FileStorage::new(&dir);
    let offline = ArticleList::load(&storage, ListKind::Offline, &ListConfig::default()).await;
    assert_eq!(offline.len(), 1, "should fall back to tmp file when main is corrupted");
    assert_eq!(offline.entries()[0].article.title, "Recovered");

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn corrupted_file_without_backup_is_empty() {
    let dir = temp_dir("corrupt_nobackup");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("readingHistory.json"), b"[{").await.unwrap();

    let storage = FileStorage::new(&dir);
    let history = ArticleList::load(&storage, ListKind::History, &ListConfig::default()).await;
    assert!(history.is_empty());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn write_json_overwrites_previous_value() {
    let dir = temp_dir("overwrite");
    let storage = FileStorage::new(&dir);
    write_json(&storage, "darkMode", &true).await.unwrap();
    write_json(&storage, "darkMode", &false).await.unwrap();
    let value: bool = read_json(&storage, "darkMode").await;
    assert!(!value);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn corrupted_file_and_backup_load_empty() {
    let dir = temp_dir("corrupt_both");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("bookmarkedArticles.json"), b"not json").await.unwrap();
    tokio::fs::write(dir.join("bookmarkedArticles.json.tmp"), b"[{\"title\":").await.unwrap();

    let storage = FileStorage::new(&dir);
    let bookmarks = ArticleList::load(&storage, ListKind::Bookmarks, &ListConfig::default()).await;
    assert!(bookmarks.is_empty());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
