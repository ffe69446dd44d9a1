//! SQLite store backed by a real file.

use qalgo_opinions::{OpinionForm, OpinionStore, SqliteOpinionStore, StoreError};

fn form(title: &str, text: &str, source: Option<&str>) -> OpinionForm {
    OpinionForm {
        title: title.into(),
        text: text.into(),
        source: source.map(Into::into),
    }
}

#[tokio::test]
async fn opinions_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opinions.db");

    let inserted = {
        let store = SqliteOpinionStore::new(&path).unwrap();
        let new = form("Teleportation", "No faster than light.", Some("https://example.org/t"))
            .validate()
            .unwrap();
        store.insert(new).await.unwrap()
    };

    let reopened = SqliteOpinionStore::new(&path).unwrap();
    let loaded = reopened.get(inserted.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Teleportation");
    assert_eq!(loaded.source.as_deref(), Some("https://example.org/t"));
    assert_eq!(loaded.timestamp, inserted.timestamp);
    assert_eq!(reopened.count().await.unwrap(), 1);
}

#[tokio::test]
async fn ids_keep_growing_after_a_rejected_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteOpinionStore::new(dir.path().join("o.db")).unwrap();

    let first = store.insert(form("a", "one", None).validate().unwrap()).await.unwrap();
    let dup = store.insert(form("b", "one", None).validate().unwrap()).await;
    assert!(matches!(dup, Err(StoreError::Duplicate(_))));
    let second = store.insert(form("c", "two", None).validate().unwrap()).await.unwrap();
    assert!(second.id > first.id);

    let recent = store.recent(10).await.unwrap();
    let titles: Vec<_> = recent.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a"]);
}

#[tokio::test]
async fn random_returns_a_stored_row() {
    let store = SqliteOpinionStore::in_memory().unwrap();
    for i in 0..5 {
        let new = form(&format!("t{i}"), &format!("text {i}"), None).validate().unwrap();
        store.insert(new).await.unwrap();
    }
    for _ in 0..10 {
        let pick = store.random().await.unwrap().unwrap();
        assert!(pick.text.starts_with("text "));
    }
}
