use std::fs;

use tempfile::TempDir;
use watchbox::{
    Account, AccountRepository, FileStore, ModelError, Movie, Review, StoreError,
    entities::DEFAULT_WATCHLIST_SUFFIX,
};

fn inception() -> Movie {
    Movie::new("100", "Inception").with_genres([28, 12]).with_rating(9.0).unwrap()
}

fn populated_account() -> Account {
    let mut account = Account::new("carol", "hunter2").unwrap();
    let list = account.add_watchlist("Weekend").unwrap();
    list.add(inception());
    list.add(Movie::new("7", "Se7en").with_plot("Seven deadly sins").with_release_date("1995-09-22"));
    account.add_review(
        Review::new("carol", inception(), 4, Some("loud but clever".into()), None).unwrap(),
    );
    account.record_watch(Movie::new("7", "Se7en"), Some("2024-02-01T21:00:00Z".parse().unwrap()));
    account.record_watch(inception(), Some("2023-12-24T19:30:00Z".parse().unwrap()));
    account.record_watch(Movie::new("7", "Se7en"), Some("2024-06-10T22:15:00Z".parse().unwrap()));
    account
}

#[test]
fn open_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("watchbox.json");

    let store = FileStore::open(&path).unwrap();

    assert!(path.exists());
    assert!(store.is_empty());
    assert_eq!(store.current_username().unwrap(), None);
}

#[test]
fn blank_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    fs::write(&path, "  \n").unwrap();

    let store = FileStore::open(&path).unwrap();
    assert!(store.is_empty());
}

#[test]
fn malformed_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    fs::write(&path, r#"{"users": {"bob": {"username": 5}}}"#).unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }), "unexpected error: {err}");
}

#[test]
fn unreadable_path_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    fs::create_dir(&path).unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }), "unexpected error: {err}");
}

#[test]
fn account_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    let account = populated_account();

    let mut store = FileStore::open(&path).unwrap();
    store.save(&account).unwrap();

    let mut reloaded = FileStore::open(&path).unwrap();
    let loaded = reloaded.get_account("carol").unwrap().unwrap();

    assert_eq!(loaded, account);
    assert_eq!(loaded.password(), "hunter2");
    let names: Vec<_> = loaded.watchlists().iter().map(|w| w.name()).collect();
    assert_eq!(names, [format!("carol{DEFAULT_WATCHLIST_SUFFIX}").as_str(), "Weekend"]);
    let weekend = loaded.watchlist_by_name("Weekend").unwrap();
    let ids: Vec<_> = weekend.movies().iter().map(Movie::id).collect();
    assert_eq!(ids, ["100", "7"]);
    assert_eq!(loaded.review_for("100").unwrap().comment(), "loud but clever");
    let history = loaded.watch_history().unwrap();
    let watched: Vec<_> = history.entries().iter().map(|e| e.movie().id()).collect();
    assert_eq!(watched, ["7", "100", "7"]);
}

#[test]
fn bob_scenario() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");

    let mut bob = Account::new("bob", "secret").unwrap();
    bob.add_watchlist("Favorites").unwrap().add(inception());
    let mut store = FileStore::open(&path).unwrap();
    store.save(&bob).unwrap();

    let mut reloaded = FileStore::open(&path).unwrap();
    let bob = reloaded.get_account("bob").unwrap().unwrap();
    assert_eq!(bob.watchlists().len(), 2);
    let favorites = bob.watchlist_by_name("Favorites").unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites.movies()[0].title(), "Inception");
}

#[test]
fn save_replaces_existing_account() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    let mut store = FileStore::open(&path).unwrap();

    let mut account = Account::new("dave", "pw").unwrap();
    store.save(&account).unwrap();
    account.add_watchlist("Horror").unwrap();
    store.save(&account).unwrap();

    assert_eq!(store.len(), 1);
    let mut reloaded = FileStore::open(&path).unwrap();
    assert_eq!(reloaded.get_account("dave").unwrap().unwrap().watchlists().len(), 2);
}

#[test]
fn every_save_rewrites_all_accounts() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    let mut store = FileStore::open(&path).unwrap();

    store.save(&Account::new("amy", "a").unwrap()).unwrap();
    store.save(&Account::new("ben", "b").unwrap()).unwrap();

    let reloaded = FileStore::open(&path).unwrap();
    assert_eq!(reloaded.usernames().collect::<Vec<_>>(), ["amy", "ben"]);
    assert!(reloaded.exists_by_name("amy").unwrap());
    assert!(!reloaded.exists_by_name("zed").unwrap());
}

#[test]
fn current_username_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");

    let mut store = FileStore::open(&path).unwrap();
    store.set_current_username(Some("alice")).unwrap();

    let reloaded = FileStore::open(&path).unwrap();
    assert_eq!(reloaded.current_username().unwrap().as_deref(), Some("alice"));

    let mut store = reloaded;
    store.set_current_username(None).unwrap();
    let reloaded = FileStore::open(&path).unwrap();
    assert_eq!(reloaded.current_username().unwrap(), None);
}

#[test]
fn failed_write_rolls_back_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    let mut store = FileStore::open(&path).unwrap();
    store.save(&Account::new("amy", "a").unwrap()).unwrap();

    // A directory in place of the file makes the final rename fail.
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();

    let err = store.save(&Account::new("ben", "b").unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }), "unexpected error: {err}");
    assert!(!store.exists_by_name("ben").unwrap());
    assert!(store.exists_by_name("amy").unwrap());

    assert!(store.set_current_username(Some("amy")).is_err());
    assert_eq!(store.current_username().unwrap(), None);
}

#[test]
fn file_is_camel_case_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");
    let mut store = FileStore::open(&path).unwrap();
    store.save(&populated_account()).unwrap();
    store.set_current_username(Some("carol")).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["currentUser"], "carol");
    let carol = &value["users"]["carol"];
    assert_eq!(carol["username"], "carol");
    assert_eq!(carol["watchHistory"]["movies"].as_array().unwrap().len(), 3);
    assert_eq!(carol["reviews"].as_object().unwrap().len(), 1);
}

#[test]
fn non_finite_ratings_never_reach_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("watchbox.json");

    assert!(matches!(
        Movie::new("1", "Heat").with_rating(f64::NAN),
        Err(ModelError::NonFiniteRating(_))
    ));
    assert!(Movie::new("1", "Heat").with_popularity(f64::INFINITY).is_err());

    let mut heat = Movie::new("1", "Heat").with_rating(f64::MAX).unwrap();
    assert!(heat.set_rating(f64::NAN).is_err());
    let heat = heat.with_popularity(-0.5).unwrap();

    let mut account = Account::new("erin", "pw").unwrap();
    account.add_watchlist("Crime").unwrap().add(heat.clone());
    account.record_watch(heat, None);
    let mut store = FileStore::open(&path).unwrap();
    store.save(&account).unwrap();

    let mut reloaded = FileStore::open(&path).unwrap();
    let loaded = reloaded.get_account("erin").unwrap().unwrap();
    assert_eq!(loaded, account);
    assert_eq!(loaded.watchlist_by_name("Crime").unwrap().movies()[0].rating(), f64::MAX);
}
