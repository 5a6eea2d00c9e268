use tempfile::TempDir;
use watchbox::{Account, AccountRepository, CacheManager, FileStore, Session};

fn repo_at(dir: &TempDir) -> CacheManager {
    CacheManager::new(FileStore::open(dir.path().join("watchbox.json")).unwrap()).unwrap()
}

#[test]
fn login_persists_across_restarts() {
    let dir = TempDir::new().unwrap();
    let mut repo = repo_at(&dir);
    repo.save(&Account::new("alice", "pw").unwrap()).unwrap();

    let mut session = Session::restore(&repo).unwrap();
    assert!(!session.is_logged_in());
    session.login(&mut repo, "alice").unwrap();
    assert_eq!(session.username(), Some("alice"));
    drop(repo);

    let repo = repo_at(&dir);
    let restored = Session::restore(&repo).unwrap();
    assert_eq!(restored, session);
    assert!(repo.cache().contains("alice"));
}

#[test]
fn login_rejects_unknown_account() {
    let dir = TempDir::new().unwrap();
    let mut repo = repo_at(&dir);
    let mut session = Session::default();

    let err = session.login(&mut repo, "ghost").unwrap_err();
    assert_eq!(err.to_string(), "no account named \"ghost\"");
    assert!(!session.is_logged_in());
    assert_eq!(repo.current_username().unwrap(), None);
}

#[test]
fn logout_clears_persisted_user() {
    let dir = TempDir::new().unwrap();
    let mut repo = repo_at(&dir);
    repo.save(&Account::new("alice", "pw").unwrap()).unwrap();

    let mut session = Session::default();
    session.login(&mut repo, "alice").unwrap();
    session.logout(&mut repo).unwrap();
    assert_eq!(session.username(), None);
    drop(repo);

    let repo = repo_at(&dir);
    assert_eq!(Session::restore(&repo).unwrap().username(), None);
}
