use std::time::Duration;

use watchbox::{
    AccountRepository, CacheManager, FileStore, Session, config::Config, tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,watchbox=debug".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let store = FileStore::open(&config.data_file)?;
    let accounts = store.len();
    let mut repo = CacheManager::new(store)?;
    let session = Session::restore(&repo)?;

    tracing::info!(
        data_file = %config.data_file.display(),
        accounts = accounts,
        current_user = ?session.username(),
        "store ready"
    );

    if let Some(username) = session.username() {
        if let Some(account) = repo.get_account(username)? {
            for list in account.watchlists() {
                println!("{}: {} movie(s)", list.name(), list.len());
            }
            let watched = account.watch_history().map_or(0, |h| h.len());
            println!("{} review(s), {} viewing(s)", account.review_count(), watched);
        }
    }

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("search") {
        let query = args.collect::<Vec<_>>().join(" ");

        let http = wreq::Client::builder()
            .user_agent("watchbox/0.1")
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        let tmdb = TmdbClient::new(
            http,
            config.tmdb_access_token.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.tmdb_rps,
        );

        let page = tmdb.search_by_title(&query, 1).await?;
        for movie in &page.movies {
            println!(
                "{}\t{}\t{}\t{:.1}",
                movie.id(),
                movie.title(),
                movie.release_date().unwrap_or("-"),
                movie.rating()
            );
        }
        tracing::info!(results = page.total_results, pages = page.total_pages, "search done");
    }

    Ok(())
}
