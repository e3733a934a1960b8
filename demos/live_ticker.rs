use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use matchday::{ClientConfig, FavoritesStore, LivePoller, PollerConfig, SportsDbClient};

const MAX_UPDATES: usize = 4;

#[tokio::main]
async fn main() -> matchday::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let client = Arc::new(SportsDbClient::new(config.clone()));

    let today = Utc::now().date_naive();
    let page = client.get_events_by_date(today, 1, 20).await?;
    println!(
        "{} fixtures today ({} pages)",
        page.pagination.total, page.pagination.total_pages
    );
    for m in &page.data {
        println!(
            "  [{}] {} {} - {} {} ({})",
            m.id,
            m.home.name,
            m.home.score.map(|s| s.to_string()).unwrap_or_default(),
            m.away.score.map(|s| s.to_string()).unwrap_or_default(),
            m.away.name,
            m.status_text
        );
    }

    let favorites = FavoritesStore::from_config(&config);
    let followed = favorites.filter_favorites(&page.data);
    println!("{} of {} favorites play today", followed.len(), favorites.count());

    let mut poller = LivePoller::new(client, PollerConfig::from(&config))?;
    let mut updates = poller.subscribe();
    poller.start();

    for _ in 0..MAX_UPDATES {
        if updates.changed().await.is_err() {
            break;
        }
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.loading {
            continue;
        }
        if let Some(error) = &snapshot.error {
            println!("refresh failed: {error} (stale: {})", snapshot.stale);
        }
        println!("{} matches in play", snapshot.pagination.total);
        for m in &snapshot.matches {
            println!("  {} vs {} {}", m.home.name, m.away.name, m.status_text);
        }
    }

    poller.stop();
    Ok(())
}
