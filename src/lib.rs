//! Fixtures, match details and live scores from [TheSportsDB](https://www.thesportsdb.com).
//!
//! [`SportsDbClient`] fetches provider payloads and normalizes them into
//! [`Match`], [`MatchEvent`], [`Team`] and [`League`] values, sliced into
//! pages with [`Pagination`] metadata. [`LivePoller`] keeps the matches
//! currently in play fresh on a fixed interval, and [`FavoritesStore`]
//! remembers which matches the user follows.
//!
//! ```no_run
//! # async fn example() -> matchday::Result<()> {
//! use std::sync::Arc;
//! use matchday::{ClientConfig, LivePoller, PollerConfig, SportsDbClient};
//!
//! let config = ClientConfig::from_env()?;
//! let client = Arc::new(SportsDbClient::new(config.clone()));
//! let mut poller = LivePoller::new(client, PollerConfig::from(&config))?;
//! poller.start();
//!
//! let mut updates = poller.subscribe();
//! while updates.changed().await.is_ok() {
//!     let snapshot = updates.borrow_and_update().clone();
//!     println!("{} live matches", snapshot.pagination.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod normalize;
pub mod paginate;
pub mod poller;
pub(crate) mod sportsdb;

#[cfg(test)]
mod test_support;

pub use client::SportsDbClient;
pub use config::ClientConfig;
pub use error::{MatchdayError, Result};
pub use favorites::{FavoritesStore, FileStore, KeyValueStore, MemoryStore};
pub use model::*;
pub use paginate::paginate;
pub use poller::{LivePoller, LiveSnapshot, MatchSource, PollerConfig};
pub use sportsdb::raw;
