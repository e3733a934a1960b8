use chrono::NaiveDate;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::*;
use crate::paginate::paginate;
use crate::poller::MatchSource;
use crate::sportsdb;

/// The main entry point for reading fixtures from TheSportsDB.
///
/// `SportsDbClient` wraps a [`reqwest::Client`] and a [`ClientConfig`] and
/// exposes normalized, paginated match lists, match details with their event
/// timeline, and the team and league catalogs.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchday::Result<()> {
/// use chrono::NaiveDate;
/// use matchday::SportsDbClient;
///
/// let client = SportsDbClient::default();
/// let date = NaiveDate::from_ymd_opt(2024, 8, 11).unwrap();
/// let page = client.get_events_by_date(date, 1, 10).await?;
/// println!("{} of {} matches", page.data.len(), page.pagination.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SportsDbClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SportsDbClient {
    /// Create a client whose HTTP timeout comes from `config`.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: config.http_client(),
            config,
        }
    }

    /// Create a client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http: client,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch every fixture on `date` across all leagues, one page at a time.
    #[instrument(skip(self))]
    pub async fn get_events_by_date(
        &self,
        date: NaiveDate,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::get_events_by_date(&self.http, &self.config.base_url, date).await?;
        paginate(matches, page, limit)
    }

    /// Fetch the current season of a league.
    #[instrument(skip(self))]
    pub async fn get_events_by_league(
        &self,
        league_id: &str,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::get_events_by_league(&self.http, &self.config.base_url, league_id)
                .await?;
        paginate(matches, page, limit)
    }

    /// Fetch the current season of the configured default league.
    pub async fn get_default_league_events(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        self.get_events_by_league(&self.config.default_league_id, page, limit)
            .await
    }

    /// Fetch upcoming fixtures of a team or league.
    #[instrument(skip(self))]
    pub async fn get_upcoming_events(
        &self,
        id: &str,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::get_next_events(&self.http, &self.config.base_url, id).await?;
        paginate(matches, page, limit)
    }

    /// Fetch recent results of a team or league.
    #[instrument(skip(self))]
    pub async fn get_past_events(
        &self,
        id: &str,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::get_last_events(&self.http, &self.config.base_url, id).await?;
        paginate(matches, page, limit)
    }

    /// Search fixtures by name, e.g. `"Arsenal_vs_Liverpool"`.
    #[instrument(skip(self))]
    pub async fn search_events(
        &self,
        query: &str,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::search_events(&self.http, &self.config.base_url, query).await?;
        paginate(matches, page, limit)
    }

    /// Fetch only the live and half-time fixtures on `date`.
    #[instrument(skip(self))]
    pub async fn get_live_matches(
        &self,
        date: NaiveDate,
        page: usize,
        limit: usize,
    ) -> Result<Paginated<Match>> {
        let matches =
            sportsdb::events::get_events_by_date(&self.http, &self.config.base_url, date).await?;
        paginate(live_only(matches), page, limit)
    }

    /// Fetch full details for a match, including lineups and its event timeline.
    #[instrument(skip(self))]
    pub async fn get_match_details(&self, event_id: &str) -> Result<MatchDetails> {
        sportsdb::match_detail::get_match_details(&self.http, &self.config.base_url, event_id)
            .await
    }

    /// Fetch every team of a league.
    #[instrument(skip(self))]
    pub async fn get_teams_by_league(&self, league_id: &str) -> Result<Vec<Team>> {
        sportsdb::catalog::get_teams_by_league(&self.http, &self.config.base_url, league_id).await
    }

    /// Fetch the global league catalog.
    #[instrument(skip(self))]
    pub async fn get_all_leagues(&self) -> Result<Vec<League>> {
        sportsdb::catalog::get_all_leagues(&self.http, &self.config.base_url).await
    }
}

impl Default for SportsDbClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl MatchSource for SportsDbClient {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<Match>> {
        sportsdb::events::get_events_by_date(&self.http, &self.config.base_url, date).await
    }
}

/// Keep the fixtures that are currently being played.
pub(crate) fn live_only(matches: Vec<Match>) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| m.status.is_in_play())
        .collect()
}
