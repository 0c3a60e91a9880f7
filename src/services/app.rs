use crate::config::cli::{CalendarView, Command, FilterArgs};
use crate::config::Config;
use crate::domain::storage::Storage;
use crate::domain::{
    filter_releases, genre_options, platform_options, FilterState, Release, TrackedGames,
};
use crate::error::{GameError, Result};
use crate::infrastructure::{FileSystemStore, RawgClient};
use crate::services::calendar::{
    render_agenda, render_details, render_facets, render_month, render_week, FacetsResponse,
    ReleasesResponse,
};
use crate::services::releases::ReleaseService;
use chrono::{DateTime, Utc};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;

/// Runs one CLI command and returns what should be printed on stdout.
pub struct App {
    config: Config,
    store: Arc<dyn Storage>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn Storage> = Arc::new(FileSystemStore::new(
            &config.args.data_dir,
            &config.args.cache_dir,
        ));
        Self { config, store }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        self.config.ensure_directories()
    }

    pub fn command(&self) -> &Command {
        &self.config.args.command
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<String> {
        match self.command() {
            Command::Releases {
                filters,
                tracked_only,
                json,
            } => self.releases(filters, *tracked_only, *json, now).await,
            Command::Calendar { filters, view } => self.calendar(filters, *view, now).await,
            Command::Facets { json } => self.facets(*json, now).await,
            Command::Details { id, json } => self.details(*id, *json).await,
            Command::Track { id } => self.track(*id),
            Command::Tracked { json } => self.tracked(*json),
        }
    }

    fn release_service(&self) -> Result<ReleaseService> {
        let args = &self.config.args;
        let rawg_client = RawgClient::new(
            self.config.http_client.clone(),
            self.config.rawg_api_key()?.to_string(),
            args.rawg_base_url.as_str(),
        )
        .with_paging(args.page_size, args.max_pages);

        Ok(ReleaseService::new(
            rawg_client,
            self.store.clone(),
            args.days,
            args.skip_cache,
            self.config.cache_ttl(),
        )
        .with_progress(std::io::stderr().is_terminal()))
    }

    async fn releases(
        &self,
        filters: &FilterArgs,
        tracked_only: bool,
        json: bool,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let releases = self.release_service()?.upcoming_releases(now).await;
        let tracked = TrackedGames::load(self.store.clone());
        let state = FilterState::from(filters.clone());
        if !state.is_neutral() {
            info!(
                "Applying filters: search={:?} platform={} genre={}",
                state.search_query, state.platform, state.genre
            );
        }

        let mut visible = filter_releases(&releases, &state);
        if tracked_only {
            visible.retain(|r| tracked.contains(r.id));
        }
        info!("Showing {} of {} releases", visible.len(), releases.len());

        if json {
            return Ok(serde_json::to_string_pretty(&ReleasesResponse {
                releases: visible,
            })?);
        }
        Ok(render_agenda(&visible, &tracked))
    }

    async fn calendar(
        &self,
        filters: &FilterArgs,
        view: CalendarView,
        now: DateTime<Utc>,
    ) -> Result<String> {
        let service = self.release_service()?;
        let releases = service.upcoming_releases(now).await;
        let tracked = TrackedGames::load(self.store.clone());
        let visible: Vec<&Release> = filter_releases(&releases, &FilterState::from(filters.clone()));
        let window = service.window_for(now.date_naive());

        Ok(match view {
            CalendarView::Agenda => render_agenda(&visible, &tracked),
            CalendarView::Week => render_week(&window, &visible, &tracked),
            CalendarView::Month => render_month(&window, &visible, &tracked),
        })
    }

    async fn facets(&self, json: bool, now: DateTime<Utc>) -> Result<String> {
        let releases = self.release_service()?.upcoming_releases(now).await;
        let facets = FacetsResponse {
            platforms: platform_options(&releases),
            genres: genre_options(&releases),
        };

        if json {
            return Ok(serde_json::to_string_pretty(&facets)?);
        }
        Ok(render_facets(&facets))
    }

    async fn details(&self, id: u64, json: bool) -> Result<String> {
        let details = self
            .release_service()?
            .game_details(id)
            .await
            .map_err(|_| GameError::Other(format!("Failed to fetch details for game {}", id)))?;

        if json {
            return Ok(serde_json::to_string_pretty(&details)?);
        }
        Ok(render_details(&details))
    }

    fn track(&self, id: u64) -> Result<String> {
        let mut tracked = TrackedGames::load(self.store.clone());
        let now_tracked = tracked.toggle(id)?;
        info!("Game {} tracked: {}", id, now_tracked);

        Ok(if now_tracked {
            format!("Now tracking {}\n", id)
        } else {
            format!("Stopped tracking {}\n", id)
        })
    }

    fn tracked(&self, json: bool) -> Result<String> {
        let ids = TrackedGames::load(self.store.clone()).ids();
        if json {
            return Ok(serde_json::to_string(&ids)?);
        }
        if ids.is_empty() {
            return Ok("No tracked games.\n".to_string());
        }
        Ok(ids.iter().map(|id| format!("{}\n", id)).collect())
    }
}
