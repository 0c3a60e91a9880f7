use crate::domain::storage::Storage;
use crate::domain::{CachedReleases, GameDetails, ListingSource, Release, ReleaseWindow};
use crate::error::Result;
use crate::infrastructure::RawgClient;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct ReleaseService {
    rawg_client: RawgClient,
    store: Arc<dyn Storage>,
    window_days: u32,
    skip_cache: bool,
    cache_ttl: Duration,
    show_progress: bool,
}

impl ReleaseService {
    pub fn new(
        rawg_client: RawgClient,
        store: Arc<dyn Storage + 'static>,
        window_days: u32,
        skip_cache: bool,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            rawg_client,
            store,
            window_days,
            skip_cache,
            cache_ttl,
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while the catalog is being queried.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn window_for(&self, today: NaiveDate) -> ReleaseWindow {
        ReleaseWindow::starting(today, self.window_days)
    }

    /// Upcoming releases for the window starting at `now`'s date.
    ///
    /// A listing cached for the same window and catalog settings within the
    /// TTL is reused unless `skip_cache` is set. Catalog failures are logged and produce an empty
    /// list; they are never cached.
    pub async fn upcoming_releases(&self, now: DateTime<Utc>) -> Vec<Release> {
        let window = self.window_for(now.date_naive());
        let source = self.rawg_client.listing_source();

        if !self.skip_cache {
            if let Some(cached) = self.cached_releases(&window, &source, now) {
                info!("Using cached release listing for {}", window.to_query());
                return cached;
            }
        }

        let spinner = self.spinner("Fetching upcoming releases");
        let fetched = self.rawg_client.list_upcoming_releases(&window).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        match fetched {
            Ok(releases) => {
                let cache = CachedReleases {
                    window,
                    source,
                    fetched_at: now,
                    releases,
                };
                if let Err(e) = self.store.save_release_cache(&cache) {
                    warn!("Failed to cache release listing: {}", e);
                }
                cache.releases
            }
            Err(e) => {
                error!("Failed to fetch game releases from RAWG: {}", e);
                Vec::new()
            }
        }
    }

    /// Details for one release, always fetched fresh.
    pub async fn game_details(&self, id: u64) -> Result<GameDetails> {
        let spinner = self.spinner("Fetching game details");
        let details = self.rawg_client.get_game_details(id).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        details.map_err(|e| {
            error!("Failed to fetch details for game {}: {}", id, e);
            e
        })
    }

    fn cached_releases(
        &self,
        window: &ReleaseWindow,
        source: &ListingSource,
        now: DateTime<Utc>,
    ) -> Option<Vec<Release>> {
        match self.store.load_release_cache() {
            Ok(Some(cached)) if cached.is_fresh_for(window, source, now, self.cache_ttl) => {
                Some(cached.releases)
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable release cache: {}", e);
                None
            }
        }
    }

    fn spinner(&self, message: &'static str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(pb)
    }
}
