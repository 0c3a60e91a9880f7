use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Platform label used when the catalog lists no platforms for a release.
pub const UNKNOWN_PLATFORM: &str = "TBA";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: u64,
    pub title: String,
    pub release_date: Option<NaiveDate>,
    /// Comma-joined platform names, or [`UNKNOWN_PLATFORM`].
    pub platform: String,
    pub genres: Vec<String>,
    pub background_image: Option<String>,
}

impl Release {
    /// Individual platform names, in catalog order.
    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.platform
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Closed date range the release listing is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReleaseWindow {
    pub fn starting(today: NaiveDate, days: u32) -> Self {
        let end = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start: today, end }
    }

    /// Value of the catalog's `dates` query parameter.
    pub fn to_query(&self) -> String {
        format!(
            "{},{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub clip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDetails {
    pub id: u64,
    pub name: String,
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip: Option<Clip>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_raw: Option<String>,
}

/// Catalog settings that decide what a listing request returns, besides its window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSource {
    pub base_url: String,
    pub page_size: u32,
    pub max_pages: u32,
}

/// A release listing as stored in the cache directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedReleases {
    pub window: ReleaseWindow,
    pub source: ListingSource,
    pub fetched_at: DateTime<Utc>,
    pub releases: Vec<Release>,
}

impl CachedReleases {
    /// Reusable only for the same window and source, and only within `ttl`.
    pub fn is_fresh_for(
        &self,
        window: &ReleaseWindow,
        source: &ListingSource,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> bool {
        self.window == *window && self.source == *source && now - self.fetched_at < ttl
    }
}
