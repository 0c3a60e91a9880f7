mod filter;
mod release;
pub(crate) mod storage;
mod tracking;

pub use filter::{filter_releases, genre_options, platform_options, FacetFilter, FilterState};
pub use release::{
    CachedReleases, Clip, GameDetails, ListingSource, Release, ReleaseWindow, Screenshot, UNKNOWN_PLATFORM,
};
pub use tracking::TrackedGames;

#[cfg(test)]
pub(crate) use tracking::tests::MemoryStore;
