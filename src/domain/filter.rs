//! Release filtering and facet derivation.
//!
//! Everything here is a pure function of the release list and the filter
//! inputs. Facet options are always derived from the unfiltered list so that
//! picking one filter never hides the options of another.

use super::Release;
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel option meaning "do not filter on this facet".
pub const ALL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetFilter {
    #[default]
    All,
    Only(String),
}

impl FacetFilter {
    pub fn is_all(&self) -> bool {
        matches!(self, FacetFilter::All)
    }
}

impl FromStr for FacetFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL {
            FacetFilter::All
        } else {
            FacetFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for FacetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetFilter::All => f.write_str(ALL),
            FacetFilter::Only(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub platform: FacetFilter,
    pub genre: FacetFilter,
}

impl FilterState {
    pub fn new(search_query: impl Into<String>, platform: FacetFilter, genre: FacetFilter) -> Self {
        Self {
            search_query: search_query.into(),
            platform,
            genre,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.search_query.is_empty() && self.platform.is_all() && self.genre.is_all()
    }

    pub fn matches(&self, release: &Release) -> bool {
        let platform_match = match &self.platform {
            FacetFilter::All => true,
            FacetFilter::Only(platform) => release.platform.contains(platform.as_str()),
        };
        let genre_match = match &self.genre {
            FacetFilter::All => true,
            FacetFilter::Only(genre) => release.genres.iter().any(|g| g == genre),
        };
        let search_match = self.search_query.is_empty()
            || release
                .title
                .to_lowercase()
                .contains(&self.search_query.to_lowercase());

        platform_match && genre_match && search_match
    }
}

/// Releases matching `state`, in their original order.
pub fn filter_releases<'a>(releases: &'a [Release], state: &FilterState) -> Vec<&'a Release> {
    releases.iter().filter(|r| state.matches(r)).collect()
}

/// `"All"` followed by every distinct platform name, sorted.
pub fn platform_options(releases: &[Release]) -> Vec<String> {
    with_all(releases.iter().flat_map(Release::platforms))
}

/// `"All"` followed by every distinct genre, sorted.
pub fn genre_options(releases: &[Release]) -> Vec<String> {
    with_all(
        releases
            .iter()
            .flat_map(|r| r.genres.iter().map(String::as_str)),
    )
}

fn with_all<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = names.collect();
    std::iter::once(ALL)
        .chain(unique)
        .map(str::to_string)
        .collect()
}
