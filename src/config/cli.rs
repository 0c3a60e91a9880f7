use crate::domain::{FacetFilter, FilterState};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the tracked games file
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for caching the release listing
    #[arg(long, global = true, default_value = "cache")]
    pub cache_dir: PathBuf,

    /// RAWG API key for the release catalog
    #[arg(long, global = true, env = "RAWG_API_KEY", hide_env_values = true)]
    pub rawg_api_key: Option<String>,

    /// Base URL of the RAWG API
    #[arg(
        long,
        global = true,
        env = "RAWG_BASE_URL",
        default_value = crate::infrastructure::DEFAULT_BASE_URL
    )]
    pub rawg_base_url: String,

    /// Skip using cached data
    #[arg(long, global = true)]
    pub skip_cache: bool,

    /// Number of days ahead of today to list releases for
    #[arg(long, global = true, default_value_t = 90)]
    pub days: u32,

    /// Results requested per catalog page (RAWG allows at most 40)
    #[arg(long, global = true, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub page_size: u32,

    /// Maximum number of catalog pages to follow
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List upcoming releases
    Releases {
        #[command(flatten)]
        filters: FilterArgs,

        /// Only show tracked releases
        #[arg(long)]
        tracked_only: bool,

        /// Print `{"releases": [...]}` instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show upcoming releases on a calendar
    Calendar {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum, default_value_t = CalendarView::Agenda)]
        view: CalendarView,
    },
    /// List the platform and genre filter options
    Facets {
        #[arg(long)]
        json: bool,
    },
    /// Show trailer, screenshots and details for one release
    Details {
        id: u64,

        #[arg(long)]
        json: bool,
    },
    /// Toggle tracking for a release
    Track { id: u64 },
    /// List tracked release ids
    Tracked {
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Case-insensitive title search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Platform name, or "All"
    #[arg(long, default_value = "All")]
    pub platform: FacetFilter,

    /// Genre name, or "All"
    #[arg(long, default_value = "All")]
    pub genre: FacetFilter,
}

impl From<FilterArgs> for FilterState {
    fn from(args: FilterArgs) -> Self {
        FilterState::new(args.search, args.platform, args.genre)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarView {
    Agenda,
    Week,
    Month,
}

impl Command {
    pub fn wants_json(&self) -> bool {
        match self {
            Command::Releases { json, .. }
            | Command::Facets { json }
            | Command::Details { json, .. }
            | Command::Tracked { json } => *json,
            Command::Calendar { .. } | Command::Track { .. } => false,
        }
    }
}
