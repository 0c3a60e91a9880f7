//! Text and JSON rendering of releases, facets and details.

use crate::domain::{GameDetails, Release, ReleaseWindow, TrackedGames};
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

const CELL_WIDTH: usize = 6;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    PlayStation,
    Xbox,
    Pc,
    Nintendo,
    Other,
}

impl PlatformFamily {
    pub fn from_platform(platform: &str) -> Self {
        match platform {
            p if p.contains("PlayStation") => PlatformFamily::PlayStation,
            p if p.contains("Xbox") => PlatformFamily::Xbox,
            p if p.contains("PC") => PlatformFamily::Pc,
            p if p.contains("Nintendo") => PlatformFamily::Nintendo,
            _ => PlatformFamily::Other,
        }
    }

    /// Family of the first listed platform.
    pub fn of(release: &Release) -> Self {
        release
            .platforms()
            .next()
            .map(Self::from_platform)
            .unwrap_or(PlatformFamily::Other)
    }

    pub fn tag(self) -> &'static str {
        match self {
            PlatformFamily::PlayStation => "PS",
            PlatformFamily::Xbox => "XB",
            PlatformFamily::Pc => "PC",
            PlatformFamily::Nintendo => "NS",
            PlatformFamily::Other => "--",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReleasesResponse<'a> {
    pub releases: Vec<&'a Release>,
}

#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Releases grouped by day, undated ones last under "TBA".
pub fn render_agenda(releases: &[&Release], tracked: &TrackedGames) -> String {
    if releases.is_empty() {
        return "No upcoming releases.\n".to_string();
    }

    let mut by_day: BTreeMap<(bool, Option<NaiveDate>), Vec<&Release>> = BTreeMap::new();
    for &release in releases {
        by_day
            .entry((release.release_date.is_none(), release.release_date))
            .or_default()
            .push(release);
    }

    let mut out = String::new();
    for ((_, date), day_releases) in by_day {
        match date {
            Some(date) => out.push_str(&format!("{}\n", date.format("%a %Y-%m-%d"))),
            None => out.push_str("TBA\n"),
        }

        for release in day_releases {
            out.push_str(&format!(
                "  {} [{}] {} ({})",
                marker(tracked, release),
                PlatformFamily::of(release).tag(),
                release.title,
                release.platform
            ));
            if !release.genres.is_empty() {
                out.push_str(&format!(" - {}", release.genres.join(", ")));
            }
            out.push_str(&format!("  #{}\n", release.id));
            if let Some(image) = &release.background_image {
                out.push_str(&format!("      {}\n", image));
            }
        }
    }

    out
}

/// Monday-first weeks covering the window, listing the dated releases of each day.
pub fn render_week(window: &ReleaseWindow, releases: &[&Release], tracked: &TrackedGames) -> String {
    let mut by_day: BTreeMap<NaiveDate, Vec<&Release>> = BTreeMap::new();
    for &release in releases {
        if let Some(date) = release.release_date {
            by_day.entry(date).or_default().push(release);
        }
    }

    let mut out = String::new();
    let offset = u64::from(window.start.weekday().num_days_from_monday());
    let mut monday = window
        .start
        .checked_sub_days(Days::new(offset))
        .unwrap_or(window.start);

    while monday <= window.end {
        let Some(next_monday) = monday.checked_add_days(Days::new(7)) else {
            break;
        };

        out.push_str(&format!("Week of {}\n", monday.format("%a %Y-%m-%d")));
        let mut any = false;
        for (day, day_releases) in by_day.range(monday..next_monday) {
            for release in day_releases {
                any = true;
                out.push_str(&format!(
                    "  {} {} [{}] {}  #{}\n",
                    day.format("%a %d"),
                    marker(tracked, release),
                    PlatformFamily::of(release).tag(),
                    release.title,
                    release.id
                ));
            }
        }
        if !any {
            out.push_str("  No releases\n");
        }

        monday = next_monday;
    }

    let undated = releases.iter().filter(|r| r.release_date.is_none()).count();
    if undated > 0 {
        out.push_str(&format!("{} release(s) without a date\n", undated));
    }

    out
}

fn marker(tracked: &TrackedGames, release: &Release) -> char {
    if tracked.contains(release.id) {
        '★'
    } else {
        ' '
    }
}

/// One Monday-first month grid per month the window touches. A day with
/// releases shows `+count`, and `*` when any of them is tracked.
pub fn render_month(window: &ReleaseWindow, releases: &[&Release], tracked: &TrackedGames) -> String {
    let mut per_day: BTreeMap<NaiveDate, (usize, bool)> = BTreeMap::new();
    for release in releases {
        if let Some(date) = release.release_date {
            let entry = per_day.entry(date).or_default();
            entry.0 += 1;
            entry.1 |= tracked.contains(release.id);
        }
    }

    let mut out = String::new();
    let mut month_start = window.start.with_day(1).unwrap_or(window.start);

    while month_start <= window.end {
        let Some(next_month) = month_start.checked_add_months(Months::new(1)) else {
            break;
        };

        out.push_str(&format!("{}\n", month_start.format("%B %Y")));
        for day in WEEKDAYS {
            out.push_str(&format!("{:<width$}", day, width = CELL_WIDTH));
        }
        out.push('\n');

        let offset = month_start.weekday().num_days_from_monday() as usize;
        let mut column = offset;
        out.push_str(&" ".repeat(offset * CELL_WIDTH));

        let mut day = month_start;
        while day < next_month {
            let mut cell = format!("{:>2}", day.day());
            if let Some((count, any_tracked)) = per_day.get(&day) {
                cell.push_str(&format!("+{}", count));
                if *any_tracked {
                    cell.push('*');
                }
            }
            out.push_str(&format!("{:<width$}", cell, width = CELL_WIDTH));

            column += 1;
            if column == 7 {
                out.push('\n');
                column = 0;
            }
            day = day.succ_opt().unwrap_or(next_month);
        }
        if column != 0 {
            out.push('\n');
        }
        out.push('\n');

        month_start = next_month;
    }

    let undated = releases.iter().filter(|r| r.release_date.is_none()).count();
    if undated > 0 {
        out.push_str(&format!("{} release(s) without a date\n", undated));
    }

    out
}

pub fn render_details(details: &GameDetails) -> String {
    let mut out = format!("{}\n", details.name);

    match (&details.clip, &details.background_image) {
        (Some(clip), _) => out.push_str(&format!("Trailer: {}\n", clip.clip)),
        (None, Some(image)) => out.push_str(&format!("Image: {}\n", image)),
        (None, None) => {}
    }
    if let Some(released) = &details.released {
        out.push_str(&format!("Released: {}\n", released));
    }
    if let Some(metacritic) = details.metacritic {
        out.push_str(&format!("Metacritic: {}\n", metacritic));
    }
    if let Some(website) = &details.website {
        out.push_str(&format!("Website: {}\n", website));
    }
    if let Some(description) = &details.description_raw {
        out.push_str(&format!("\n{}\n", description.trim()));
    }

    if !details.screenshots.is_empty() {
        out.push_str("\nGallery:\n");
        for screenshot in &details.screenshots {
            out.push_str(&format!("  {}\n", screenshot.image));
        }
    }

    out
}

pub fn render_facets(facets: &FacetsResponse) -> String {
    format!(
        "Platforms: {}\nGenres: {}\n",
        facets.platforms.join(", "),
        facets.genres.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Clip, MemoryStore, Screenshot};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn release(id: u64, title: &str, day: Option<NaiveDate>, platform: &str) -> Release {
        Release {
            id,
            title: title.to_string(),
            release_date: day,
            platform: platform.to_string(),
            genres: vec!["Action".to_string()],
            background_image: None,
        }
    }

    fn tracked_with(ids: &[u64]) -> TrackedGames {
        let store = Arc::new(MemoryStore::default());
        *store.tracked.lock().unwrap() = Some(ids.to_vec());
        TrackedGames::load(store)
    }

    #[test]
    fn platform_family_uses_first_platform() {
        let r = release(1, "Alpha", None, "Xbox One, PlayStation 5");
        assert_eq!(PlatformFamily::of(&r), PlatformFamily::Xbox);
        assert_eq!(PlatformFamily::from_platform("Nintendo Switch").tag(), "NS");
        assert_eq!(PlatformFamily::from_platform("TBA"), PlatformFamily::Other);
    }

    #[test]
    fn agenda_groups_by_day_and_marks_tracked() {
        let alpha = release(1, "Alpha", Some(date(2026, 10, 20)), "PC, Xbox");
        let beta = release(2, "Beta", None, "PlayStation");
        let gamma = release(3, "Gamma", Some(date(2026, 10, 19)), "Nintendo Switch");
        let tracked = tracked_with(&[1]);

        let out = render_agenda(&[&alpha, &beta, &gamma], &tracked);

        assert_eq!(
            out,
            "Mon 2026-10-19\n\
             \u{20}   [NS] Gamma (Nintendo Switch) - Action  #3\n\
             Tue 2026-10-20\n\
             \u{20} ★ [PC] Alpha (PC, Xbox) - Action  #1\n\
             TBA\n\
             \u{20}   [PS] Beta (PlayStation) - Action  #2\n"
        );
    }

    #[test]
    fn agenda_shows_background_image() {
        let mut alpha = release(1, "Alpha", Some(date(2026, 10, 20)), "PC");
        alpha.background_image = Some("https://img/alpha.jpg".to_string());
        let tracked = tracked_with(&[]);

        let out = render_agenda(&[&alpha], &tracked);

        assert_eq!(
            out,
            "Tue 2026-10-20\n\
             \u{20}   [PC] Alpha (PC) - Action  #1\n\
             \u{20}     https://img/alpha.jpg\n"
        );
    }

    #[test]
    fn week_view_starts_on_monday_and_lists_days() {
        // October 18th 2026 is a Sunday.
        let window = ReleaseWindow::starting(date(2026, 10, 18), 10);
        let alpha = release(1, "Alpha", Some(date(2026, 10, 20)), "PC");
        let gamma = release(3, "Gamma", Some(date(2026, 10, 27)), "Nintendo Switch");
        let undated = release(4, "Delta", None, "PC");
        let tracked = tracked_with(&[1]);

        let out = render_week(&window, &[&alpha, &gamma, &undated], &tracked);

        assert_eq!(
            out,
            "Week of Mon 2026-10-12\n\
             \u{20} No releases\n\
             Week of Mon 2026-10-19\n\
             \u{20} Tue 20 ★ [PC] Alpha  #1\n\
             Week of Mon 2026-10-26\n\
             \u{20} Tue 27   [NS] Gamma  #3\n\
             1 release(s) without a date\n"
        );
    }

    #[test]
    fn agenda_of_nothing_says_so() {
        let tracked = tracked_with(&[]);
        assert_eq!(render_agenda(&[], &tracked), "No upcoming releases.\n");
    }

    #[test]
    fn month_grid_counts_releases() {
        let window = ReleaseWindow::starting(date(2026, 10, 18), 20);
        let alpha = release(1, "Alpha", Some(date(2026, 10, 20)), "PC");
        let beta = release(2, "Beta", Some(date(2026, 10, 20)), "PC");
        let gamma = release(3, "Gamma", Some(date(2026, 11, 2)), "PC");
        let tracked = tracked_with(&[2]);

        let out = render_month(&window, &[&alpha, &beta, &gamma], &tracked);

        assert!(out.starts_with("October 2026\nMon   Tue   Wed"));
        assert!(out.contains("November 2026"));
        assert!(out.contains("20+2* "));
        assert!(out.contains(" 2+1 "));
        assert!(!out.contains("December"));
    }

    #[test]
    fn month_grid_aligns_first_weekday() {
        // October 1st 2026 is a Thursday.
        let window = ReleaseWindow::starting(date(2026, 10, 1), 1);
        let tracked = tracked_with(&[]);

        let out = render_month(&window, &[], &tracked);
        let first_week = out.lines().nth(2).unwrap();

        assert_eq!(first_week, format!("{} 1     2     3     4    ", " ".repeat(18)));
    }

    #[test]
    fn details_prefer_trailer_over_image() {
        let details = GameDetails {
            id: 1,
            name: "Alpha".to_string(),
            background_image: Some("https://img/alpha.jpg".to_string()),
            clip: Some(Clip {
                clip: "https://media/alpha.mp4".to_string(),
            }),
            screenshots: vec![Screenshot {
                id: 5,
                image: "https://img/s5.jpg".to_string(),
            }],
            released: Some("2026-10-20".to_string()),
            metacritic: None,
            website: None,
            description_raw: None,
        };

        let out = render_details(&details);

        assert_eq!(
            out,
            "Alpha\nTrailer: https://media/alpha.mp4\nReleased: 2026-10-20\n\nGallery:\n  https://img/s5.jpg\n"
        );
    }

    #[test]
    fn error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "API key is missing".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"error": "API key is missing"}));
    }
}
