use crate::domain::{
    Clip, GameDetails, ListingSource, Release, ReleaseWindow, Screenshot, UNKNOWN_PLATFORM,
};
use crate::error::{GameError, Result};
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

#[derive(Debug, Deserialize)]
pub struct RawgListResponse {
    pub results: Vec<RawgGameBasic>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawgGameBasic {
    pub id: u64,
    pub name: String,
    pub released: Option<String>,
    pub background_image: Option<String>,
    pub platforms: Option<Vec<RawgPlatform>>,
    pub genres: Option<Vec<RawgGenre>>,
}

#[derive(Debug, Deserialize)]
pub struct RawgGameDetailed {
    pub id: u64,
    pub name: String,
    pub background_image: Option<String>,
    pub clip: Option<RawgClip>,
    pub released: Option<String>,
    pub metacritic: Option<u64>,
    pub website: Option<String>,
    pub description_raw: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawgPlatform {
    pub platform: PlatformInfo,
}

#[derive(Debug, Deserialize)]
pub struct PlatformInfo {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawgGenre {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RawgClip {
    pub clip: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawgScreenshotsResponse {
    pub results: Vec<Screenshot>,
}

impl From<RawgGameBasic> for Release {
    fn from(game: RawgGameBasic) -> Self {
        let platform = match game.platforms {
            Some(platforms) if !platforms.is_empty() => platforms
                .into_iter()
                .map(|p| p.platform.name)
                .collect::<Vec<_>>()
                .join(", "),
            _ => UNKNOWN_PLATFORM.to_string(),
        };

        let release_date = game.released.as_deref().and_then(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| debug!("Unparseable release date {:?} for {}: {}", raw, game.id, e))
                .ok()
        });

        Release {
            id: game.id,
            title: game.name,
            release_date,
            platform,
            genres: game
                .genres
                .unwrap_or_default()
                .into_iter()
                .map(|g| g.name)
                .collect(),
            background_image: game.background_image,
        }
    }
}

impl RawgGameDetailed {
    fn with_screenshots(self, screenshots: Vec<Screenshot>) -> GameDetails {
        GameDetails {
            id: self.id,
            name: self.name,
            background_image: self.background_image,
            clip: self.clip.and_then(|c| c.clip).map(|clip| Clip { clip }),
            screenshots,
            released: self.released,
            metacritic: self.metacritic,
            website: self.website.filter(|w| !w.is_empty()),
            description_raw: self.description_raw.filter(|d| !d.is_empty()),
        }
    }
}

pub struct RawgClient {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
    max_pages: u32,
}

impl RawgClient {
    pub fn new(client: Client, api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: 40,
            max_pages: 1,
        }
    }

    pub fn with_paging(mut self, page_size: u32, max_pages: u32) -> Self {
        self.page_size = page_size;
        self.max_pages = max_pages.max(1);
        self
    }

    /// The settings a listing from this client depends on.
    pub fn listing_source(&self) -> ListingSource {
        ListingSource {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }

    async fn check_response(resource: &str, response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("RAWG API error ({}): Status {}", resource, status);
        debug!("Error body: {}", body);
        Err(GameError::Fetch {
            resource: resource.to_string(),
            status: status.as_u16(),
        })
    }

    /// Releases inside `window`, ordered by release date ascending.
    pub async fn list_upcoming_releases(&self, window: &ReleaseWindow) -> Result<Vec<Release>> {
        let list_url = format!("{}/games", self.base_url);
        let dates = window.to_query();
        let page_size = self.page_size.to_string();

        let response = self
            .client
            .get(&list_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("dates", dates.as_str()),
                ("ordering", "released"),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?;

        let mut page: RawgListResponse = Self::check_response("releases", response)
            .await?
            .json()
            .await?;
        let mut releases: Vec<Release> = page.results.drain(..).map(Release::from).collect();
        let mut pages = 1;

        while let Some(next) = page.next.take() {
            if pages >= self.max_pages {
                break;
            }

            sleep(Duration::from_millis(100)).await; // Rate limiting

            let response = self.client.get(&next).send().await?;
            page = Self::check_response("releases", response)
                .await?
                .json()
                .await?;
            releases.extend(page.results.drain(..).map(Release::from));
            pages += 1;
        }

        info!(
            "Fetched {} releases for {} ({} page(s))",
            releases.len(),
            dates,
            pages
        );
        Ok(releases)
    }

    /// Core detail record merged with its screenshot list.
    pub async fn get_game_details(&self, id: u64) -> Result<GameDetails> {
        info!("Fetching details for game ID: {}", id);

        let detail_url = format!("{}/games/{}", self.base_url, id);
        let response = self
            .client
            .get(&detail_url)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;
        let detailed: RawgGameDetailed = Self::check_response("details", response)
            .await?
            .json()
            .await?;

        let screenshots_url = format!("{}/games/{}/screenshots", self.base_url, id);
        let response = self
            .client
            .get(&screenshots_url)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;
        let screenshots: RawgScreenshotsResponse = Self::check_response("screenshots", response)
            .await?
            .json()
            .await?;

        Ok(detailed.with_screenshots(screenshots.results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn window() -> ReleaseWindow {
        ReleaseWindow::starting(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(), 90)
    }

    fn client(server: &MockServer) -> RawgClient {
        RawgClient::new(reqwest::Client::new(), "test-key".to_string(), server.uri())
    }

    #[tokio::test]
    async fn test_list_maps_catalog_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .and(query_param("key", "test-key"))
            .and(query_param("dates", "2026-10-18,2027-01-16"))
            .and(query_param("ordering", "released"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {
                        "id": 1,
                        "name": "Alpha",
                        "released": "2026-10-20",
                        "background_image": "https://img/alpha.jpg",
                        "platforms": [
                            {"platform": {"name": "PC"}},
                            {"platform": {"name": "Xbox"}}
                        ],
                        "genres": [{"name": "Action"}]
                    },
                    {
                        "id": 2,
                        "name": "Beta",
                        "released": null,
                        "background_image": null,
                        "platforms": null
                    }
                ],
                "next": null
            })))
            .mount(&server)
            .await;

        let releases = client(&server).list_upcoming_releases(&window()).await.unwrap();

        assert_eq!(
            releases,
            vec![
                Release {
                    id: 1,
                    title: "Alpha".to_string(),
                    release_date: NaiveDate::from_ymd_opt(2026, 10, 20),
                    platform: "PC, Xbox".to_string(),
                    genres: vec!["Action".to_string()],
                    background_image: Some("https://img/alpha.jpg".to_string()),
                },
                Release {
                    id: 2,
                    title: "Beta".to_string(),
                    release_date: None,
                    platform: "TBA".to_string(),
                    genres: vec![],
                    background_image: None,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_fails_on_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client(&server).list_upcoming_releases(&window()).await;

        assert!(matches!(
            result,
            Err(GameError::Fetch { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_list_follows_next_up_to_max_pages() {
        let server = MockServer::start().await;
        let next = format!("{}/games?page=2", server.uri());
        Mock::given(method("GET"))
            .and(path("/games"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 2, "name": "Beta", "released": "2026-11-01"}],
                "next": format!("{}/games?page=3", server.uri())
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games"))
            .and(query_param("ordering", "released"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"id": 1, "name": "Alpha", "released": "2026-10-20"}],
                "next": next
            })))
            .expect(1)
            .mount(&server)
            .await;

        let releases = client(&server)
            .with_paging(40, 2)
            .list_upcoming_releases(&window())
            .await
            .unwrap();

        let ids: Vec<u64> = releases.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_details_merge_screenshots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "name": "Alpha",
                "background_image": "https://img/alpha.jpg",
                "clip": {"clip": "https://media/alpha.mp4"},
                "released": "2026-10-20",
                "website": ""
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/42/screenshots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 1, "image": "https://img/s1.jpg"},
                    {"id": 2, "image": "https://img/s2.jpg"}
                ]
            })))
            .mount(&server)
            .await;

        let details = client(&server).get_game_details(42).await.unwrap();

        assert_eq!(details.name, "Alpha");
        assert_eq!(
            details.clip,
            Some(Clip {
                clip: "https://media/alpha.mp4".to_string()
            })
        );
        assert_eq!(details.screenshots.len(), 2);
        assert_eq!(details.screenshots[1].image, "https://img/s2.jpg");
        assert_eq!(details.website, None);
    }

    #[tokio::test]
    async fn test_details_null_clip_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Gamma",
                "background_image": null,
                "clip": {"clip": null}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/7/screenshots"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .mount(&server)
            .await;

        let details = client(&server).get_game_details(7).await.unwrap();

        assert_eq!(details.clip, None);
        assert!(details.screenshots.is_empty());
    }

    #[tokio::test]
    async fn test_details_fail_when_screenshots_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/games/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 42, "name": "Alpha"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/games/42/screenshots"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).get_game_details(42).await;

        match result {
            Err(GameError::Fetch { resource, status }) => {
                assert_eq!(resource, "screenshots");
                assert_eq!(status, 500);
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
