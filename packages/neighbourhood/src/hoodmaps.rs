//! Hoodmaps neighbourhood map client.
//!
//! Each city page carries an `<em>` block of the form
//! `"{City} Neighborhood Map: Name: keywords, Name: keywords, ..."`
//! summarising what people tagged every neighbourhood with.
//!
//! See <https://hoodmaps.com>

use std::time::Duration;

use city_safety_neighbourhood_models::NeighbourhoodDescription;
use scraper::{Html, Selector};

use crate::NeighbourhoodError;

/// Public hoodmaps instance.
pub const DEFAULT_BASE_URL: &str = "https://hoodmaps.com";

/// The site rejects requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// Builds an HTTP client suitable for hoodmaps requests, with a
/// per-request `timeout`.
///
/// # Errors
///
/// Returns [`NeighbourhoodError`] if the client cannot be constructed.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, NeighbourhoodError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Returns the neighbourhood map URL for `city`.
///
/// The city is lower-cased and inner whitespace becomes `-`
/// (`"New York"` → `.../new-york-neighborhood-map`).
#[must_use]
pub fn neighbourhood_map_url(base_url: &str, city: &str) -> String {
    let slug = city
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("{}/{slug}-neighborhood-map", base_url.trim_end_matches('/'))
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize_city(city: &str) -> String {
    let mut chars = city.trim().chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Extracts neighbourhood descriptions from a hoodmaps city page.
///
/// Returns an empty list when the page has no neighbourhood map block.
/// Entries without a `name: description` separator are skipped.
#[must_use]
pub fn parse_neighbourhood_map(html: &str, city: &str) -> Vec<NeighbourhoodDescription> {
    let prefix = format!("{} Neighborhood Map:", capitalize_city(city)).to_lowercase();
    let document = Html::parse_document(html);
    let em_sel = Selector::parse("em").unwrap_or_else(|_| unreachable!());

    let payload = document.select(&em_sel).find_map(|el| {
        let text = el.text().collect::<String>();
        let text = text.trim();
        // Lower-casing can change byte lengths, so compare char by char.
        let prefix_len = prefix.chars().count();
        let head: String = text.chars().take(prefix_len).collect();
        if head.to_lowercase() == prefix {
            Some(text.chars().skip(prefix_len).collect::<String>())
        } else {
            None
        }
    });

    let Some(payload) = payload else {
        log::warn!("No neighbourhood map block found for {city}");
        return Vec::new();
    };

    payload
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let (name, description) = entry.split_once(':')?;
            Some(NeighbourhoodDescription {
                neighbourhood: name.trim().to_string(),
                description: description.trim().to_string(),
            })
        })
        .collect()
}

/// Fetches and parses the neighbourhood map for `city`.
///
/// # Errors
///
/// Returns [`NeighbourhoodError`] if the request fails or the site
/// answers with a non-success status.
pub async fn fetch_neighbourhoods(
    client: &reqwest::Client,
    base_url: &str,
    city: &str,
) -> Result<Vec<NeighbourhoodDescription>, NeighbourhoodError> {
    let url = neighbourhood_map_url(base_url, city);
    log::debug!("Fetching neighbourhood map from {url}");

    let resp = client.get(&url).send().await?;
    if !resp.status().is_success() {
        return Err(NeighbourhoodError::Status {
            url,
            status: resp.status().as_u16(),
        });
    }

    let html = resp.text().await?;
    let neighbourhoods = parse_neighbourhood_map(&html, city);
    log::info!(
        "Found {} neighbourhood(s) for {city}",
        neighbourhoods.len()
    );
    Ok(neighbourhoods)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <p>Intro</p>
        <em class="summary">Amsterdam Neighborhood Map: De Pijp: hipsters, Jordaan: rich,
            , Centrum: tourists: stoned, Noord</em>
        </body></html>"#;

    #[test]
    fn parses_neighbourhood_entries() {
        let hoods = parse_neighbourhood_map(PAGE, "amsterdam");

        assert_eq!(hoods.len(), 3);
        assert_eq!(hoods[0].neighbourhood, "De Pijp");
        assert_eq!(hoods[0].description, "hipsters");
        assert_eq!(hoods[1].neighbourhood, "Jordaan");
        assert_eq!(hoods[2].description, "tourists: stoned");
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let page = "<em>AMSTERDAM NEIGHBORHOOD MAP: Oost: families</em>";
        let hoods = parse_neighbourhood_map(page, "Amsterdam");
        assert_eq!(hoods.len(), 1);
        assert_eq!(hoods[0].neighbourhood, "Oost");
    }

    #[test]
    fn missing_block_is_empty() {
        assert!(parse_neighbourhood_map("<em>Something else</em>", "amsterdam").is_empty());
        assert!(parse_neighbourhood_map(PAGE, "rotterdam").is_empty());
    }

    #[test]
    fn builds_slugged_url() {
        assert_eq!(
            neighbourhood_map_url("https://hoodmaps.com/", "New York"),
            "https://hoodmaps.com/new-york-neighborhood-map"
        );
    }

    #[test]
    fn capitalizes_like_a_title() {
        assert_eq!(capitalize_city("aMSTERDAM"), "Amsterdam");
        assert_eq!(capitalize_city(""), "");
    }

    #[tokio::test]
    async fn fetches_from_server() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET)
                    .path("/amsterdam-neighborhood-map");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(PAGE);
            })
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let hoods = fetch_neighbourhoods(&client, &server.base_url(), "Amsterdam")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hoods.len(), 3);
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET);
                then.status(404);
            })
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let err = fetch_neighbourhoods(&client, &server.base_url(), "Atlantis")
            .await
            .unwrap_err();

        assert!(matches!(err, NeighbourhoodError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn slow_site_times_out() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET);
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .body(PAGE);
            })
            .await;

        let client = build_client(Duration::from_millis(100)).unwrap();
        let err = fetch_neighbourhoods(&client, &server.base_url(), "Amsterdam")
            .await
            .unwrap_err();

        assert!(matches!(err, NeighbourhoodError::Http(ref e) if e.is_timeout()));
    }
}
