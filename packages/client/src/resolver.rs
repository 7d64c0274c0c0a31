//! City resolution via a geolocation-by-IP text endpoint.

use crate::ClientError;

/// Resolves the caller's current city.
///
/// Issues a GET to `url`, reads the whole body as UTF-8 text and strips
/// leading and trailing whitespace. The result is not validated.
///
/// # Errors
///
/// Returns [`ClientError`] if the request fails, times out, or the
/// endpoint answers with a non-success status.
pub async fn resolve_city(client: &reqwest::Client, url: &str) -> Result<String, ClientError> {
    let resp = client.get(url).send().await?;

    if !resp.status().is_success() {
        return Err(ClientError::Status {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }

    let city = resp.text().await?.trim().to_string();
    log::debug!("Resolved city: {city:?}");
    Ok(city)
}
