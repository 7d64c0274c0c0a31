//! Safety check backend call.

use city_safety_server_models::SafetyCheckRequest;
use serde::de::IgnoredAny;

use crate::ClientError;

/// Posts `{ "city": city }` to the backend and returns the response body.
///
/// The body must be JSON but is returned as the exact text the backend
/// sent, so key order and number formatting survive the trip to the
/// results route.
///
/// # Errors
///
/// Returns [`ClientError`] if the request fails, the backend answers with
/// a non-success status, or the body is not JSON.
pub async fn post_city(
    client: &reqwest::Client,
    url: &str,
    city: &str,
) -> Result<String, ClientError> {
    let resp = client
        .post(url)
        .json(&SafetyCheckRequest {
            city: city.to_string(),
        })
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        log::warn!("Safety check for {city:?} rejected with HTTP {status}");
        return Err(ClientError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let text = resp.text().await?;
    serde_json::from_str::<IgnoredAny>(&text)?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn posts_city_as_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/safety-check")
                    .header("content-type", "application/json")
                    .json_body(json!({ "city": "Utrecht" }));
                then.status(200).json_body(json!({ "city": "Utrecht" }));
            })
            .await;

        let client = reqwest::Client::new();
        let body = post_city(&client, &server.url("/safety-check"), "Utrecht")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&body).unwrap(),
            json!({ "city": "Utrecht" })
        );
    }

    #[tokio::test]
    async fn non_success_status_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/safety-check");
                then.status(400)
                    .json_body(json!({ "error": "City parameter is required!" }));
            })
            .await;

        let client = reqwest::Client::new();
        let err = post_city(&client, &server.url("/safety-check"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_a_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/safety-check");
                then.status(200).body("<html>oops</html>");
            })
            .await;

        let client = reqwest::Client::new();
        let err = post_city(&client, &server.url("/safety-check"), "Delft")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Json(_)));
    }

    #[tokio::test]
    async fn body_is_returned_verbatim() {
        let body = r#"{"status":"success","city":"Amsterdam","score":1.0}"#;
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/safety-check");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(body);
            })
            .await;

        let client = reqwest::Client::new();
        let text = post_city(&client, &server.url("/safety-check"), "Amsterdam")
            .await
            .unwrap();

        assert_eq!(text, body);
    }
}
