use reqwest::Client;
use serde_json::Value;

use crate::error::{DigestError, Result};

/// Translate `text` via the public `translate_a/single` endpoint (the
/// `client=gtx` JSON shape: a nested array whose first element lists
/// translated segments).
pub async fn translate(
    client: &Client,
    base_url: &str,
    text: &str,
    source: &str,
    target: &str,
) -> Result<String> {
    let res = client
        .get(format!("{base_url}/translate_a/single"))
        .query(&[
            ("client", "gtx"),
            ("sl", source),
            ("tl", target),
            ("dt", "t"),
            ("q", text),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DigestError::from_response("translate", res).await);
    }

    let body: Value = res.json().await?;
    join_segments(&body).ok_or(DigestError::Scrape {
        what: "translated segments",
    })
}

fn join_segments(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment.get(0)?.as_str()?);
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn concatenates_segment_translations() {
        let body = json!([
            [
                ["Le miel ne se périme jamais. ", "Honey never spoils. ", null],
                ["Vraiment jamais.", "Really never.", null]
            ],
            null,
            "en"
        ]);
        assert_eq!(
            join_segments(&body).as_deref(),
            Some("Le miel ne se périme jamais. Vraiment jamais.")
        );
    }

    #[test]
    fn malformed_body_yields_none() {
        assert!(join_segments(&json!({"error": true})).is_none());
        assert!(join_segments(&json!([[]])).is_none());
    }

    #[tokio::test]
    async fn sends_the_gtx_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "en"))
            .and(query_param("tl", "fr"))
            .and(query_param("q", "Honey never spoils."))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["Le miel ne se périme jamais.", "Honey never spoils.", null]],
                null,
                "en"
            ])))
            .mount(&server)
            .await;

        let out = translate(
            &Client::new(),
            &server.uri(),
            "Honey never spoils.",
            "en",
            "fr",
        )
        .await
        .unwrap();
        assert_eq!(out, "Le miel ne se périme jamais.");
    }
}
