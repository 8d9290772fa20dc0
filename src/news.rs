use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::NewsConfig;
use crate::error::{DigestError, Result};
use crate::webhook::{self, Embed};

const NEWS_INFO_URL: &str = "https://rapidapi.com/ubillarnet/api/google-news1/details";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
    link: String,
}

/// Fetch the topic headlines and post them: one header embed whose title
/// depends on the time of day, then one embed per article. Returns the
/// status code of every post, header first.
pub async fn send_news(
    client: &Client,
    webhook_url: &str,
    api_key: &str,
    hour: u32,
    cfg: &NewsConfig,
) -> Result<Vec<StatusCode>> {
    let news = fetch_headlines(client, api_key, cfg).await?;

    let mut codes = Vec::with_capacity(news.articles.len() + 1);

    let header = Embed::titled(format!("Bonjour, c'est les actus {}", time_of_day(hour)))
        .description(format!(
            "Les {} dernières actualités tech. du moment.",
            cfg.limit
        ))
        .url(NEWS_INFO_URL);
    codes.push(webhook::post_embeds(client, webhook_url, vec![header]).await?);

    for article in news.articles {
        let embed = Embed::titled(article.title).url(article.link);
        codes.push(webhook::post_embeds(client, webhook_url, vec![embed]).await?);
    }

    Ok(codes)
}

async fn fetch_headlines(client: &Client, api_key: &str, cfg: &NewsConfig) -> Result<NewsResponse> {
    let res = client
        .get(format!("{}/topic-headlines", cfg.base_url))
        .header("X-RapidAPI-Key", api_key)
        .header("X-RapidAPI-Host", &cfg.api_host)
        .query(&[
            ("topic", cfg.topic.as_str()),
            ("country", cfg.country.as_str()),
            ("lang", cfg.lang.as_str()),
            ("limit", &cfg.limit.to_string()),
        ])
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DigestError::from_response("news api", res).await);
    }

    Ok(res.json().await?)
}

fn time_of_day(hour: u32) -> &'static str {
    match hour {
        8 => "du matin!",
        13 => "de l'après-midi!",
        18 => "du soir!",
        _ => "du jour!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(base: &str) -> NewsConfig {
        NewsConfig {
            base_url: base.to_string(),
            ..NewsConfig::default()
        }
    }

    #[test]
    fn header_title_follows_the_trigger_hour() {
        assert_eq!(time_of_day(8), "du matin!");
        assert_eq!(time_of_day(13), "de l'après-midi!");
        assert_eq!(time_of_day(18), "du soir!");
        assert_eq!(time_of_day(11), "du jour!");
    }

    #[tokio::test]
    async fn sends_rapidapi_headers_and_topic_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/topic-headlines"))
            .and(header("X-RapidAPI-Key", "k3y"))
            .and(header("X-RapidAPI-Host", "google-news1.p.rapidapi.com"))
            .and(query_param("topic", "TECHNOLOGY"))
            .and(query_param("country", "FR"))
            .and(query_param("lang", "fr"))
            .and(query_param("limit", "5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"articles": []})),
            )
            .mount(&server)
            .await;

        let news = fetch_headlines(&Client::new(), "k3y", &cfg(&server.uri()))
            .await
            .unwrap();
        assert!(news.articles.is_empty());
    }

    #[tokio::test]
    async fn posts_header_then_one_embed_per_article() {
        let api = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "articles": [
                    {"title": "Un", "link": "https://news.example/1"},
                    {"title": "Deux", "link": "https://news.example/2"}
                ]
            })))
            .mount(&api)
            .await;

        let hook = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "embeds": [{"title": "Bonjour, c'est les actus du matin!"}]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&hook)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&hook)
            .await;

        let codes = send_news(&Client::new(), &hook.uri(), "k", 8, &cfg(&api.uri()))
            .await
            .unwrap();
        assert_eq!(codes, vec![StatusCode::NO_CONTENT; 3]);
    }
}
