use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::JokeConfig;
use crate::error::{DigestError, Result};
use crate::webhook::{self, Embed};

#[derive(Debug, Deserialize)]
struct JokeResponse {
    joke: String,
    answer: String,
}

/// Fetch a random joke (blagues-api.fr schema) and post it as an embed.
pub async fn send_joke(
    client: &Client,
    webhook_url: &str,
    token: &str,
    cfg: &JokeConfig,
) -> Result<StatusCode> {
    let joke = fetch_joke(client, token, cfg).await?;
    let embed = Embed::titled("Bonjour, c'est la blague")
        .description(format!("{} {}", joke.joke, joke.answer));
    webhook::post_embeds(client, webhook_url, vec![embed]).await
}

async fn fetch_joke(client: &Client, token: &str, cfg: &JokeConfig) -> Result<JokeResponse> {
    let res = client
        .get(format!("{}/api/type/{}/random", cfg.base_url, cfg.kind))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DigestError::from_response("joke api", res).await);
    }

    Ok(res.json().await?)
}
