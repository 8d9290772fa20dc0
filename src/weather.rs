use reqwest::{Client, StatusCode};

use crate::config::WeatherConfig;
use crate::error::Result;
use crate::webhook::{self, Embed};

/// Post one weather embed per configured city. Nothing is fetched here: the
/// embed links the wttr.in rendered image and the chat client dereferences it.
pub async fn send_weather(
    client: &Client,
    webhook_url: &str,
    cfg: &WeatherConfig,
) -> Result<Vec<StatusCode>> {
    let mut codes = Vec::with_capacity(cfg.cities.len());
    for city in &cfg.cities {
        let embed = city_embed(&cfg.base_url, city);
        codes.push(webhook::post_embeds(client, webhook_url, vec![embed]).await?);
    }
    Ok(codes)
}

fn city_embed(base_url: &str, city: &str) -> Embed {
    Embed::titled("Bonjour, c'est la météo")
        .url(format!("{base_url}/{city}.png?qp1m"))
        .image(format!("{base_url}/{city}.png?qp1m&lang=fr"))
}
