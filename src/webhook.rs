use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::error::{DigestError, Result};

/// One structured message block in a Discord-compatible webhook payload.
#[derive(Debug, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

impl Embed {
    pub fn titled(title: impl Into<String>) -> Self {
        Embed {
            title: Some(title.into()),
            description: None,
            url: None,
            image: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(EmbedImage { url: url.into() });
        self
    }
}

#[derive(Serialize)]
struct WebhookPayload {
    content: String,
    embeds: Vec<Embed>,
}

/// POST embeds to the webhook. Discord answers 204 No Content on success;
/// the status code is returned so callers can log it.
pub async fn post_embeds(
    client: &Client,
    webhook_url: &str,
    embeds: Vec<Embed>,
) -> Result<StatusCode> {
    let payload = WebhookPayload {
        content: String::new(),
        embeds,
    };

    let res = client.post(webhook_url).json(&payload).send().await?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(DigestError::Webhook { status, body });
    }

    Ok(res.status())
}

/// Ad-hoc announcement: caller-supplied text, link and image.
pub async fn post_info(
    client: &Client,
    webhook_url: &str,
    info: &str,
    info_url: &str,
    image_url: &str,
) -> Result<StatusCode> {
    let embed = Embed::titled("Bonjour, c'est une info")
        .description(info)
        .url(info_url)
        .image(image_url);
    post_embeds(client, webhook_url, vec![embed]).await
}
