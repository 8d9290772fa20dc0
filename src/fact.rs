use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use tracing::warn;

use crate::config::FactConfig;
use crate::error::{DigestError, Result};
use crate::translate;
use crate::webhook::{self, Embed};

/// Fetch the random-fact page, extract the fact, translate it and post it.
/// If the translation endpoint fails the untranslated fact is posted instead.
pub async fn send_fact(
    client: &Client,
    webhook_url: &str,
    cfg: &FactConfig,
) -> Result<StatusCode> {
    let fact = fetch_fact(client, cfg).await?;

    let text = match translate::translate(
        client,
        &cfg.translate_base_url,
        &fact,
        "en",
        &cfg.language,
    )
    .await
    {
        Ok(translated) => translated,
        Err(e) => {
            warn!("translation failed, posting the original text: {e}");
            fact
        }
    };

    let embed = Embed::titled("Bonjour, c'est le fact").description(text);
    webhook::post_embeds(client, webhook_url, vec![embed]).await
}

async fn fetch_fact(client: &Client, cfg: &FactConfig) -> Result<String> {
    let res = client
        .get(format!("{}/random/facts/", cfg.base_url))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DigestError::from_response("fact page", res).await);
    }

    let html = res.text().await?;
    extract_fact(&html).ok_or(DigestError::Scrape { what: "fact text" })
}

/// The fact is the first non-empty `<h2>` heading on the page. Only the
/// heading's own text nodes count: the trailing `<span class="text-muted">`
/// category tag is not part of the fact.
fn extract_fact(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h2").ok()?;
    document
        .select(&selector)
        .map(|el| {
            el.children()
                .filter_map(|child| child.value().as_text())
                .flat_map(|text| text.split_whitespace())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .find(|text| !text.is_empty())
}
