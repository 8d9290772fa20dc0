mod config;
mod error;
mod fact;
mod joke;
mod news;
mod schedule;
mod stocks;
mod translate;
mod weather;
mod webhook;

use anyhow::{bail, Context};
use chrono::{Local, Timelike};
use config::Config;
use schedule::TaskSlot;
use tokio::time::{interval, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::var("CONFIG").unwrap_or_else(|_| "config.json".to_string());
    let config: Config = match std::fs::read_to_string(&config_path) {
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {config_path}"))?,
        Err(_) => {
            info!("no config file at {config_path}, using defaults");
            Config::default()
        }
    };

    let webhook_url =
        std::env::var("DISCORD_WEBHOOK_URL").context("DISCORD_WEBHOOK_URL is not set")?;
    let client = reqwest::Client::new();

    // One-shot announcement mode: `daily-digest info <text> <url> <image-url>`.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("info") {
        let [_, text, url, image] = args.as_slice() else {
            bail!("usage: daily-digest info <text> <url> <image-url>");
        };
        let status = webhook::post_info(&client, &webhook_url, text, url, image).await?;
        info!(%status, "info sent");
        return Ok(());
    }

    let joke_token = std::env::var("JOKE_API_TOKEN").ok();
    if joke_token.is_none() {
        warn!("JOKE_API_TOKEN is not set, jokes are disabled");
    }
    let news_key = std::env::var("NEWS_API_KEY").ok();
    if news_key.is_none() {
        warn!("NEWS_API_KEY is not set, news headlines are disabled");
    }

    let mut weather_slot = TaskSlot::new(&config.schedule.weather());
    let mut joke_slot = TaskSlot::new(&config.schedule.joke());
    let mut fact_slot = TaskSlot::new(&config.schedule.fact());
    let mut news_slot = TaskSlot::new(&config.schedule.news());
    let mut stocks_slot = TaskSlot::new(&config.schedule.stocks());

    info!(
        cities = ?config.weather.cities,
        joke_kind = %config.joke.kind,
        "starting poll loop"
    );

    let mut ticker = interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        ticker.tick().await;

        let now = Local::now();
        let (hour, minute) = (now.hour(), now.minute());

        if weather_slot.due(hour, minute) {
            match weather::send_weather(&client, &webhook_url, &config.weather).await {
                Ok(codes) => info!(?codes, "sent weather"),
                Err(e) => error!("weather error: {e}"),
            }
            weather_slot.mark_fired();
        }

        if let Some(token) = &joke_token {
            if joke_slot.due(hour, minute) {
                match joke::send_joke(&client, &webhook_url, token, &config.joke).await {
                    Ok(status) => info!(%status, "sent joke"),
                    Err(e) => error!("joke error: {e}"),
                }
                joke_slot.mark_fired();
            }
        }

        if fact_slot.due(hour, minute) {
            match fact::send_fact(&client, &webhook_url, &config.fact).await {
                Ok(status) => info!(%status, "sent fact"),
                Err(e) => error!("fact error: {e}"),
            }
            fact_slot.mark_fired();
        }

        if let Some(key) = &news_key {
            if news_slot.due(hour, minute) {
                match news::send_news(&client, &webhook_url, key, hour, &config.news).await {
                    Ok(codes) => info!(?codes, "sent news"),
                    Err(e) => error!("news error: {e}"),
                }
                news_slot.mark_fired();
            }
        }

        if stocks_slot.due(hour, minute) {
            match stocks::send_trending_stocks(&client, &webhook_url, &config.stocks).await {
                Ok(status) => info!(%status, "sent trending stocks"),
                Err(e) => error!("trending stocks error: {e}"),
            }
            stocks_slot.mark_fired();
        }

        weather_slot.tick();
        joke_slot.tick();
        fact_slot.tick();
        news_slot.tick();
        stocks_slot.tick();
    }
}
