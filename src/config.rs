use serde::Deserialize;

/// Bot configuration, loaded from a JSON file (`CONFIG` env var, default
/// `config.json`). Every field has a default so an empty `{}` is valid;
/// base URLs are overridable so tests can point tasks at a mock server.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub joke: JokeConfig,
    #[serde(default)]
    pub fact: FactConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub stocks: StocksConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval() -> u64 {
    1
}

// Must stay in sync with the serde defaults: a missing config file and an
// empty `{}` file are the same configuration.
impl Default for Config {
    fn default() -> Self {
        Config {
            weather: WeatherConfig::default(),
            joke: JokeConfig::default(),
            fact: FactConfig::default(),
            news: NewsConfig::default(),
            stocks: StocksConfig::default(),
            schedule: ScheduleConfig::default(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    #[serde(default = "default_weather_base")]
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig {
            cities: default_cities(),
            base_url: default_weather_base(),
        }
    }
}

fn default_cities() -> Vec<String> {
    vec!["Lyon".to_string(), "Oyonnax".to_string()]
}

fn default_weather_base() -> String {
    "https://wttr.in".to_string()
}

#[derive(Debug, Deserialize)]
pub struct JokeConfig {
    #[serde(default = "default_joke_kind")]
    pub kind: String,
    #[serde(default = "default_joke_base")]
    pub base_url: String,
}

impl Default for JokeConfig {
    fn default() -> Self {
        JokeConfig {
            kind: default_joke_kind(),
            base_url: default_joke_base(),
        }
    }
}

fn default_joke_kind() -> String {
    "dark".to_string()
}

fn default_joke_base() -> String {
    "https://www.blagues-api.fr".to_string()
}

#[derive(Debug, Deserialize)]
pub struct FactConfig {
    #[serde(default = "default_fact_language")]
    pub language: String,
    #[serde(default = "default_fact_base")]
    pub base_url: String,
    #[serde(default = "default_translate_base")]
    pub translate_base_url: String,
}

impl Default for FactConfig {
    fn default() -> Self {
        FactConfig {
            language: default_fact_language(),
            base_url: default_fact_base(),
            translate_base_url: default_translate_base(),
        }
    }
}

fn default_fact_language() -> String {
    "fr".to_string()
}

fn default_fact_base() -> String {
    "https://fungenerators.com".to_string()
}

fn default_translate_base() -> String {
    "https://translate.googleapis.com".to_string()
}

#[derive(Debug, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_topic")]
    pub topic: String,
    #[serde(default = "default_news_country")]
    pub country: String,
    #[serde(default = "default_news_lang")]
    pub lang: String,
    #[serde(default = "default_news_limit")]
    pub limit: u32,
    #[serde(default = "default_news_base")]
    pub base_url: String,
    #[serde(default = "default_news_host")]
    pub api_host: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        NewsConfig {
            topic: default_news_topic(),
            country: default_news_country(),
            lang: default_news_lang(),
            limit: default_news_limit(),
            base_url: default_news_base(),
            api_host: default_news_host(),
        }
    }
}

fn default_news_topic() -> String {
    "TECHNOLOGY".to_string()
}

fn default_news_country() -> String {
    "FR".to_string()
}

fn default_news_lang() -> String {
    "fr".to_string()
}

fn default_news_limit() -> u32 {
    5
}

fn default_news_base() -> String {
    "https://google-news1.p.rapidapi.com".to_string()
}

fn default_news_host() -> String {
    "google-news1.p.rapidapi.com".to_string()
}

#[derive(Debug, Deserialize)]
pub struct StocksConfig {
    #[serde(default = "default_stocks_base")]
    pub base_url: String,
    #[serde(default = "default_stocks_limit")]
    pub limit: usize,
}

impl Default for StocksConfig {
    fn default() -> Self {
        StocksConfig {
            base_url: default_stocks_base(),
            limit: default_stocks_limit(),
        }
    }
}

fn default_stocks_base() -> String {
    "https://finance.yahoo.com".to_string()
}

fn default_stocks_limit() -> usize {
    10
}

/// Per-task trigger hours and cooldowns. The defaults reproduce the
/// production time-table: weather once in the morning, jokes on odd hours,
/// facts on even hours, news and tickers three times a day. Overrides are
/// partial: giving a task only `hours` keeps its default cooldown.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    weather: SlotOverride,
    #[serde(default)]
    joke: SlotOverride,
    #[serde(default)]
    fact: SlotOverride,
    #[serde(default)]
    news: SlotOverride,
    #[serde(default)]
    stocks: SlotOverride,
}

impl ScheduleConfig {
    pub fn weather(&self) -> SlotConfig {
        self.weather.apply(default_weather_slot())
    }

    pub fn joke(&self) -> SlotConfig {
        self.joke.apply(default_joke_slot())
    }

    pub fn fact(&self) -> SlotConfig {
        self.fact.apply(default_fact_slot())
    }

    pub fn news(&self) -> SlotConfig {
        self.news.apply(default_news_slot())
    }

    pub fn stocks(&self) -> SlotConfig {
        self.stocks.apply(default_news_slot())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SlotOverride {
    hours: Option<Vec<u32>>,
    cooldown_secs: Option<u64>,
}

impl SlotOverride {
    fn apply(&self, mut base: SlotConfig) -> SlotConfig {
        if let Some(hours) = &self.hours {
            base.hours = hours.clone();
        }
        if let Some(cooldown_secs) = self.cooldown_secs {
            base.cooldown_secs = cooldown_secs;
        }
        base
    }
}

#[derive(Debug, Clone)]
pub struct SlotConfig {
    pub hours: Vec<u32>,
    pub cooldown_secs: u64,
}

fn default_weather_slot() -> SlotConfig {
    SlotConfig {
        hours: vec![8],
        cooldown_secs: 86_400,
    }
}

fn default_joke_slot() -> SlotConfig {
    SlotConfig {
        hours: vec![9, 11, 13, 15, 17, 19, 21],
        cooldown_secs: 7_200,
    }
}

fn default_fact_slot() -> SlotConfig {
    SlotConfig {
        hours: vec![10, 12, 14, 16, 18, 20, 22],
        cooldown_secs: 7_200,
    }
}

fn default_news_slot() -> SlotConfig {
    SlotConfig {
        hours: vec![8, 13, 18],
        cooldown_secs: 18_000,
    }
}
