use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};

use crate::config::StocksConfig;
use crate::error::{DigestError, Result};
use crate::webhook::{self, Embed};

#[derive(Debug, PartialEq)]
struct Ticker {
    symbol: String,
    name: String,
}

/// Scrape the trending-tickers page and post the symbols as a single embed.
pub async fn send_trending_stocks(
    client: &Client,
    webhook_url: &str,
    cfg: &StocksConfig,
) -> Result<StatusCode> {
    let res = client
        .get(format!("{}/markets/stocks/trending/", cfg.base_url))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(DigestError::from_response("trending tickers page", res).await);
    }

    let html = res.text().await?;
    let tickers = extract_tickers(&html, cfg.limit);
    if tickers.is_empty() {
        return Err(DigestError::Scrape {
            what: "trending tickers",
        });
    }

    let description = tickers
        .iter()
        .map(|t| format!("{} — {}", t.symbol, t.name))
        .collect::<Vec<_>>()
        .join("\n");
    let embed = Embed::titled("Bonjour, c'est les tendances boursières").description(description);
    webhook::post_embeds(client, webhook_url, vec![embed]).await
}

/// The quotes table has one row per ticker: symbol in the first cell,
/// company name in the second.
fn extract_tickers(html: &str, limit: usize) -> Vec<Ticker> {
    let document = Html::parse_document(html);
    let Ok(rows) = Selector::parse("table tbody tr") else {
        return Vec::new();
    };
    let Ok(cells) = Selector::parse("td") else {
        return Vec::new();
    };

    let mut tickers = Vec::new();
    for row in document.select(&rows) {
        let mut row_cells = row.select(&cells);
        let (Some(symbol_cell), Some(name_cell)) = (row_cells.next(), row_cells.next()) else {
            continue;
        };
        let symbol = cell_text(&symbol_cell);
        let name = cell_text(&name_cell);
        if symbol.is_empty() || name.is_empty() {
            continue;
        }
        tickers.push(Ticker { symbol, name });
        if tickers.len() == limit {
            break;
        }
    }
    tickers
}

fn cell_text(cell: &scraper::ElementRef<'_>) -> String {
    cell.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TRENDING_PAGE: &str = r#"
        <html><body>
        <table>
          <thead><tr><th>Symbol</th><th>Name</th><th>Price</th></tr></thead>
          <tbody>
            <tr><td><a href="/quote/NVDA">NVDA</a></td><td>NVIDIA Corporation</td><td>128.3</td></tr>
            <tr><td><a href="/quote/TSLA">TSLA</a></td><td>Tesla, Inc.</td><td>242.1</td></tr>
            <tr><td><a href="/quote/GME">GME</a></td><td>GameStop Corp.</td><td>23.9</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn extracts_symbol_and_name_per_row() {
        let tickers = extract_tickers(TRENDING_PAGE, 10);
        assert_eq!(tickers.len(), 3);
        assert_eq!(tickers[0].symbol, "NVDA");
        assert_eq!(tickers[0].name, "NVIDIA Corporation");
    }

    #[test]
    fn caps_the_list_at_the_configured_limit() {
        let tickers = extract_tickers(TRENDING_PAGE, 2);
        assert_eq!(tickers.len(), 2);
        assert_eq!(tickers[1].symbol, "TSLA");
    }

    #[test]
    fn page_without_table_yields_nothing() {
        assert!(extract_tickers("<html><body><p>maintenance</p></body></html>", 10).is_empty());
    }

    #[tokio::test]
    async fn posts_one_line_per_ticker() {
        let page = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/markets/stocks/trending/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TRENDING_PAGE))
            .mount(&page)
            .await;

        let hook = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "embeds": [{
                    "title": "Bonjour, c'est les tendances boursières",
                    "description": "NVDA — NVIDIA Corporation\nTSLA — Tesla, Inc.\nGME — GameStop Corp."
                }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&hook)
            .await;

        let cfg = StocksConfig {
            base_url: page.uri(),
            limit: 10,
        };
        let status = send_trending_stocks(&Client::new(), &hook.uri(), &cfg)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
