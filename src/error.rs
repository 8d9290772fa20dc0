use thiserror::Error;

pub type Result<T> = std::result::Result<T, DigestError>;

/// Errors produced while fetching content or posting to the webhook.
///
/// Everything here is non-fatal: the main loop logs the error and waits for
/// the next trigger minute.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An upstream API answered with a non-success status.
    #[error("{service} error {status}: {body}")]
    Api {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The webhook endpoint rejected the payload.
    #[error("webhook error {status}: {body}")]
    Webhook {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A scraped page no longer contains the element we look for.
    #[error("could not extract {what} from the fetched page")]
    Scrape { what: &'static str },
}

impl DigestError {
    /// Build a [`DigestError::Api`] from a non-success response, consuming it.
    pub async fn from_response(service: &'static str, res: reqwest::Response) -> Self {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        DigestError::Api {
            service,
            status,
            body,
        }
    }
}
