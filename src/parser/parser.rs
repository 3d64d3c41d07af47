use crate::types::ItemRecord;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::{info, instrument};

/// Known ways for the source stage to fail. Either one means there is nothing
/// to extract.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error establishing connection to {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("error building a document from {url}: {reason}")]
    Parse { url: String, reason: String },
}

/// Turns a price page into records.
pub trait PriceParser {
    fn parse_document(&self, document: &Html) -> Vec<ItemRecord>;
}

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

/// Single GET of the price page. Error statuses count as connection failures.
#[instrument(level = "info", name = "Fetching page", skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let connection_error = |source| FetchError::Connection {
        url: url.to_owned(),
        source,
    };

    let res = client
        .get(url)
        .send()
        .await
        .map_err(connection_error)?
        .error_for_status()
        .map_err(connection_error)?;
    info!("Source answered with {}", res.status());

    // Decoded with the charset the server announces, bad bytes replaced
    res.text().await.map_err(|e| FetchError::Parse {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

/// Fetch and parse in one go, so the caller only ever sees a document or a
/// [`FetchError`].
pub async fn fetch_document(client: &Client, url: &str) -> Result<Html, FetchError> {
    let body = fetch_page(client, url).await?;
    Ok(Html::parse_document(&body))
}
