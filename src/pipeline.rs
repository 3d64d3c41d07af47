use crate::output::{write_records, OutputError};
use crate::parser::{fetch_document, FetchError, PriceParser};
use crate::types::ItemRecord;
use reqwest::Client;
use std::error::Error;
use std::path::Path;
use tracing::{error, info, instrument};

/// What one run produced. When `error` is set extraction never ran and
/// `records` is empty.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<ItemRecord>,
    pub error: Option<FetchError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetch, parse and extract. Known source failures are kept in the report
/// instead of aborting.
#[instrument(level = "info", name = "Collecting prices", skip(client, parser))]
pub async fn collect_prices<P: PriceParser>(client: &Client, url: &str, parser: &P) -> RunReport {
    info!("Checking sources");
    let document = match fetch_document(client, url).await {
        Ok(document) => document,
        Err(e) => {
            match e.source() {
                Some(source) => error!("Error: {}: {}", e, source),
                None => error!("Error: {}", e),
            }
            return RunReport {
                records: Vec::new(),
                error: Some(e),
            };
        }
    };
    info!("Sources checked and document created");

    info!("Generating price list");
    let records = parser.parse_document(&document);
    info!("Generated prices");

    RunReport {
        records,
        error: None,
    }
}

/// Full run. The output file is written whatever happened upstream; only a
/// failure to write it is an error here.
pub async fn run<P: PriceParser>(
    client: &Client,
    url: &str,
    parser: &P,
    output: &Path,
) -> Result<RunReport, OutputError> {
    let report = collect_prices(client, url, parser).await;

    write_records(output, &report.records)?;
    info!("Generated JSON");

    Ok(report)
}
