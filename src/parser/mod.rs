mod config;
mod insider;
mod parser;

pub use config::Configuration;
pub use insider::*;
pub use parser::{build_client, fetch_document, fetch_page, FetchError, PriceParser};
