use color_eyre::Report;
use rlprices::configuration::get_configuration;
use rlprices::parser::{build_client, Configuration, InsiderParser};
use rlprices::pipeline::run;
use rlprices::telemetry::init_telemetry;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Report> {
    setup()?;

    // Read configuration
    let configuration = get_configuration()?;
    info!("Scraping {}", configuration.source.url);

    let client = build_client(configuration.source.timeout())?;
    let parser = InsiderParser::new(Configuration::default())?;

    let report = run(
        &client,
        &configuration.source.url,
        &parser,
        &configuration.output.path,
    )
    .await?;

    if !report.is_success() {
        warn!(
            "Source unavailable, {} was written without prices",
            configuration.output.path.display()
        );
    }

    Ok(())
}

fn setup() -> Result<(), Report> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "1")
    }
    color_eyre::install()?;
    init_telemetry()?;

    Ok(())
}
