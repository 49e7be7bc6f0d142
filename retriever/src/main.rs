use ariadne_retriever::cli::CliArgs;
use ariadne_retriever::params::RunParams;
use clap::Parser as _;
use log::info;

const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init()?;

    let args = CliArgs::try_parse()?;
    info!("{CRATE_NAME} {CRATE_VERSION}");

    let api_url = args.api_url.clone();
    let params = RunParams::resolve(args)?;
    info!(
        "Retrieving from {}: models {:?}, scenarios {:?}",
        params.database, params.models, params.scenarios
    );

    let rows = ariadne_retriever::retrieve(&api_url, &params).await?;
    info!("Wrote {} rows to {}", rows, params.output.display());

    Ok(())
}
