use anyhow::Context;

use crate::client::ScenarioDbClient;
use crate::params::RunParams;

pub mod cli;
pub mod client;
pub mod frame;
pub mod params;

/// Runs the retrieval step end to end: authenticate, download the filtered
/// timeseries, write them to the output path as CSV. Returns the number of
/// data rows written.
pub async fn retrieve(api_url: &str, params: &RunParams) -> anyhow::Result<usize> {
    let client = ScenarioDbClient::connect(api_url, &params.credentials)
        .await
        .context("Authenticate with the scenario database service")?;

    let table = client
        .read_timeseries(&params.database, &params.models, &params.scenarios)
        .await
        .context("Download timeseries")?;

    let mut frame = frame::load_from_table(&table).context("Convert timeseries")?;
    frame::write_csv(&mut frame, &params.output)
        .with_context(|| format!("Write {}", params.output.display()))?;

    Ok(frame.height())
}
