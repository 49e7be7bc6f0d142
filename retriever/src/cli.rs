use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    /// Base URL of the scenario database service.
    #[arg(long, default_value = "https://db.ece.iiasa.ac.at/api")]
    pub api_url: String,

    /// Name of the remote database to read from.
    ///
    /// Defaults to the internal Ariadne database when neither this flag nor
    /// the workflow configuration names one.
    #[arg(long)]
    pub db_name: Option<String>,

    /// User name for the scenario database service.
    #[arg(long, env = "IIASA_USERNAME")]
    pub iiasa_user: String,

    /// Password for the scenario database service.
    #[arg(long, env = "IIASA_PASSWORD", hide_env_values = true)]
    pub iiasa_password: String,

    /// Model to download data for. Use the flag once per model.
    #[arg(long = "model")]
    pub models: Vec<String>,

    /// Scenario to download data for. Use the flag once per scenario.
    #[arg(long = "scenario")]
    pub scenarios: Vec<String>,

    /// Path of the CSV file to write.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to the host workflow's configuration file.
    ///
    /// Used when running outside the orchestrator: any value not passed on
    /// the command line is read from this step's section of the file instead.
    #[arg(long)]
    pub workflow_config: Option<PathBuf>,
}
