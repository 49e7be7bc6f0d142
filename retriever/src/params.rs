use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::client::Credentials;

/// Database read when neither the command line nor the workflow
/// configuration names one.
pub const DEFAULT_DATABASE: &str = "ariadne_intern";

/// Name of this step's section in the workflow configuration file.
const STEP_SECTION: &str = "retrieve_database";

/// The resolved parameter bundle for one run. Immutable once built.
#[derive(Debug)]
pub struct RunParams {
    pub credentials: Credentials,
    pub database: String,
    pub models: Vec<String>,
    pub scenarios: Vec<String>,
    pub output: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ParamsError {
    #[error("no output path given; pass --output or set `output` in the workflow config")]
    MissingOutput,
    #[error("model filter is empty; pass --model or set `leitmodelle` in the workflow config")]
    NoModels,
    #[error("scenario filter is empty; pass --scenario or set `scenarios` in the workflow config")]
    NoScenarios,
    #[error("workflow config has no `{STEP_SECTION}` section")]
    MissingSection,
    #[error("failed to read workflow config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse workflow config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The slice of the host workflow's configuration that this step reads when
/// it runs standalone. Everything else in the file is ignored.
#[derive(Debug, Deserialize)]
struct WorkflowConfig {
    retrieve_database: Option<StepConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StepConfig {
    db_name: Option<String>,
    leitmodelle: Vec<String>,
    scenarios: Vec<String>,
    output: Option<PathBuf>,
}

impl RunParams {
    /// Builds the parameter bundle from the command line, falling back to
    /// the workflow configuration file for anything the orchestrator did not
    /// inject. Command-line values win. Fails before any network traffic.
    pub fn resolve(args: CliArgs) -> Result<Self, ParamsError> {
        let step = match &args.workflow_config {
            Some(path) => load_step_config(path)?,
            None => StepConfig::default(),
        };

        let models = if args.models.is_empty() {
            step.leitmodelle
        } else {
            args.models
        };
        let scenarios = if args.scenarios.is_empty() {
            step.scenarios
        } else {
            args.scenarios
        };
        let output = args.output.or(step.output).ok_or(ParamsError::MissingOutput)?;
        let database = args
            .db_name
            .or(step.db_name)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        if models.is_empty() {
            return Err(ParamsError::NoModels);
        }
        if scenarios.is_empty() {
            return Err(ParamsError::NoScenarios);
        }

        Ok(Self {
            credentials: Credentials {
                username: args.iiasa_user,
                password: args.iiasa_password,
            },
            database,
            models,
            scenarios,
            output,
        })
    }
}

fn load_step_config(path: &Path) -> Result<StepConfig, ParamsError> {
    let file = std::fs::File::open(path)?;
    let config: WorkflowConfig = serde_yaml::from_reader(file)?;
    config.retrieve_database.ok_or(ParamsError::MissingSection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG_PATH: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/workflow_config.yaml");
    const NO_STEP_CONFIG_PATH: &str =
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/no_step_config.yaml");

    fn orchestrator_args() -> CliArgs {
        CliArgs {
            api_url: "https://db.ece.iiasa.ac.at/api".to_string(),
            db_name: None,
            iiasa_user: "ariadne-bot".to_string(),
            iiasa_password: "secret".to_string(),
            models: vec!["REMIND-EU".to_string()],
            scenarios: vec!["8Gt_Bal_v3".to_string()],
            output: Some(PathBuf::from("resources/ariadne_database.csv")),
            workflow_config: None,
        }
    }

    #[test]
    fn test_should_resolve_orchestrator_values() {
        let params = RunParams::resolve(orchestrator_args()).expect("Failed to resolve params");

        assert_eq!(params.database, DEFAULT_DATABASE);
        assert_eq!(params.models, vec!["REMIND-EU".to_string()]);
        assert_eq!(params.scenarios, vec!["8Gt_Bal_v3".to_string()]);
        assert_eq!(params.output, PathBuf::from("resources/ariadne_database.csv"));
    }

    #[test]
    fn test_should_fail_without_output_path() {
        let mut args = orchestrator_args();
        args.output = None;

        let result = RunParams::resolve(args);
        assert!(matches!(result, Err(ParamsError::MissingOutput)));
    }

    #[test]
    fn test_should_fail_on_empty_model_filter() {
        let mut args = orchestrator_args();
        args.models = vec![];

        let result = RunParams::resolve(args);
        assert!(matches!(result, Err(ParamsError::NoModels)));
    }

    #[test]
    fn test_should_fail_on_empty_scenario_filter() {
        let mut args = orchestrator_args();
        args.scenarios = vec![];

        let result = RunParams::resolve(args);
        assert!(matches!(result, Err(ParamsError::NoScenarios)));
    }

    #[test]
    fn test_should_fill_missing_values_from_workflow_config() {
        let mut args = orchestrator_args();
        args.models = vec![];
        args.scenarios = vec![];
        args.output = None;
        args.workflow_config = Some(PathBuf::from(CONFIG_PATH));

        let params = RunParams::resolve(args).expect("Failed to resolve params");

        assert_eq!(params.database, "ariadne_intern");
        assert_eq!(
            params.models,
            vec![
                "REMIND-EU".to_string(),
                "REMod".to_string(),
                "TIMES PanEU".to_string(),
            ]
        );
        assert_eq!(
            params.scenarios,
            vec!["8Gt_Bal_v3".to_string(), "8Gt_EnSec".to_string()]
        );
        assert_eq!(params.output, PathBuf::from("resources/ariadne_database.csv"));
    }

    #[test]
    fn test_should_prefer_cli_values_over_workflow_config() {
        let mut args = orchestrator_args();
        args.workflow_config = Some(PathBuf::from(CONFIG_PATH));
        args.output = Some(PathBuf::from("elsewhere.csv"));

        let params = RunParams::resolve(args).expect("Failed to resolve params");

        assert_eq!(params.models, vec!["REMIND-EU".to_string()]);
        assert_eq!(params.scenarios, vec!["8Gt_Bal_v3".to_string()]);
        assert_eq!(params.output, PathBuf::from("elsewhere.csv"));
    }

    #[test]
    fn test_should_fail_when_step_section_is_missing() {
        let mut args = orchestrator_args();
        args.models = vec![];
        args.workflow_config = Some(PathBuf::from(NO_STEP_CONFIG_PATH));

        let result = RunParams::resolve(args);
        assert!(matches!(result, Err(ParamsError::MissingSection)));
    }

    #[test]
    fn test_should_fail_on_unreadable_workflow_config() {
        let mut args = orchestrator_args();
        args.workflow_config = Some(PathBuf::from("does/not/exist.yaml"));

        let result = RunParams::resolve(args);
        assert!(matches!(result, Err(ParamsError::Io(_))));
    }
}
