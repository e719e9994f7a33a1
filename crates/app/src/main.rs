//! Checkpost - command-line entry point
//!
//! Loads configuration, the run environment and recorded responses,
//! validates every response, then writes the environment back.

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use checkpost_application::{
    EnvironmentRepository, ResponseValidator, RunEntry, RunSummary, ValidationRun,
};
use checkpost_domain::Environment;
use checkpost_infrastructure::{
    ConfigLoader, FileEnvironmentRepository, SystemClock, TracingLogSink, load_fixture,
    to_json_stable,
};

#[derive(Debug, Parser)]
#[command(name = "checkpost", version, about = "Validate recorded HTTP responses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate one or more response fixtures
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Response fixture files, validated in order
    #[arg(required = true)]
    fixtures: Vec<PathBuf>,

    /// Environment file read before and written after the run
    #[arg(long)]
    env: Option<PathBuf>,

    /// Validator configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let success = match cli.command {
        Command::Validate(args) => validate(args).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn validate(args: ValidateArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let config = ConfigLoader::from_env().load(args.config.as_deref()).await?;
    let repo = FileEnvironmentRepository::new();

    let mut environment = match &args.env {
        Some(path) => repo.load_or_create(path, &environment_name(path)).await?,
        None => Environment::new("ephemeral"),
    };

    let mut entries = Vec::with_capacity(args.fixtures.len());
    for path in &args.fixtures {
        let response = load_fixture(path).await?.into_response()?;
        entries.push(RunEntry::new(path.display().to_string(), response));
    }

    tracing::info!(
        responses = entries.len(),
        environment = %environment.name,
        "starting validation run"
    );

    let run = ValidationRun::new(ResponseValidator::new(config, SystemClock::new()));
    let mut sink = TracingLogSink::new();
    let summary: RunSummary = run.execute(&entries, &mut environment, &mut sink);

    if let Some(path) = &args.env {
        repo.save(path, &environment).await?;
    }

    if args.json {
        print!("{}", to_json_stable(&summary)?);
    } else {
        print!("{}", report::TextReport(&summary));
    }

    Ok(summary.is_success())
}

fn environment_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "default".to_string(), |s| s.to_string_lossy().into_owned())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "checkpost",
            "validate",
            "a.json",
            "b.json",
            "--env",
            "envs/local.json",
            "--json",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Command::Validate(args) = cli.command;
        assert_eq!(args.fixtures.len(), 2);
        assert_eq!(args.env.as_deref(), Some(Path::new("envs/local.json")));
        assert!(args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_validate_requires_a_fixture() {
        assert!(Cli::try_parse_from(["checkpost", "validate"]).is_err());
    }

    #[test]
    fn test_environment_name_from_file_stem() {
        assert_eq!(environment_name(Path::new("envs/staging.json")), "staging");
    }
}
