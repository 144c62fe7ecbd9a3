use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use theoryx_core::{
    Classification, Engine, EngineConfig, History, SequenceExtractor, Summary,
    UnavailableExtractor,
};

use crate::error::{CliError, Result};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "THEORYX_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "theoryx",
    about = "Adaptive conservative probability over repeated categorical outcomes",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Engine configuration: an optional file plus per-field overrides.
#[derive(Debug, Default, Clone, Args)]
pub struct EngineArgs {
    /// TOML or JSON engine configuration (`.json` selects JSON).
    #[arg(long, global = true, env = "THEORYX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated category labels, in order.
    #[arg(long, global = true, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Sensitivity exponent (> 0).
    #[arg(long, global = true)]
    pub beta: Option<f64>,

    /// Smoothing constant (> 0).
    #[arg(long, global = true)]
    pub epsilon: Option<f64>,

    /// Decimal places in reports (1 to 15).
    #[arg(long, global = true)]
    pub precision: Option<u32>,

    /// Decimal places in `calculate` summaries (1 to 15).
    #[arg(long, global = true)]
    pub summary_precision: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full report: counts, frequencies, distribution, entropy.
    Report(ReportArgs),

    /// Service summary with timestamp, at the summary precision.
    Calculate(CalculateArgs),

    /// Classify a single probability.
    Classify(ClassifyArgs),

    /// Print the effective engine configuration.
    #[command(name = "show-config")]
    ShowConfig,
}

/// Where the observed history comes from.
#[derive(Debug, Default, Clone, Args)]
pub struct HistoryArgs {
    /// Observed outcomes, separated by spaces or commas.
    pub history: Vec<String>,

    /// Read the history from an image instead.
    #[arg(long, conflicts_with = "history")]
    pub image: Option<PathBuf>,

    /// Fail on unknown labels instead of dropping them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Default, Clone, Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: HistoryArgs,
}

#[derive(Debug, Default, Clone, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub input: HistoryArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ClassifyArgs {
    /// Probability in [0, 1].
    pub probability: f64,
}

#[derive(Debug, Serialize)]
struct CalculateOutput {
    timestamp: String,
    #[serde(flatten)]
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput {
    probability: f64,
    classification: Classification,
}

/// Install a stderr subscriber filtered by `THEORYX_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_from_env(out: &mut dyn Write) -> Result<()> {
    let cli = Cli::parse();
    run(cli, out)
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = resolve_config(&cli.engine)?;
    match cli.command {
        Commands::ShowConfig => {
            config.check()?;
            write_json(out, &config)
        }
        Commands::Classify(args) => {
            let p = args.probability;
            if !(0.0..=1.0).contains(&p) {
                return Err(CliError::invalid(format!(
                    "probability must be in [0, 1], got {p}"
                )));
            }
            let engine = Engine::new(config)?;
            write_json(
                out,
                &ClassifyOutput {
                    probability: p,
                    classification: engine.classify(p),
                },
            )
        }
        Commands::Report(args) => {
            let engine = Engine::new(config)?;
            let history = read_history(&engine, &args.input)?;
            write_json(out, &engine.report(&history)?)
        }
        Commands::Calculate(args) => {
            let engine = Engine::new(config)?;
            let history = read_history(&engine, &args.input)?;
            let output = CalculateOutput {
                timestamp: chrono::Local::now().to_rfc3339(),
                summary: engine.summary(&history)?,
            };
            write_json(out, &output)
        }
    }
}

/// Start from the config file (or defaults) and apply flag overrides.
pub fn resolve_config(args: &EngineArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "cli.config_loaded");
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(categories) = &args.categories {
        config.categories = categories.clone();
    }
    if let Some(beta) = args.beta {
        config.beta = beta;
    }
    if let Some(epsilon) = args.epsilon {
        config.epsilon = epsilon;
    }
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(summary_precision) = args.summary_precision {
        config.summary_precision = summary_precision;
    }
    Ok(config)
}

fn read_history(engine: &Engine, input: &HistoryArgs) -> Result<History> {
    let tokens = match &input.image {
        Some(path) => extract_labels(&UnavailableExtractor, path)?,
        None => split_tokens(&input.history),
    };
    let history = if input.strict {
        engine.history_from_labels(&tokens)?
    } else {
        engine.normalize(&tokens)
    };
    debug!(
        tokens = tokens.len(),
        kept = history.len(),
        strict = input.strict,
        "cli.history"
    );
    Ok(history)
}

fn extract_labels(extractor: &dyn SequenceExtractor, path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    Ok(extractor.extract(&bytes)?)
}

/// Split arguments on commas and whitespace, as typed by a user.
fn split_tokens(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use serde_json::Value;
    use tempfile::NamedTempFile;

    use super::*;

    fn run_json(engine: EngineArgs, command: Commands) -> Result<Value> {
        let mut buf = Vec::new();
        run(Cli { engine, command }, &mut buf)?;
        Ok(serde_json::from_slice(&buf)?)
    }

    fn history(tokens: &[&str]) -> HistoryArgs {
        HistoryArgs {
            history: tokens.iter().map(|s| (*s).to_string()).collect(),
            ..HistoryArgs::default()
        }
    }

    #[test]
    fn report_command_scores_reference_history() {
        let value = run_json(
            EngineArgs::default(),
            Commands::Report(ReportArgs {
                input: history(&["T D E", "T,T,D"]),
            }),
        )
        .unwrap();
        assert_eq!(value["total"], 6);
        assert_eq!(value["counts"]["T"], 3);
        assert_eq!(value["most_likely"], "T");
        let t = value["distribution"]["T"].as_f64().unwrap();
        let d = value["distribution"]["D"].as_f64().unwrap();
        assert!(t > d);
    }

    #[test]
    fn report_drops_unknown_tokens_by_default() {
        let args = EngineArgs {
            precision: Some(2),
            ..EngineArgs::default()
        };
        let value = run_json(
            args,
            Commands::Report(ReportArgs {
                input: history(&["t", "zz", "e"]),
            }),
        )
        .unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["distribution"]["D"], 0.01);
    }

    #[test]
    fn strict_report_rejects_unknown_tokens() {
        let mut input = history(&["T", "Q"]);
        input.strict = true;
        let err = run_json(
            EngineArgs::default(),
            Commands::Report(ReportArgs { input }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn report_precision_is_validated() {
        let args = EngineArgs {
            precision: Some(30),
            ..EngineArgs::default()
        };
        let err = run_json(
            args,
            Commands::Report(ReportArgs {
                input: history(&[]),
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
        assert_eq!(err.exit_code(), 2);

        let args = EngineArgs {
            summary_precision: Some(0),
            ..EngineArgs::default()
        };
        let err = run_json(args, Commands::ShowConfig).unwrap_err();
        assert!(
            err.to_string().contains("between 1 and 15"),
            "{err}"
        );
    }

    #[test]
    fn precision_overrides_reach_show_config_and_calculate() {
        let args = EngineArgs {
            precision: Some(3),
            summary_precision: Some(2),
            ..EngineArgs::default()
        };
        let value = run_json(args.clone(), Commands::ShowConfig).unwrap();
        assert_eq!(value["precision"], 3);
        assert_eq!(value["summary_precision"], 2);

        let value = run_json(
            args.clone(),
            Commands::Calculate(CalculateArgs {
                input: history(&[]),
            }),
        )
        .unwrap();
        assert_eq!(value["probabilities"]["T"], 0.33);

        let value = run_json(
            args,
            Commands::Report(ReportArgs {
                input: history(&[]),
            }),
        )
        .unwrap();
        assert_eq!(value["distribution"]["T"], 0.333);
    }

    #[test]
    fn calculate_command_echoes_history_and_timestamp() {
        let value = run_json(
            EngineArgs::default(),
            Commands::Calculate(CalculateArgs {
                input: history(&["t, d, x, e"]),
            }),
        )
        .unwrap();
        assert!(value["timestamp"].is_string());
        assert_eq!(value["history"], serde_json::json!(["T", "D", "E"]));
        assert_eq!(value["probabilities"]["T"], 0.3333);
        assert_eq!(value["most_likely"], "T");
        assert_eq!(value["classification"], "low probability");
    }

    #[test]
    fn classify_command_bands() {
        let value = run_json(
            EngineArgs::default(),
            Commands::Classify(ClassifyArgs { probability: 0.6 }),
        )
        .unwrap();
        assert_eq!(value["classification"], "high probability");

        let err = run_json(
            EngineArgs::default(),
            Commands::Classify(ClassifyArgs { probability: 1.5 }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    #[test]
    fn flag_overrides_apply_on_top_of_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "categories = [\"A\", \"B\"]\nbeta = 3.0").unwrap();

        let args = EngineArgs {
            config: Some(file.path().to_path_buf()),
            beta: Some(1.0),
            ..EngineArgs::default()
        };
        let value = run_json(args, Commands::ShowConfig).unwrap();
        assert_eq!(value["categories"], serde_json::json!(["A", "B"]));
        assert_eq!(value["beta"], 1.0);
        assert_eq!(value["precision"], 6);
    }

    #[test]
    fn invalid_override_is_a_configuration_error() {
        let args = EngineArgs {
            epsilon: Some(0.0),
            ..EngineArgs::default()
        };
        let err = run_json(args, Commands::ShowConfig).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn image_input_reports_unavailable_extractor() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG\r\n").unwrap();
        let input = HistoryArgs {
            image: Some(file.path().to_path_buf()),
            ..HistoryArgs::default()
        };
        let err = run_json(
            EngineArgs::default(),
            Commands::Calculate(CalculateArgs { input }),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Extract(_)));
    }

    #[test]
    fn custom_categories_from_flags() {
        let args = EngineArgs {
            categories: Some(vec!["win".into(), "loss".into()]),
            ..EngineArgs::default()
        };
        let value = run_json(
            args,
            Commands::Report(ReportArgs {
                input: history(&["WIN win loss"]),
            }),
        )
        .unwrap();
        assert_eq!(value["counts"]["WIN"], 2);
        assert_eq!(value["most_likely"], "WIN");
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["theoryx", "report", "T", "D", "--beta", "1.5"]).unwrap();
        assert_eq!(cli.engine.beta, Some(1.5));
        assert!(matches!(cli.command, Commands::Report(_)));

        let cli = Cli::try_parse_from(["theoryx", "--precision", "3", "calculate", "T"]).unwrap();
        assert_eq!(cli.engine.precision, Some(3));
        assert!(matches!(cli.command, Commands::Calculate(_)));

        let cli =
            Cli::try_parse_from(["theoryx", "show-config", "--summary-precision", "2"]).unwrap();
        assert_eq!(cli.engine.summary_precision, Some(2));
    }
}
