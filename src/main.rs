//! Rouge Harness CLI - prepare and run ROUGE-1.5.5 evaluations.
//!
//! # Usage
//!
//! ```bash
//! # Remember where ROUGE is installed
//! rouge-harness set-rouge-path /opt/ROUGE-1.5.5
//!
//! # Evaluate system summaries against model summaries
//! rouge-harness evaluate \
//!     --system-dir systems --system-pattern 'sys-(\d+)\.html' \
//!     --model-dir models --model-pattern 'ref-#ID#-[A-Z]\.html' --json
//!
//! # Several systems at once (files named <base>.<label>)
//! rouge-harness evaluate ... --variant 01 --variant 02
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rouge_harness::{
    Evaluation, EvaluationConfig, RougeSettings, SettingsStore, VariantAlignment,
};
use tracing_subscriber::EnvFilter;

/// Prepare ROUGE configuration files and run ROUGE-1.5.5.
#[derive(Parser)]
#[command(name = "rouge-harness", version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Custom settings file (default: platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save the ROUGE home directory (the one containing ROUGE-1.5.5.pl)
    SetRougePath {
        /// ROUGE home directory
        home: PathBuf,
    },
    /// Resolve summaries and write the ROUGE configuration file
    WriteConfig(EvalArgs),
    /// Run ROUGE and print its report
    Evaluate {
        #[command(flatten)]
        eval: EvalArgs,

        /// Print parsed scores as JSON instead of the raw report
        #[arg(long)]
        json: bool,

        /// Convert plain-text summaries to ROUGE's HTML format first
        #[arg(long)]
        convert: bool,
    },
    /// Convert plain-text summaries (one sentence per line) to ROUGE's HTML format
    Convert {
        /// Directory of plain-text summaries
        input: PathBuf,
        /// Directory for converted summaries
        output: PathBuf,
    },
}

#[derive(Args)]
struct EvalArgs {
    /// Directory containing system summaries
    #[arg(long)]
    system_dir: PathBuf,

    /// Directory containing model summaries
    #[arg(long)]
    model_dir: PathBuf,

    /// Regex for system filenames; its first group captures the document ID
    #[arg(long)]
    system_pattern: String,

    /// Regex for model filenames with a placeholder for the document ID
    #[arg(long)]
    model_pattern: String,

    /// Placeholder token in the model pattern
    #[arg(long, default_value = "#ID#")]
    placeholder: String,

    /// System variant label (repeatable)
    #[arg(long = "variant")]
    variants: Vec<String>,

    /// Pair variant files by sort position without comparing IDs
    #[arg(long)]
    positional: bool,

    /// ROUGE home directory (overrides saved settings)
    #[arg(long)]
    rouge_home: Option<PathBuf>,

    /// Arguments passed to ROUGE instead of the defaults
    #[arg(long, allow_hyphen_values = true)]
    rouge_args: Option<String>,

    /// Interpreter for the ROUGE script
    #[arg(long, default_value = "perl")]
    interpreter: PathBuf,

    /// Where to write the configuration file (default: a temporary directory)
    #[arg(long)]
    config_file: Option<PathBuf>,

    /// Kill ROUGE if it runs longer than this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn settings_store(cli_path: Option<PathBuf>) -> Result<SettingsStore> {
    match cli_path {
        Some(path) => Ok(SettingsStore::at(path)),
        None => SettingsStore::new().context("Failed to locate settings file"),
    }
}

fn build_evaluation(args: EvalArgs, store: &SettingsStore) -> Result<Evaluation> {
    let home = match args.rouge_home {
        Some(home) => home,
        None => store.load()?.home_dir,
    };

    let mut builder = EvaluationConfig::builder()
        .system_dir(&args.system_dir)
        .model_dir(&args.model_dir)
        .rouge_home(&home)
        .system_pattern(args.system_pattern)
        .model_pattern(args.model_pattern)
        .placeholder(args.placeholder)
        .variants(args.variants)
        .interpreter(&args.interpreter)
        .alignment(if args.positional {
            VariantAlignment::Positional
        } else {
            VariantAlignment::ByIdentifier
        });

    if let Some(raw) = args.rouge_args {
        builder = builder.rouge_args(raw);
    }
    if let Some(path) = args.config_file {
        builder = builder.config_path(path);
    }
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let config = builder.build().context("Invalid evaluation configuration")?;
    Ok(Evaluation::new(config))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let store = settings_store(cli.settings)?;

    match cli.command {
        Command::SetRougePath { home } => {
            store
                .save(&RougeSettings::new(&home))
                .context("Failed to save ROUGE home directory")?;
            println!("{}", store.path().display());
        }
        Command::WriteConfig(args) => {
            let evaluation = build_evaluation(args, &store)?;
            let written = evaluation.write_config()?;
            eprintln!("{} tasks", written.task_count());
            println!("{}", written.persist().display());
        }
        Command::Evaluate { eval, json, convert } => {
            let evaluation = build_evaluation(eval, &store)?;
            let output = if convert {
                evaluation.convert_and_evaluate().await?
            } else {
                evaluation.evaluate().await?
            };

            if json {
                let results = rouge_harness_runner::parse(&output);
                if results.is_empty() {
                    anyhow::bail!("ROUGE output contained no score lines:\n{}", output);
                }
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", output);
            }
        }
        Command::Convert { input, output } => {
            let count = rouge_harness::services::convert_summaries_to_rouge_format(&input, &output)
                .with_context(|| format!("Failed to convert summaries in {}", input.display()))?;
            eprintln!("Converted {} summaries", count);
        }
    }

    Ok(())
}
