//! ROUGE Process Invocation
//!
//! Builds the ROUGE-1.5.5 command line and runs it as a subprocess. The
//! command always ends with `-m <config>`, whatever the other arguments are.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use rouge_harness_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Interpreter used to run the ROUGE script when none is configured
pub const DEFAULT_INTERPRETER: &str = "perl";

/// Settings for the default ROUGE argument set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RougeOptions {
    /// ROUGE data directory passed with `-e`
    pub data_dir: Option<PathBuf>,
    /// Confidence level in percent (`-c`)
    pub confidence: u8,
    /// Bootstrap resampling count (`-r`)
    pub resamples: u32,
    /// Maximum n-gram order (`-n`)
    pub ngram_order: u8,
    /// Also compute skip-bigram with unigram counting (`-U`)
    pub skip_bigram_units: bool,
    /// Evaluate every system listed in the configuration (`-a`)
    pub all_systems: bool,
}

impl Default for RougeOptions {
    fn default() -> Self {
        Self {
            data_dir: None,
            confidence: 95,
            resamples: 1000,
            ngram_order: 4,
            skip_bigram_units: true,
            all_systems: true,
        }
    }
}

impl RougeOptions {
    /// Defaults with a ROUGE data directory
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: Some(data_dir.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(dir) = &self.data_dir {
            args.push("-e".into());
            args.push(dir.clone().into_os_string());
        }
        args.push("-c".into());
        args.push(self.confidence.to_string().into());
        if self.skip_bigram_units {
            args.push("-U".into());
        }
        args.push("-r".into());
        args.push(self.resamples.to_string().into());
        args.push("-n".into());
        args.push(self.ngram_order.to_string().into());
        if self.all_systems {
            args.push("-a".into());
        }
        args
    }
}

/// ROUGE arguments preceding the mandatory `-m <config>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RougeArgs {
    /// The built-in argument set
    Defaults(RougeOptions),
    /// Caller-supplied arguments, passed verbatim
    Custom(Vec<String>),
}

impl Default for RougeArgs {
    fn default() -> Self {
        RougeArgs::Defaults(RougeOptions::default())
    }
}

impl RougeArgs {
    /// Parse a user argument string.
    ///
    /// One pair of enclosing double quotes is removed before splitting on
    /// whitespace. `-m` is rejected because the config file is always
    /// supplied by the invoker.
    pub fn parse_custom(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .filter(|s| !s.is_empty())
            .unwrap_or(trimmed);

        let args: Vec<String> = unquoted.split_whitespace().map(str::to_string).collect();
        if args.is_empty() {
            return Err(CoreError::validation("ROUGE argument string is empty"));
        }
        if args.iter().any(|a| a == "-m") {
            return Err(CoreError::validation(
                "ROUGE arguments must not contain -m; the configuration file is added automatically",
            ));
        }
        Ok(RougeArgs::Custom(args))
    }

    fn to_args(&self) -> Vec<OsString> {
        match self {
            RougeArgs::Defaults(options) => options.to_args(),
            RougeArgs::Custom(args) => args.iter().map(OsString::from).collect(),
        }
    }
}

/// A fully specified ROUGE command line.
#[derive(Debug, Clone)]
pub struct RougeCommand {
    /// Interpreter program, e.g. `perl`
    pub interpreter: PathBuf,
    /// Path of `ROUGE-1.5.5.pl`
    pub script: PathBuf,
    /// Arguments before `-m`
    pub args: RougeArgs,
    /// Configuration document passed with `-m`
    pub config_path: PathBuf,
}

impl RougeCommand {
    pub fn new(
        interpreter: impl Into<PathBuf>,
        script: impl Into<PathBuf>,
        args: RougeArgs,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            script: script.into(),
            args,
            config_path: config_path.into(),
        }
    }

    /// Arguments after the interpreter: script, options, `-m`, config.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut argv = vec![self.script.clone().into_os_string()];
        argv.extend(self.args.to_args());
        argv.push("-m".into());
        argv.push(self.config_path.clone().into_os_string());
        argv
    }

    /// The whole command line, interpreter first.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = vec![self.interpreter.clone().into_os_string()];
        argv.extend(self.arguments());
        argv
    }

    /// Space-joined command line for logging
    pub fn display(&self) -> String {
        self.argv()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs ROUGE commands and captures their report.
#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker {
    /// Kill the process and fail after this long; `None` waits forever
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound each invocation by a timeout
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Run the command and return its standard output. Failures are not
    /// retried.
    pub async fn invoke(&self, command: &RougeCommand) -> CoreResult<String> {
        tracing::info!("[Invoker] Running ROUGE with command {}", command.display());
        let start = Instant::now();

        let mut cmd = Command::new(&command.interpreter);
        cmd.args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match timeout(limit, cmd.output()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("[Invoker] ROUGE killed after {:?}", limit);
                    return Err(CoreError::Timeout { limit });
                }
            },
            None => cmd.output().await,
        }
        .map_err(|e| {
            CoreError::config(format!(
                "Failed to start {}: {}",
                command.interpreter.display(),
                e
            ))
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "[Invoker] ROUGE finished with {} in {}ms",
            output.status,
            duration_ms
        );

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(CoreError::ExternalTool {
                exit_code: output.status.code(),
                output: captured,
            });
        }

        String::from_utf8(output.stdout).map_err(|e| CoreError::ExternalTool {
            exit_code: output.status.code(),
            output: format!(
                "output is not valid UTF-8 ({}): {}",
                e.utf8_error(),
                String::from_utf8_lossy(e.as_bytes())
            ),
        })
    }
}

/// Run ROUGE once without a timeout.
///
/// `extra_args` replaces the default argument set when present.
pub async fn invoke(
    script: &Path,
    interpreter: &Path,
    document_path: &Path,
    extra_args: Option<&str>,
) -> CoreResult<String> {
    let args = match extra_args {
        Some(raw) => RougeArgs::parse_custom(raw)?,
        None => RougeArgs::default(),
    };
    let command = RougeCommand::new(interpreter, script, args, document_path);
    ProcessInvoker::new().invoke(&command).await
}
