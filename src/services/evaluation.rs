//! Evaluation Orchestrator
//!
//! Runs a complete ROUGE evaluation: resolve system/model associations,
//! write the configuration document, invoke ROUGE and parse its report.
//! All paths are validated once, when the configuration is built.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rouge_harness_core::EvalTask;
use rouge_harness_matching::{resolve, AssociationRequest, VariantAlignment, DEFAULT_PLACEHOLDER};
use rouge_harness_runner::{
    parse, write_document, ProcessInvoker, ResultSet, RougeArgs, RougeCommand, RougeOptions,
    DEFAULT_INTERPRETER,
};
use tempfile::TempDir;

use crate::models::settings::RougeSettings;
use crate::services::convert::convert_summaries_to_rouge_format;
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::verify_dir;

/// File name of the generated document inside a temporary directory
pub const DEFAULT_CONFIG_FILE_NAME: &str = "rouge_conf.xml";

/// Validated evaluation configuration
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    /// Directory of system summaries
    pub system_dir: PathBuf,
    /// Directory of model summaries
    pub model_dir: PathBuf,
    /// ROUGE home directory
    pub home_dir: PathBuf,
    /// ROUGE data directory
    pub data_dir: PathBuf,
    /// ROUGE-1.5.5.pl
    pub bin_path: PathBuf,
    /// Interpreter used to run the script
    pub interpreter: PathBuf,
    /// System filename pattern with one ID group
    pub system_pattern: String,
    /// Model filename pattern with the placeholder
    pub model_pattern: String,
    /// Placeholder token in the model pattern
    pub placeholder: String,
    /// Variant labels; empty for single-system evaluation
    pub variants: Vec<String>,
    /// Variant alignment policy
    pub alignment: VariantAlignment,
    /// Custom ROUGE arguments; defaults are used when `None`
    pub rouge_args: Option<RougeArgs>,
    /// Where to write the configuration document; a temp dir when `None`
    pub config_path: Option<PathBuf>,
    /// Kill ROUGE after this long
    pub timeout: Option<Duration>,
}

impl EvaluationConfig {
    pub fn builder() -> EvaluationConfigBuilder {
        EvaluationConfigBuilder::default()
    }

    /// The association request described by this configuration
    pub fn association_request(&self) -> AssociationRequest {
        AssociationRequest::new(
            &self.system_dir,
            self.system_pattern.clone(),
            &self.model_dir,
            self.model_pattern.clone(),
        )
        .with_placeholder(self.placeholder.clone())
        .with_variants(self.variants.clone())
        .with_alignment(self.alignment)
    }

    /// ROUGE arguments preceding `-m`
    pub fn effective_args(&self) -> RougeArgs {
        match &self.rouge_args {
            Some(args) => args.clone(),
            None => RougeArgs::Defaults(RougeOptions::with_data_dir(&self.data_dir)),
        }
    }
}

/// Builder for `EvaluationConfig`
#[derive(Debug, Clone, Default)]
pub struct EvaluationConfigBuilder {
    system_dir: Option<PathBuf>,
    model_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    interpreter: Option<PathBuf>,
    system_pattern: Option<String>,
    model_pattern: Option<String>,
    placeholder: Option<String>,
    variants: Vec<String>,
    alignment: VariantAlignment,
    rouge_args: Option<String>,
    config_path: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl EvaluationConfigBuilder {
    pub fn system_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.system_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn model_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.model_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn rouge_home(mut self, dir: impl AsRef<Path>) -> Self {
        self.home_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Take the ROUGE home directory from saved settings
    pub fn settings(self, settings: &RougeSettings) -> Self {
        self.rouge_home(&settings.home_dir)
    }

    /// Override the data directory (defaults to `<home>/data`)
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn interpreter(mut self, program: impl AsRef<Path>) -> Self {
        self.interpreter = Some(program.as_ref().to_path_buf());
        self
    }

    pub fn system_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.system_pattern = Some(pattern.into());
        self
    }

    pub fn model_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.model_pattern = Some(pattern.into());
        self
    }

    pub fn placeholder(mut self, token: impl Into<String>) -> Self {
        self.placeholder = Some(token.into());
        self
    }

    pub fn variants(mut self, labels: Vec<String>) -> Self {
        self.variants = labels;
        self
    }

    pub fn alignment(mut self, alignment: VariantAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Raw ROUGE argument string, replacing the defaults
    pub fn rouge_args(mut self, args: impl Into<String>) -> Self {
        self.rouge_args = Some(args.into());
        self
    }

    pub fn config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Validate every path and argument and produce the configuration.
    pub fn build(self) -> AppResult<EvaluationConfig> {
        let system_dir = self
            .system_dir
            .ok_or_else(|| AppError::validation("System directory is required"))?;
        let model_dir = self
            .model_dir
            .ok_or_else(|| AppError::validation("Model directory is required"))?;
        let home_dir = self
            .home_dir
            .ok_or_else(|| AppError::config("ROUGE home directory is not set"))?;
        let system_pattern = non_empty(self.system_pattern, "System filename pattern")?;
        let model_pattern = non_empty(self.model_pattern, "Model filename pattern")?;

        verify_dir(&system_dir, "system")?;
        verify_dir(&model_dir, "model")?;
        verify_dir(&home_dir, "home")?;

        let installation = RougeSettings::new(&home_dir);
        let bin_path = installation.bin_path();
        if !bin_path.is_file() {
            return Err(AppError::config(format!(
                "ROUGE binary not found at {}. Please set the correct path by running \
                 rouge-harness set-rouge-path /path/to/rouge/home",
                bin_path.display()
            )));
        }

        let data_dir = self
            .data_dir
            .unwrap_or_else(|| installation.data_dir());

        if let Some(path) = &self.config_path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                verify_dir(parent, "configuration file")?;
            }
        }

        let rouge_args = match self.rouge_args.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(RougeArgs::parse_custom(raw)?),
            _ => None,
        };

        if self.variants.iter().any(|label| label.is_empty()) {
            return Err(AppError::validation("Variant labels must not be empty"));
        }

        Ok(EvaluationConfig {
            system_dir,
            model_dir,
            home_dir,
            data_dir,
            bin_path,
            interpreter: self
                .interpreter
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INTERPRETER)),
            system_pattern,
            model_pattern,
            placeholder: self
                .placeholder
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
            variants: self.variants,
            alignment: self.alignment,
            rouge_args,
            config_path: self.config_path,
            timeout: self.timeout,
        })
    }
}

fn non_empty(value: Option<String>, what: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::validation(format!("{} is required", what))),
    }
}

/// A configuration document on disk. A temporary document is removed when
/// this value is dropped.
#[derive(Debug)]
pub struct WrittenConfig {
    path: PathBuf,
    task_count: usize,
    temp_dir: Option<TempDir>,
}

impl WrittenConfig {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn task_count(&self) -> usize {
        self.task_count
    }

    /// Keep a temporary document on disk and return its path
    pub fn persist(self) -> PathBuf {
        if let Some(dir) = self.temp_dir {
            let _ = dir.keep();
        }
        self.path
    }
}

/// One evaluation run over a validated configuration
#[derive(Debug, Clone)]
pub struct Evaluation {
    config: EvaluationConfig,
}

impl Evaluation {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Match system summaries to their model summaries
    pub fn resolve_tasks(&self) -> AppResult<Vec<EvalTask>> {
        Ok(resolve(&self.config.association_request())?)
    }

    /// Resolve tasks and write the configuration document.
    ///
    /// Nothing is written when resolution fails.
    pub fn write_config(&self) -> AppResult<WrittenConfig> {
        let tasks = self.resolve_tasks()?;

        let (path, temp_dir) = match &self.config.config_path {
            Some(path) => (path.clone(), None),
            None => {
                let dir = tempfile::tempdir()?;
                (dir.path().join(DEFAULT_CONFIG_FILE_NAME), Some(dir))
            }
        };

        write_document(&tasks, &self.config.system_dir, &self.config.model_dir, &path)?;

        Ok(WrittenConfig {
            path,
            task_count: tasks.len(),
            temp_dir,
        })
    }

    /// The ROUGE command for a written configuration document
    pub fn command(&self, config_path: &Path) -> RougeCommand {
        RougeCommand::new(
            &self.config.interpreter,
            &self.config.bin_path,
            self.config.effective_args(),
            config_path,
        )
    }

    /// Run ROUGE and return its raw report.
    pub async fn evaluate(&self) -> AppResult<String> {
        let written = self.write_config()?;
        let command = self.command(written.path());

        let mut invoker = ProcessInvoker::new();
        if let Some(limit) = self.config.timeout {
            invoker = invoker.with_timeout(limit);
        }

        Ok(invoker.invoke(&command).await?)
    }

    /// Run ROUGE and parse its report.
    pub async fn evaluate_to_results(&self) -> AppResult<ResultSet> {
        let output = self.evaluate().await?;
        let results = parse(&output);
        if results.is_empty() {
            tracing::warn!("[Evaluation] ROUGE output contained no score lines");
        }
        Ok(results)
    }

    /// Convert plain-text system and model summaries into ROUGE's HTML
    /// format in a temporary directory, then evaluate the converted copies.
    pub async fn convert_and_evaluate(&self) -> AppResult<String> {
        let workspace = tempfile::tempdir()?;
        let system_dir = workspace.path().join("system");
        let model_dir = workspace.path().join("model");
        tracing::info!(
            "[Evaluation] Processing summaries. Saving system files to {} and model files to {}.",
            system_dir.display(),
            model_dir.display()
        );
        convert_summaries_to_rouge_format(&self.config.system_dir, &system_dir)?;
        convert_summaries_to_rouge_format(&self.config.model_dir, &model_dir)?;

        let mut config = self.config.clone();
        config.system_dir = system_dir;
        config.model_dir = model_dir;
        Evaluation::new(config).evaluate().await
    }
}
