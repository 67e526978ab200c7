//! Evaluation Pipeline Integration Tests
//!
//! Runs the whole pipeline with `sh` standing in for perl and a shell script
//! standing in for ROUGE-1.5.5.pl.

#![cfg(unix)]

use std::fs;
use std::time::Duration;
use tempfile::TempDir;

use rouge_harness::{AppError, CoreError, Evaluation, EvaluationConfig, EvaluationConfigBuilder, Measure};

const REPORT: &str = "\
---------------------------------------------
1 ROUGE-1 Average_R: 0.50000 (95%-conf.int. 0.40000 - 0.60000)
1 ROUGE-1 Average_P: 0.25000 (95%-conf.int. 0.20000 - 0.30000)
1 ROUGE-1 Average_F: 0.33333 (95%-conf.int. 0.30000 - 0.36000)
---------------------------------------------
";

struct Setup {
    systems: TempDir,
    models: TempDir,
    home: TempDir,
}

fn setup(script: &str) -> Setup {
    let systems = tempfile::tempdir().unwrap();
    let models = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    fs::write(systems.path().join("sys-001.html"), "x").unwrap();
    fs::write(models.path().join("ref-001-A.html"), "x").unwrap();
    fs::write(home.path().join("ROUGE-1.5.5.pl"), script).unwrap();
    Setup { systems, models, home }
}

fn builder(s: &Setup) -> EvaluationConfigBuilder {
    EvaluationConfig::builder()
        .system_dir(s.systems.path())
        .model_dir(s.models.path())
        .rouge_home(s.home.path())
        .interpreter("sh")
        .system_pattern(r"sys-(\d+)\.html")
        .model_pattern(r"ref-#ID#-[A-Z]\.html")
}

#[tokio::test]
async fn test_pipeline_parses_report() {
    let s = setup(&format!("cat <<'REPORT'\n{}REPORT\n", REPORT));
    let evaluation = Evaluation::new(builder(&s).build().unwrap());

    let results = evaluation.evaluate_to_results().await.unwrap();
    assert_eq!(results.len(), 9);
    assert_eq!(results.get("rouge_1_recall"), Some(0.5));
    assert_eq!(results.score("ROUGE-1", Measure::FScore), Some(0.33333));
    assert_eq!(results.interval("ROUGE-1", Measure::Precision), Some((0.2, 0.3)));
}

#[tokio::test]
async fn test_pipeline_reads_generated_document() {
    // The stand-in counts EVAL elements in the file passed with -m
    let s = setup("for last; do :; done\ngrep -c '<EVAL ID=' \"$last\"\n");
    let evaluation = Evaluation::new(builder(&s).build().unwrap());

    let output = evaluation.evaluate().await.unwrap();
    assert_eq!(output.trim(), "1");
}

#[tokio::test]
async fn test_pipeline_custom_args() {
    let s = setup("echo \"$*\"\n");
    let evaluation = Evaluation::new(builder(&s).rouge_args("\"-n 2 -x\"").build().unwrap());

    let output = evaluation.evaluate().await.unwrap();
    let args: Vec<&str> = output.split_whitespace().collect();
    assert_eq!(&args[..3], &["-n", "2", "-x"]);
    assert_eq!(args[3], "-m");
}

#[tokio::test]
async fn test_pipeline_tool_failure() {
    let s = setup("echo 'Cannot open exception db file for reading' >&2\nexit 1\n");
    let evaluation = Evaluation::new(builder(&s).build().unwrap());

    let err = evaluation.evaluate().await.unwrap_err();
    match err {
        AppError::Core(CoreError::ExternalTool { exit_code, output }) => {
            assert_eq!(exit_code, Some(1));
            assert!(output.contains("exception db"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_pipeline_timeout() {
    let s = setup("sleep 5\n");
    let evaluation = Evaluation::new(
        builder(&s)
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap(),
    );

    let err = evaluation.evaluate().await.unwrap_err();
    assert!(matches!(err, AppError::Core(CoreError::Timeout { .. })));
}

#[tokio::test]
async fn test_pipeline_does_not_run_without_references() {
    // The stand-in would leave a marker file if it were ever started
    let s = setup("touch \"$(dirname \"$0\")/ran\"\n");
    fs::remove_file(s.models.path().join("ref-001-A.html")).unwrap();
    let evaluation = Evaluation::new(builder(&s).build().unwrap());

    let err = evaluation.evaluate().await.unwrap_err();
    assert!(matches!(err, AppError::Core(CoreError::MissingReferences { .. })));
    assert!(!s.home.path().join("ran").exists());
}
