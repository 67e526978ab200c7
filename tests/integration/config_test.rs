//! Configuration Synthesis Integration Tests
//!
//! Builds system/model directories on disk and checks the tasks and
//! configuration documents produced from them.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use rouge_harness::{AppError, CoreError, Evaluation, EvaluationConfig, PeerEntry, VariantAlignment};
use rouge_harness_matching::{resolve, AssociationRequest};
use rouge_harness_runner::generate;

// ============================================================================
// Helper Functions
// ============================================================================

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), "<html></html>").unwrap();
    }
}

fn rouge_home() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    fs::write(home.path().join("ROUGE-1.5.5.pl"), "exit 0\n").unwrap();
    home
}

/// The two-document scenario: 001 has two references, 002 has one
fn scenario() -> (TempDir, TempDir) {
    let systems = tempfile::tempdir().unwrap();
    let models = tempfile::tempdir().unwrap();
    touch(systems.path(), &["sys-002.html", "sys-001.html", "README"]);
    touch(models.path(), &["ref-002-A.html", "ref-001-B.html", "ref-001-A.html"]);
    (systems, models)
}

fn scenario_request(systems: &TempDir, models: &TempDir) -> AssociationRequest {
    AssociationRequest::new(
        systems.path(),
        r"sys-(\d+)\.html",
        models.path(),
        r"ref-#ID#-[A-Z]\.html",
    )
}

// ============================================================================
// Association
// ============================================================================

#[test]
fn test_two_document_scenario() {
    let (systems, models) = scenario();
    let tasks = resolve(&scenario_request(&systems, &models)).unwrap();

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].peers, vec![PeerEntry::single("sys-001.html")]);
    assert_eq!(tasks[0].references, vec!["ref-001-A.html", "ref-001-B.html"]);
    assert_eq!(tasks[1].peers, vec![PeerEntry::single("sys-002.html")]);
    assert_eq!(tasks[1].references, vec!["ref-002-A.html"]);
}

#[test]
fn test_empty_system_directory() {
    let systems = tempfile::tempdir().unwrap();
    let models = tempfile::tempdir().unwrap();
    touch(models.path(), &["ref-001-A.html"]);

    let err = resolve(&scenario_request(&systems, &models)).unwrap_err();
    assert!(matches!(err, CoreError::NoCandidates { .. }));
}

#[test]
fn test_candidate_without_references() {
    let (systems, models) = scenario();
    touch(systems.path(), &["sys-003.html"]);

    let err = resolve(&scenario_request(&systems, &models)).unwrap_err();
    match err {
        CoreError::MissingReferences { identifier, .. } => assert_eq!(identifier, "003"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_multi_variant_directory() {
    let systems = tempfile::tempdir().unwrap();
    let models = tempfile::tempdir().unwrap();
    touch(
        systems.path(),
        &[
            "P14-1.xhtml.html.01",
            "P14-2.xhtml.html.01",
            "P14-1.xhtml.html.02",
            "P14-2.xhtml.html.02",
        ],
    );
    touch(models.path(), &["p14-1.xhtml.A.html", "p14-1.xhtml.B.html", "p14-2.xhtml.A.html"]);

    let request = AssociationRequest::new(
        systems.path(),
        r"P14-(\d+)\.xhtml\.html",
        models.path(),
        r"p14-#ID#\.xhtml\.[A-Z]\.html",
    )
    .with_variants(vec!["01".to_string(), "02".to_string()]);

    let tasks = resolve(&request).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].peers.len(), 2);
    assert_eq!(tasks[0].references.len(), 2);

    let doc = generate(&tasks, systems.path(), models.path()).unwrap();
    assert!(doc.contains("<P ID=\"01\">P14-1.xhtml.html.01</P>"));
    assert!(doc.contains("<P ID=\"02\">P14-2.xhtml.html.02</P>"));
}

// ============================================================================
// Configuration Document
// ============================================================================

#[test]
fn test_document_is_byte_identical_across_runs() {
    let (systems, models) = scenario();
    let render = || {
        let tasks = resolve(&scenario_request(&systems, &models)).unwrap();
        generate(&tasks, systems.path(), models.path()).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_document_reference_counts() {
    let (systems, models) = scenario();
    let tasks = resolve(&scenario_request(&systems, &models)).unwrap();
    let doc = generate(&tasks, systems.path(), models.path()).unwrap();

    let second_task = doc.split("<EVAL ID=\"2\">").nth(1).unwrap();
    let first_task = doc.split("<EVAL ID=\"2\">").next().unwrap();
    assert_eq!(first_task.matches("<M ID=").count(), 2);
    assert_eq!(second_task.matches("<M ID=").count(), 1);
    assert!(first_task.contains("<M ID=\"B\">ref-001-B.html</M>"));
}

#[test]
fn test_evaluation_write_config_to_path() {
    let (systems, models) = scenario();
    let home = rouge_home();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("rouge_conf.xml");

    let config = EvaluationConfig::builder()
        .system_dir(systems.path())
        .model_dir(models.path())
        .rouge_home(home.path())
        .system_pattern(r"sys-(\d+)\.html")
        .model_pattern(r"ref-#ID#-[A-Z]\.html")
        .config_path(&target)
        .build()
        .unwrap();

    let written = Evaluation::new(config).write_config().unwrap();
    assert_eq!(written.task_count(), 2);
    let doc = fs::read_to_string(&target).unwrap();
    assert!(doc.contains(&format!("<PEER-ROOT>{}</PEER-ROOT>", systems.path().display())));
    assert!(doc.contains(&format!("<MODEL-ROOT>{}</MODEL-ROOT>", models.path().display())));
}

#[test]
fn test_misaligned_variants_fail_by_default() {
    let systems = tempfile::tempdir().unwrap();
    let models = tempfile::tempdir().unwrap();
    let home = rouge_home();
    touch(systems.path(), &["s-1.txt.a", "s-2.txt.a", "s-1.txt.b", "s-3.txt.b"]);
    touch(models.path(), &["m-1", "m-2", "m-3"]);

    let builder = EvaluationConfig::builder()
        .system_dir(systems.path())
        .model_dir(models.path())
        .rouge_home(home.path())
        .system_pattern(r"s-(\d+)\.txt")
        .model_pattern("m-#ID#")
        .variants(vec!["a".to_string(), "b".to_string()]);

    let err = Evaluation::new(builder.clone().build().unwrap())
        .write_config()
        .unwrap_err();
    assert!(matches!(err, AppError::Core(CoreError::VariantMismatch(_))));

    let written = Evaluation::new(builder.alignment(VariantAlignment::Positional).build().unwrap())
        .write_config()
        .unwrap();
    assert_eq!(written.task_count(), 2);
}
