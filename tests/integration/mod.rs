//! Integration Tests Module
//!
//! End-to-end tests for rouge-harness: directory scanning through
//! configuration documents, and the full pipeline against a stand-in ROUGE
//! script.

// Association resolution and configuration document tests
mod config_test;

// Full evaluation pipeline tests
mod pipeline_test;
