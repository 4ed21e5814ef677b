//! Reporter output and exit status for whole checking runs.

#![cfg(unix)]

use boj_checker::cli::{self, Reporter, SessionOutcome};
use boj_checker::constants::exit_status;
use boj_checker::judge::{CommandTemplate, ExecutionLimits, LanguageDescriptor, LanguageRegistry};
use boj_checker::models::SampleCase;

fn sh_registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::empty();
    registry.insert_override(
        "sh",
        LanguageDescriptor::Scripted {
            run: CommandTemplate::new(["sh", "{source_path}"]),
        },
    );
    registry
}

async fn run_check(
    file_name: &str,
    body: &str,
    samples: &[SampleCase],
) -> (String, SessionOutcome) {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join(file_name);
    std::fs::write(&source, body).unwrap();

    let mut reporter = Reporter::plain(Vec::new());
    let outcome = cli::check(
        &source,
        samples,
        &sh_registry(),
        &dir.path().join("work"),
        ExecutionLimits::default(),
        &mut reporter,
    )
    .await
    .unwrap();

    (String::from_utf8(reporter.into_inner()).unwrap(), outcome)
}

#[tokio::test]
async fn test_all_accepted() {
    let samples = [SampleCase::new("1 2\n", "3\n"), SampleCase::new("3 4\n", "7\n")];
    let (out, outcome) = run_check("sum.sh", "read a b\necho $((a + b))\n", &samples).await;

    assert_eq!(
        out,
        "Testing code for 2 samples\n\
         Testing sample #1: AC\n\
         Testing sample #2: AC\n\
         2/2 samples passed\n"
    );
    assert_eq!(outcome.exit_status(), exit_status::ALL_ACCEPTED);
}

#[tokio::test]
async fn test_wrong_answer_prints_outputs() {
    let samples = [SampleCase::new("1 2\n", "3\n")];
    let (out, outcome) = run_check("sub.sh", "read a b\necho $((a - b))\n", &samples).await;

    assert!(out.starts_with("Testing code for 1 sample\nTesting sample #1: WA\n"));
    assert!(out.contains("Expected output >>>\n3\n"));
    assert!(out.contains("Actual output >>>\n-1\n"));
    assert!(out.ends_with("0/1 samples passed\n"));
    assert_eq!(outcome.exit_status(), exit_status::SAMPLE_FAILED);
}

#[tokio::test]
async fn test_unknown_language_marker() {
    let samples = [SampleCase::new("", "1\n")];
    let (out, outcome) = run_check("main.kt", "fun main() {}", &samples).await;

    assert_eq!(
        out,
        "Testing code for 1 sample\nTesting sample #1: Unknown language\n"
    );
    assert!(matches!(outcome, SessionOutcome::Fatal(_)));
    assert_eq!(outcome.exit_status(), exit_status::FATAL);
}
