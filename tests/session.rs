//! End-to-end judging sessions using `sh` as the solution language.

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::{StreamExt, TryStreamExt};

use boj_checker::AppError;
use boj_checker::judge::{
    self, CommandTemplate, ExecutionLimits, LanguageDescriptor, LanguageRegistry, Session, Verdict,
};
use boj_checker::models::SampleCase;

fn registry(compile_log: &Path) -> LanguageRegistry {
    let mut registry = LanguageRegistry::empty();
    registry.insert_override(
        "sh",
        LanguageDescriptor::Scripted {
            run: CommandTemplate::new(["sh", "{source_path}"]),
        },
    );
    registry.insert_override(
        "shc",
        LanguageDescriptor::Compiled {
            compile: CommandTemplate::new([
                "sh".to_string(),
                "-c".to_string(),
                r#"echo built >> "$2" && cp "$0" "$1" && chmod +x "$1""#.to_string(),
                "{source_path}".to_string(),
                "{exec_path}".to_string(),
                compile_log.display().to_string(),
            ]),
            run: CommandTemplate::new(["{exec_path}"]),
        },
    );
    registry.insert_override(
        "bad",
        LanguageDescriptor::Compiled {
            compile: CommandTemplate::new(["sh", "-c", "echo 'syntax error' >&2; exit 3"]),
            run: CommandTemplate::new(["{exec_path}"]),
        },
    );
    registry
}

struct Fixture {
    dir: tempfile::TempDir,
    registry: LanguageRegistry,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(&dir.path().join("compile.log"));
        Self { dir, registry }
    }

    fn source(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn workspace_root(&self) -> PathBuf {
        self.dir.path().join("workspaces")
    }

    fn workspaces_left(&self) -> usize {
        match std::fs::read_dir(self.workspace_root()) {
            Ok(entries) => entries.count(),
            Err(_) => 0,
        }
    }

    fn compile_count(&self) -> usize {
        std::fs::read_to_string(self.dir.path().join("compile.log"))
            .map(|log| log.lines().count())
            .unwrap_or(0)
    }
}

fn samples(pairs: &[(&str, &str)]) -> Vec<SampleCase> {
    pairs
        .iter()
        .map(|(input, output)| SampleCase::new(*input, *output))
        .collect()
}

#[tokio::test]
async fn test_accepted_session_removes_workspace() {
    let fx = Fixture::new();
    let source = fx.source("echo.sh", "cat\n");
    let samples = samples(&[("1 1\n", "1 1\n"), ("2\r\n3\r\n", "2\n3\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let results = session.evaluate_all().await.unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.verdict == Verdict::Accepted));
    assert_eq!(results[1].sample_number, 2);
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_compiles_once_per_session() {
    let fx = Fixture::new();
    let source = fx.source("sum.shc", "#!/bin/sh\nread a b\necho $((a + b))\n");
    let samples = samples(&[("1 1\n", "2\n"), ("2 3\n", "5\n"), ("4 4\n", "9\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let verdicts: Vec<_> = session
        .evaluate_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.verdict)
        .collect();

    assert_eq!(
        verdicts,
        [Verdict::Accepted, Verdict::Accepted, Verdict::WrongAnswer]
    );
    assert_eq!(fx.compile_count(), 1);
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_verdicts_follow_timeout_exit_code_output_order() {
    let fx = Fixture::new();
    let source = fx.source(
        "judge.sh",
        r#"read n
case "$n" in
  1) echo 1 ;;
  2) echo 2; exit 4 ;;
  3) sleep 5; echo 3 ;;
  *) echo nope ;;
esac
"#,
    );
    let samples = samples(&[("1\n", "1\n"), ("2\n", "2\n"), ("3\n", "3\n"), ("4\n", "4\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root()).with_limits(
        ExecutionLimits {
            compile_timeout: Duration::from_secs(10),
            run_timeout: Duration::from_millis(500),
        },
    );
    let results = session.evaluate_all().await.unwrap();
    let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();

    assert_eq!(
        verdicts,
        [
            Verdict::Accepted,
            Verdict::RuntimeError,
            Verdict::TimeLimitExceeded,
            Verdict::WrongAnswer,
        ]
    );
    assert_eq!(results[1].execution.exit_code, 4);
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_compile_failure_is_fatal_and_cleans_up() {
    let fx = Fixture::new();
    let source = fx.source("main.bad", "whatever");
    let samples = samples(&[("1\n", "1\n"), ("2\n", "2\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let mut verdicts = std::pin::pin!(session.evaluate());

    match verdicts.next().await {
        Some(Err(AppError::CompilationFailed { exit_code, stderr })) => {
            assert_eq!(exit_code, 3);
            assert!(stderr.contains("syntax error"));
        }
        other => panic!("expected compilation failure, got {other:?}"),
    }
    assert!(verdicts.next().await.is_none());
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_unknown_extension_is_fatal_and_cleans_up() {
    let fx = Fixture::new();
    let source = fx.source("main.xyz", "print(1)");
    let samples = samples(&[("", "1\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let result = session.evaluate_all().await;

    assert!(matches!(result, Err(AppError::UnsupportedLanguage(ext)) if ext == "xyz"));
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_dropping_stream_early_cleans_up() {
    let fx = Fixture::new();
    let source = fx.source("echo.sh", "cat\n");
    let samples = samples(&[("a\n", "a\n"), ("b\n", "b\n"), ("c\n", "c\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    {
        let mut verdicts = Box::pin(session.evaluate());
        let first = verdicts.next().await.unwrap().unwrap();
        assert_eq!(first.verdict, Verdict::Accepted);
        assert_eq!(fx.workspaces_left(), 1);
    }

    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_evaluating_again_restarts_from_first_sample() {
    let fx = Fixture::new();
    let source = fx.source("sum.shc", "#!/bin/sh\nread a b\necho $((a + b))\n");
    let samples = samples(&[("1 2\n", "3\n"), ("5 5\n", "10\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let first = session.evaluate_all().await.unwrap();
    let second = session.evaluate_all().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second[0].sample_number, 1);
    assert_eq!(fx.compile_count(), 2);
}

#[tokio::test]
async fn test_empty_sample_list_builds_nothing() {
    let fx = Fixture::new();
    let source = fx.source("sum.shc", "#!/bin/sh\necho 1\n");

    let session = Session::new(&source, &[], &fx.registry, fx.workspace_root());
    let results = session.evaluate_all().await.unwrap();

    assert!(results.is_empty());
    assert_eq!(fx.compile_count(), 0);
}

#[tokio::test]
async fn test_evaluate_with_default_limits() {
    let fx = Fixture::new();
    let source = fx.source("sum.shc", "#!/bin/sh\nread a b\necho $((a + b))\n");
    let samples = samples(&[("1 2\n", "3\n"), ("2 2\n", "5\n")]);

    let results: Vec<_> =
        judge::evaluate(&source, &samples, &fx.registry, &fx.workspace_root())
            .try_collect()
            .await
            .unwrap();

    let verdicts: Vec<_> = results.iter().map(|r| r.verdict).collect();
    assert_eq!(verdicts, [Verdict::Accepted, Verdict::WrongAnswer]);
    assert_eq!(fx.compile_count(), 1);
    assert_eq!(fx.workspaces_left(), 0);
}

#[tokio::test]
async fn test_non_utf8_source_name_is_passed_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let fx = Fixture::new();
    let source = fx.dir.path().join(OsStr::from_bytes(b"sol\xff.sh"));
    std::fs::write(&source, "cat\n").unwrap();
    let samples = samples(&[("1 1\n", "1 1\n")]);

    let session = Session::new(&source, &samples, &fx.registry, fx.workspace_root());
    let results = session.evaluate_all().await.unwrap();

    assert_eq!(results[0].verdict, Verdict::Accepted, "{:?}", results[0].execution);
    assert_eq!(fx.workspaces_left(), 0);
}
