//! End-to-end job execution through `ImportService` with real processes.
#![cfg(unix)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use import_gateway::exec::{BoundedExecutor, CommandResolver};
use import_gateway::service::ImportService;
use import_gateway::wire::{Command, ImportRequest, ImportResponse};
use import_gateway_test_utils::scripts::ScriptDir;
use import_gateway_test_utils::{init_tracing, with_timeout};

fn service(
    import: impl Into<PathBuf>,
    reindex: impl Into<PathBuf>,
    deadline: Duration,
) -> ImportService {
    ImportService::new(
        CommandResolver::new(import, reindex),
        Arc::new(BoundedExecutor::new()),
        deadline,
    )
}

#[tokio::test]
async fn import_success_returns_captured_output() {
    init_tracing();
    let scripts = ScriptDir::new();
    let import = scripts.write_script(
        "import",
        concat!(
            "[ \"$1\" = \"--source\" ] || exit 9\n",
            "[ \"$2\" = \"region.osm\" ] || exit 9\n",
            "printf done",
        ),
    );
    let svc = service(import, scripts.missing("reindex"), Duration::from_secs(10));

    let response = with_timeout(svc.run_import(ImportRequest::new(
        Command::Import,
        ["--source", "region.osm"],
    )))
    .await;

    assert_eq!(
        response,
        ImportResponse {
            stdout: "done".into(),
            stderr: String::new(),
            exit_code: 0,
        }
    );
}

#[tokio::test]
async fn missing_reindex_binary_reports_launch_error() {
    init_tracing();
    let scripts = ScriptDir::new();
    let import = scripts.write_script("import", "exit 0");
    let reindex = scripts.missing("reindex");
    let svc = service(import, reindex.clone(), Duration::from_secs(10));

    let response = with_timeout(svc.run_import(ImportRequest::new(
        Command::Reindex,
        Vec::<String>::new(),
    )))
    .await;

    assert_eq!(response.stdout, "");
    assert_eq!(response.exit_code, 1);
    assert!(!response.stderr.is_empty());
    assert!(
        response.stderr.contains(&reindex.display().to_string()),
        "stderr should name the binary: {}",
        response.stderr
    );
}

#[tokio::test]
async fn failing_job_passes_exit_code_and_streams_through() {
    init_tracing();
    let scripts = ScriptDir::new();
    let reindex = scripts.write_script(
        "reindex",
        "echo 'indexed 10 docs'\necho 'index missing' >&2\nexit 2",
    );
    let svc = service(scripts.missing("import"), reindex, Duration::from_secs(10));

    let response = with_timeout(svc.run_import(ImportRequest::new(
        Command::Reindex,
        ["--index", "pelias"],
    )))
    .await;

    assert_eq!(response.stdout, "indexed 10 docs\n");
    assert_eq!(response.stderr, "index missing\n");
    assert_eq!(response.exit_code, 2);
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn deadline_kills_job_and_reports_timeout() {
    init_tracing();
    let scripts = ScriptDir::new();
    let pid_file = scripts.path().join("pid");
    let import = scripts.write_script(
        "import",
        &format!("echo $$ > '{}'\necho working\nexec sleep 30", pid_file.display()),
    );
    let svc = service(import, scripts.missing("reindex"), Duration::from_millis(500));

    let started = Instant::now();
    let response = with_timeout(svc.run_import(ImportRequest::new(
        Command::Import,
        Vec::<String>::new(),
    )))
    .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        response,
        ImportResponse {
            stdout: String::new(),
            stderr: "Import command timed out".into(),
            exit_code: 124,
        }
    );

    let pid = std::fs::read_to_string(&pid_file).unwrap();
    let proc_entry = PathBuf::from(format!("/proc/{}", pid.trim()));
    assert!(!proc_entry.exists(), "job process {} still running", pid.trim());
}

#[tokio::test]
async fn concurrent_jobs_do_not_share_output() {
    init_tracing();
    let scripts = ScriptDir::new();
    let import = scripts.write_script("import", "sleep 0.2\necho \"out:$1\"\necho \"err:$1\" >&2");
    let svc = Arc::new(service(import, scripts.missing("reindex"), Duration::from_secs(10)));

    let a = {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move {
            svc.run_import(ImportRequest::new(Command::Import, ["north"])).await
        })
    };
    let b = {
        let svc = Arc::clone(&svc);
        tokio::spawn(async move {
            svc.run_import(ImportRequest::new(Command::Import, ["south"])).await
        })
    };

    let (a, b) = with_timeout(async { (a.await.unwrap(), b.await.unwrap()) }).await;

    assert_eq!(a.stdout, "out:north\n");
    assert_eq!(a.stderr, "err:north\n");
    assert_eq!(b.stdout, "out:south\n");
    assert_eq!(b.stderr, "err:south\n");
    assert_eq!((a.exit_code, b.exit_code), (0, 0));
}

#[tokio::test]
async fn non_utf8_output_is_reported_as_failure() {
    init_tracing();
    let scripts = ScriptDir::new();
    let import = scripts.write_script("import", "printf 'a\\377b'");
    let svc = service(import, scripts.missing("reindex"), Duration::from_secs(10));

    let response = with_timeout(svc.run_import(ImportRequest::new(
        Command::Import,
        Vec::<String>::new(),
    )))
    .await;

    assert_eq!(response.stdout, "");
    assert_eq!(response.exit_code, 1);
    assert!(
        response.stderr.contains("UTF-8"),
        "stderr should describe the decode error: {}",
        response.stderr
    );
}
