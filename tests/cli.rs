//! Process-level tests for the fetchcount binary
//!
//! The default URL list cannot be changed, so these runs route every request
//! through a proxy address with nothing listening. No external network
//! access is needed.

use std::net::TcpListener;
use std::process::{Command, Output};

/// Proxy URL on a port that was just freed, so every connect is refused
fn closed_proxy() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// The binary with a clean environment and all traffic sent to `proxy`
fn fetchcount(proxy: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fetchcount"));
    for var in [
        "NO_PROXY",
        "no_proxy",
        "ALL_PROXY",
        "all_proxy",
        "RUST_LOG",
        "FETCHCOUNT__HTTP__REQUEST_TIMEOUT_MS",
        "FETCHCOUNT__HTTP__USER_AGENT",
        "FETCHCOUNT__HTTP__SYSTEM_PROXY",
    ] {
        cmd.env_remove(var);
    }
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy"] {
        cmd.env(var, proxy);
    }
    cmd
}

fn run(cmd: &mut Command) -> (Output, String, String) {
    let output = cmd.output().expect("Failed to start fetchcount");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    (output, stdout, stderr)
}

#[test]
fn test_transport_failure_exits_with_error() {
    let proxy = closed_proxy();
    let (output, stdout, stderr) = run(&mut fetchcount(&proxy));

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(
        stderr.contains("failed to make an http request: "),
        "stderr: {}",
        stderr
    );
    assert!(!stdout.contains("Total:"), "stdout: {}", stdout);
    assert!(!stderr.contains("Run completed"));
}

#[test]
fn test_zero_timeout_exits_before_any_request() {
    let proxy = closed_proxy();
    let (output, stdout, stderr) = run(
        fetchcount(&proxy).env("FETCHCOUNT__HTTP__REQUEST_TIMEOUT_MS", "0"),
    );

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("ZeroRequestTimeout"), "stderr: {}", stderr);
    assert!(!stderr.contains("failed to make an http request"));
    assert!(stdout.is_empty(), "stdout: {}", stdout);
}

#[test]
fn test_version_flag() {
    let (output, stdout, _) = run(Command::new(env!("CARGO_BIN_EXE_fetchcount")).arg("--version"));

    assert!(output.status.success());
    assert!(stdout.starts_with("fetchcount "));
}
