mod support;

use std::fs;
use std::net::TcpListener;

use tempfile::tempdir;

use support::{run_logsurge, spawn_http_server};

fn failure_context(output: &std::process::Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_checks_pass_against_200() -> Result<(), String> {
    let (url, _server) = spawn_http_server("200 OK")?;

    let output = run_logsurge([
        "-u",
        &url,
        "-t",
        "2",
        "--vus",
        "3",
        "--think-time",
        "100ms",
    ])?;
    if !output.status.success() {
        return Err(failure_context(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Check 'status is 200':") {
        return Err(format!("Missing check line.\n{}", failure_context(&output)));
    }
    if !stdout.contains(", 0 failed (") {
        return Err(format!(
            "Expected no failed checks.\n{}",
            failure_context(&output)
        ));
    }
    if stdout.contains("Iterations: 0") {
        return Err(format!(
            "Expected at least one iteration.\n{}",
            failure_context(&output)
        ));
    }
    Ok(())
}

#[test]
fn e2e_500_fails_checks_but_run_completes() -> Result<(), String> {
    let (url, _server) = spawn_http_server("500 Internal Server Error")?;

    let output = run_logsurge([
        "-u",
        &url,
        "-t",
        "2",
        "--vus",
        "2",
        "--think-time",
        "100ms",
    ])?;
    if !output.status.success() {
        return Err(failure_context(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Check 'status is 200': 0 passed,") {
        return Err(format!(
            "Expected every check to fail.\n{}",
            failure_context(&output)
        ));
    }
    if !stdout.contains("(0.00%)") {
        return Err(format!(
            "Expected a 0.00% pass rate.\n{}",
            failure_context(&output)
        ));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_endpoint_still_completes() -> Result<(), String> {
    // Reserve a port, then drop the listener so every connect is refused.
    let listener =
        TcpListener::bind("127.0.0.1:0").map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("local_addr failed: {}", err))?;
    drop(listener);

    let url = format!("http://{}/log", addr);
    let output = run_logsurge([
        "-u",
        &url,
        "-t",
        "1",
        "--vus",
        "2",
        "--think-time",
        "100ms",
        "--connect-timeout",
        "1s",
    ])?;
    if !output.status.success() {
        return Err(failure_context(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Check 'status is 200': 0 passed,") {
        return Err(format!(
            "Expected every check to fail.\n{}",
            failure_context(&output)
        ));
    }
    if stdout.contains("Transport Errors: 0") {
        return Err(format!(
            "Expected transport errors to be tallied.\n{}",
            failure_context(&output)
        ));
    }
    Ok(())
}

#[test]
fn e2e_expected_status_override() -> Result<(), String> {
    let (url, _server) = spawn_http_server("204 No Content")?;

    let output = run_logsurge([
        "-u",
        &url,
        "-t",
        "1",
        "--vus",
        "1",
        "--think-time",
        "100ms",
        "--status",
        "204",
    ])?;
    if !output.status.success() {
        return Err(failure_context(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Check 'status is 204':") {
        return Err(format!(
            "Expected check against 204.\n{}",
            failure_context(&output)
        ));
    }
    if !stdout.contains(", 0 failed (") {
        return Err(format!(
            "Expected no failed checks.\n{}",
            failure_context(&output)
        ));
    }
    Ok(())
}

#[test]
fn e2e_config_file_run() -> Result<(), String> {
    let (url, _server) = spawn_http_server("200 OK")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let config_path = dir.path().join("logsurge.toml");
    let config = format!(
        r#"url = "{url}"
vus = 2
duration = 1
think_time = "100ms"

[payload]
event_value = "CAM_ID : 7"
"#,
        url = url
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;

    let output = run_logsurge([
        "--config".to_owned(),
        config_path.to_string_lossy().into_owned(),
    ])?;
    if !output.status.success() {
        return Err(failure_context(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Virtual Users: 2") {
        return Err(format!(
            "Expected config vus to apply.\n{}",
            failure_context(&output)
        ));
    }
    if !stdout.contains(", 0 failed (") {
        return Err(format!(
            "Expected no failed checks.\n{}",
            failure_context(&output)
        ));
    }
    Ok(())
}
