
use std::fs;

use tempfile::tempdir;

use support_single::run_apifuzz;
use support_single::spawn_http_server_or_skip;

#[test]
fn e2e_single_url_mode() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };

    let output = run_apifuzz(["-u", url.as_str(), "-m", "get", "-n", "3"])?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    if server.hits() != 3 {
        return Err(format!("Expected 3 requests, saw {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_dropped_connections_do_not_abort_the_run() -> Result<(), String> {
    let Some((url, server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };

    // The stub closes `/drop` sockets without responding, so every attempt
    // fails at the transport layer. The run must still finish cleanly.
    let target = format!("{url}/drop");
    let output = run_apifuzz(["-u", target.as_str(), "-n", "2"])?;
    if !output.status.success() {
        return Err(format!(
            "Transport failures must stay attempt-scoped\nstderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    if server.hits() != 2 {
        return Err(format!("Expected 2 requests, saw {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_file_mode_verbose() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };

    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let endpoints = dir.path().join("endpoints.txt");
    fs::write(&endpoints, format!("{url}/search, GET\n{url}/login,POST\n"))
        .map_err(|err| format!("write endpoints failed: {}", err))?;

    let path = endpoints.to_string_lossy().into_owned();
    let output = run_apifuzz(["-f", path.as_str(), "-n", "2", "-v"])?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    Ok(())
}

#[test]
fn e2e_missing_endpoint_file_fails() -> Result<(), String> {
    let output = run_apifuzz(["-f", "/nonexistent/apifuzz-endpoints.txt"])?;
    if output.status.success() {
        return Err("Missing endpoint file must abort the run".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_no_source_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let bin = option_env!("CARGO_BIN_EXE_apifuzz")
        .ok_or_else(|| "CARGO_BIN_EXE_apifuzz missing at compile time.".to_owned())?;
    // Run from an empty directory so no default config can supply a target.
    let output = std::process::Command::new(bin)
        .args(["-n", "2"])
        .current_dir(dir.path())
        .env("RUST_LOG", "error")
        .output()
        .map_err(|err| format!("run apifuzz failed: {}", err))?;
    if output.status.success() {
        return Err("A run without --file or --url must fail".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_strict_methods_aborts_on_patch() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip()? else {
        return Ok(());
    };

    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let endpoints = dir.path().join("endpoints.txt");
    fs::write(&endpoints, format!("{url}/p,PATCH\n{url}/ok,GET\n"))
        .map_err(|err| format!("write endpoints failed: {}", err))?;
    let path = endpoints.to_string_lossy().into_owned();

    // Lenient mode skips the PATCH record and still fuzzes the GET target.
    let lenient = run_apifuzz(["-f", path.as_str(), "-n", "1"])?;
    if !lenient.status.success() {
        return Err("Lenient mode must continue past a PATCH record".to_owned());
    }

    let strict = run_apifuzz(["-f", path.as_str(), "-n", "1", "--strict-methods"])?;
    if strict.status.success() {
        return Err("Strict mode must abort on a PATCH record".to_owned());
    }
    Ok(())
}
