//! An interrupt must end the run immediately, with a notice and exit 1.

#![cfg(unix)]

use std::io::{BufRead, BufReader, Read};
use std::os::unix::fs::PermissionsExt;
use std::process::{Command, Stdio};

use distship::config::{ENV_HOST, ENV_PASSWORD, ENV_PATH, ENV_USER};

/// Put a fake `pnpm` on PATH that announces itself and then hangs, so
/// the run is reliably inside the build step when the signal lands.
fn stub_pnpm(dir: &std::path::Path) {
    let path = dir.join("pnpm");
    std::fs::write(&path, "#!/bin/sh\necho building\nsleep 30\n").unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

#[test]
fn sigint_cancels_the_run_with_a_notice_and_nonzero_exit() {
    let tmp = tempfile::tempdir().unwrap();
    stub_pnpm(tmp.path());

    let path_var = format!(
        "{}:{}",
        tmp.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let mut child = Command::new(env!("CARGO_BIN_EXE_distship"))
        .current_dir(tmp.path())
        .env(ENV_HOST, "example.com")
        .env(ENV_USER, "deploy")
        .env(ENV_PATH, "/var/www/site")
        .env(ENV_PASSWORD, "secret")
        .env("PATH", path_var)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // Wait for the stub build to report in, so the handler is installed
    // and the pipeline is mid-step before the signal is sent.
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut line = String::new();
    stdout.read_line(&mut line).unwrap();
    assert_eq!(line.trim(), "building");

    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }

    let status = child.wait().unwrap();

    let mut stderr = String::new();
    child
        .stderr
        .take()
        .unwrap()
        .read_to_string(&mut stderr)
        .unwrap();

    assert!(!status.success());
    assert_eq!(status.code(), Some(1));
    assert!(
        stderr.contains("deploy cancelled"),
        "missing cancellation notice, stderr was: {}",
        stderr
    );

    // No later step ran: nothing was archived in the working directory.
    let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tar.gz"))
        .collect();
    assert!(leftovers.is_empty());
}
