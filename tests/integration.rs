//! Integration tests running the dnshole binary.
//!
//! Only local list files are used, so no network access is needed.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run dnshole with `args` and return its output
fn run_dnshole(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dnshole"))
        .args(args)
        .output()
        .expect("Failed to execute dnshole")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_help_command() {
    let output = run_dnshole(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--insecure-ssl"));
}

#[test]
fn test_version_command() {
    let output = run_dnshole(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dnshole"));
}

#[test]
fn test_missing_hosts_argument() {
    let output = run_dnshole(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_bad_config_fails_with_location() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let hosts = dir.path().join("hosts");
    std::fs::write(&config, "concurrency 2\nlist 1 ads.txt\n").unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&["--config", path_str(&config), path_str(&hosts)]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(":2: unknown directive: list"), "stderr: {}", stderr);
    assert_eq!(
        std::fs::read_to_string(&hosts).unwrap(),
        "127.0.0.1 localhost\n"
    );
}

#[test]
fn test_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let hosts = dir.path().join("hosts");
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&[
        "--config",
        path_str(&dir.path().join("missing.conf")),
        path_str(&hosts),
    ]);
    assert!(!output.status.success());
}

#[test]
fn test_output_to_stdout() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let ads = dir.path().join("ads.txt");
    let hosts = dir.path().join("hosts");
    std::fs::write(&ads, "0.0.0.0 tracker.io\n0.0.0.0 example-ad.com\n").unwrap();
    std::fs::write(&config, format!("blocklist 2 {}\n", ads.display())).unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&[
        "-q",
        "--config",
        path_str(&config),
        "--output",
        "-",
        path_str(&hosts),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(
        "127.0.0.1 localhost\n\n\
         # ==== dnshole ==== Do not edit this line or following lines.\n\
         # They are automatically generated by dnshole.\n\
         # Generated "
    ));
    assert!(stdout.ends_with("\n\n0.0.0.0 example-ad.com\n0.0.0.0 tracker.io\n"));
    assert_eq!(
        std::fs::read_to_string(&hosts).unwrap(),
        "127.0.0.1 localhost\n"
    );
}

#[test]
fn test_rewrites_hosts_in_place_by_default() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let ads = dir.path().join("ads.txt");
    let hosts = dir.path().join("hosts");
    std::fs::write(&ads, "example-ad.com\n").unwrap();
    std::fs::write(&config, format!("blocklist 1 {}\n", ads.display())).unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&["--config", path_str(&config), path_str(&hosts)]);

    assert!(output.status.success());
    let written = std::fs::read_to_string(&hosts).unwrap();
    assert!(written.ends_with("\n0.0.0.0 example-ad.com\n"));
}

#[test]
fn test_missing_local_list_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let hosts = dir.path().join("hosts");
    std::fs::write(&config, "blocklist 1 /nonexistent/dnshole/ads.txt\n").unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&["--config", path_str(&config), path_str(&hosts)]);

    assert!(!output.status.success());
    assert_eq!(
        std::fs::read_to_string(&hosts).unwrap(),
        "127.0.0.1 localhost\n"
    );
}

#[test]
fn test_generated_stamp_uses_zone_abbreviation() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let ads = dir.path().join("ads.txt");
    let hosts = dir.path().join("hosts");
    std::fs::write(&ads, "example-ad.com\n").unwrap();
    std::fs::write(&config, format!("blocklist 1 {}\n", ads.display())).unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dnshole"))
        .env("TZ", "XST+07")
        .args([
            "-q",
            "--config",
            path_str(&config),
            "--output",
            "-",
            path_str(&hosts),
        ])
        .output()
        .expect("Failed to execute dnshole");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stamp = stdout
        .lines()
        .find(|l| l.starts_with("# Generated "))
        .expect("no generated line");
    assert!(stamp.ends_with(" XST"), "stamp: {}", stamp);
}

#[test]
fn test_unreachable_list_warns_and_continues() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("dnshole.conf");
    let ads = dir.path().join("ads.txt");
    let hosts = dir.path().join("hosts");
    std::fs::write(&ads, "example-ad.com\n").unwrap();
    std::fs::write(
        &config,
        format!("blocklist 1 http://127.0.0.1:1/x\nblocklist 1 {}\n", ads.display()),
    )
    .unwrap();
    std::fs::write(&hosts, "127.0.0.1 localhost\n").unwrap();

    let output = run_dnshole(&[
        "--config",
        path_str(&config),
        "--output",
        "-",
        path_str(&hosts),
    ]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARN"), "stderr: {}", stderr);
    assert!(stderr.contains("http://127.0.0.1:1/x"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.ends_with("\n\n0.0.0.0 example-ad.com\n"));
}
