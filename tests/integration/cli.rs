//! Tests for the goup binary
//!
//! Every test runs serially: several of them write a fake `go` script and
//! execute it, which races with concurrent forks (ETXTBSY).

use super::common::{goup_command, index_json, toolchain_archive, write_config, PLATFORM_FILE};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    goup_command(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("config"));
}

#[test]
#[serial]
fn test_dry_run_conflicts_with_apply() {
    let temp = TempDir::new().unwrap();
    goup_command(temp.path())
        .args(["upgrade", "--dry-run", "--apply"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
#[serial]
fn test_config_path_honors_goup_home() {
    let temp = TempDir::new().unwrap();
    goup_command(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            temp.path().join("config.yaml").to_string_lossy().to_string(),
        ));
}

#[test]
#[serial]
fn test_config_init_then_show() {
    let temp = TempDir::new().unwrap();

    goup_command(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(temp.path().join("config.yaml").exists());

    goup_command(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry_run: true"))
        .stdout(predicate::str::contains("https://go.dev/dl/?mode=json&include=all"));
}

#[test]
#[serial]
fn test_config_init_refuses_overwrite() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "dry_run: false\n").unwrap();

    goup_command(temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    goup_command(temp.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
    let content = fs::read_to_string(temp.path().join("config.yaml")).unwrap();
    assert!(content.contains("dry_run: true"));
}

#[test]
#[serial]
fn test_invalid_config_prints_hint() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.yaml"), "request_timeout_secs: 0\n").unwrap();

    goup_command(temp.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("request_timeout_secs"))
        .stderr(predicate::str::contains("hint:"));
}

#[cfg(unix)]
mod with_toolchain {
    use super::super::common::install_fake_toolchain;
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn release_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dl/"))
            .and(query_param("mode", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_json()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/go/{}", PLATFORM_FILE)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(toolchain_archive("go1.22.3")))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_check_reports_newer_release() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("go1.21.0 -> go1.22.3"))
            .stdout(predicate::str::contains(PLATFORM_FILE));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_check_probes_goroot_from_env() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), None, true);

        goup_command(&temp.path().join("home"))
            .arg("check")
            .env("GOROOT", &goroot)
            .env("PATH", temp.path().join("empty-path"))
            .assert()
            .success()
            .stdout(predicate::str::contains("go1.21.0 -> go1.22.3"));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_list_probes_goroot_flag() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.22.3");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), None, true);

        goup_command(&temp.path().join("home"))
            .arg("list")
            .arg("--goroot")
            .arg(&goroot)
            .env("PATH", temp.path().join("empty-path"))
            .assert()
            .success()
            .stdout(predicate::str::contains("* go1.22.3"));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_check_up_to_date_exits_zero() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.22.3");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .arg("check")
            .assert()
            .success()
            .stdout(predicate::str::contains("already up to date"));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_check_unstable_from_env() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.22.3");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .arg("check")
            .env("GOUP_UNSTABLE", "true")
            .assert()
            .success()
            .stdout(predicate::str::contains("go1.22.3 -> go1.23rc1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_list_marks_installed() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .args(["list", "--unstable"])
            .assert()
            .success()
            .stdout(predicate::str::contains("go1.23rc1 (unstable)"))
            .stdout(predicate::str::contains("* go1.21.0"));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_upgrade_dry_run_leaves_goroot() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .arg("upgrade")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dry run"));

        assert_eq!(fs::read_to_string(goroot.join("VERSION")).unwrap(), "go1.21.0");
        assert!(!temp.path().join("go@go1.21.0").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_upgrade_apply_swaps_goroot() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");
        let server = release_server().await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), true);

        goup_command(&temp.path().join("home"))
            .args(["upgrade", "--apply", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed Go go1.22.3"));

        assert_eq!(fs::read_to_string(goroot.join("VERSION")).unwrap(), "go1.22.3");
        assert_eq!(
            fs::read_to_string(temp.path().join("go@go1.21.0").join("VERSION")).unwrap(),
            "go1.21.0"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    #[serial]
    async fn test_upgrade_missing_archive_fails() {
        let temp = TempDir::new().unwrap();
        let goroot = temp.path().join("go");
        install_fake_toolchain(&goroot, "go1.21.0");

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dl/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_json()))
            .mount(&server)
            .await;
        write_config(&temp.path().join("home"), &server.uri(), Some(&goroot), false);

        goup_command(&temp.path().join("home"))
            .args(["upgrade", "--yes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("404"));

        assert_eq!(fs::read_to_string(goroot.join("VERSION")).unwrap(), "go1.21.0");
    }
}
