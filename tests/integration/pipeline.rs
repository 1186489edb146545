//! End-to-end upgrade pipeline against in-memory collaborators

use super::common::{index_json, toolchain_archive, PLATFORM_FILE};
use goup::core::GoupError;
use goup::di::mocks::{MockReleaseSource, MockToolchainProbe};
use goup::release::{InstalledVersion, Release, SelectOptions};
use goup::updater::{Updater, UpgradeOptions};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn releases() -> Vec<Release> {
    serde_json::from_str(&index_json()).unwrap()
}

fn updater(source: &MockReleaseSource, installed: &str, goroot: &Path) -> Updater {
    Updater::with_providers(
        Arc::new(source.clone()),
        Arc::new(MockToolchainProbe::new(
            InstalledVersion::new("linux", "amd64", installed),
            goroot,
        )),
    )
}

fn archive_only() -> SelectOptions {
    SelectOptions {
        include_unstable: false,
        kind: Some("archive".to_string()),
    }
}

#[tokio::test]
async fn test_full_upgrade() {
    let temp = TempDir::new().unwrap();
    let goroot = temp.path().join("go");
    fs::create_dir_all(&goroot).unwrap();
    fs::write(goroot.join("VERSION"), "go1.21.0").unwrap();

    let source = MockReleaseSource::new(releases());
    source.add_archive(PLATFORM_FILE, toolchain_archive("go1.22.3"));
    let updater = updater(&source, "go1.21.0", &goroot);

    let options = UpgradeOptions {
        select: archive_only(),
        dry_run: false,
        goroot: Some(goroot.clone()),
    };
    let plan = updater.plan(&options.select).await.unwrap();
    assert_eq!(plan.file.filename, PLATFORM_FILE);

    let goroot = updater.resolve_goroot(&options).unwrap();
    let staged = updater.stage(&plan, &goroot, options.dry_run).await.unwrap();
    let outcome = updater.install(&plan, staged, &goroot).unwrap();

    assert_eq!(outcome.goroot, goroot);
    assert_eq!(fs::read_to_string(goroot.join("VERSION")).unwrap(), "go1.22.3");
    assert!(goroot.join("bin").join("go").is_file());
    assert_eq!(
        fs::read_to_string(temp.path().join("go@go1.21.0").join("VERSION")).unwrap(),
        "go1.21.0"
    );
}

#[tokio::test]
async fn test_second_upgrade_refuses_existing_backup() {
    let temp = TempDir::new().unwrap();
    let goroot = temp.path().join("go");
    fs::create_dir_all(&goroot).unwrap();
    fs::write(goroot.join("VERSION"), "go1.21.0").unwrap();
    fs::create_dir_all(temp.path().join("go@go1.21.0")).unwrap();

    let source = MockReleaseSource::new(releases());
    source.add_archive(PLATFORM_FILE, toolchain_archive("go1.22.3"));
    let updater = updater(&source, "go1.21.0", &goroot);

    let plan = updater.plan(&archive_only()).await.unwrap();
    let staged = updater.stage(&plan, &goroot, false).await.unwrap();
    let result = updater.install(&plan, staged, &goroot);

    assert!(matches!(result, Err(GoupError::Install(_))));
    assert_eq!(fs::read_to_string(goroot.join("VERSION")).unwrap(), "go1.21.0");
}

#[tokio::test]
async fn test_kind_filter_skips_source_tarball() {
    let source = MockReleaseSource::new(releases());
    // The source tarball has no os/arch, so only the archive can match
    let updater = updater(&source, "go1.21.0", Path::new("/unused"));

    let plan = updater.plan(&SelectOptions::default()).await.unwrap();
    assert_eq!(plan.file.kind, "archive");
}

#[tokio::test]
async fn test_unparsable_installed_version() {
    let source = MockReleaseSource::new(releases());
    let updater = updater(&source, "devel", Path::new("/unused"));

    let result = updater.plan(&archive_only()).await;
    assert!(matches!(result, Err(GoupError::Parse(_))));
    assert!(source.downloads().is_empty());
}
