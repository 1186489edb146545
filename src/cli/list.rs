use goup::config::Config;
use goup::core::GoupResult;
use goup::di::ServiceContainer;
use goup::release::available_for;
use goup::updater::Updater;
use std::path::PathBuf;

pub async fn run(unstable: bool, goroot: Option<PathBuf>) -> GoupResult<()> {
    let config = Config::load()?;
    let options = config.select_options(unstable);
    let container = ServiceContainer::with_config(config, goroot.as_deref())?;
    let updater = Updater::new(&container);

    let installed = updater.installed_version()?;
    let releases = updater.releases().await?;
    let available = available_for(&releases, &installed, &options);

    if available.is_empty() {
        println!("No releases found for {}.", installed.platform());
        return Ok(());
    }

    println!("Releases for {}:", installed.platform());
    for release in available {
        let marker = if release.version == installed.version {
            "*"
        } else {
            " "
        };
        let label = if release.stable { "" } else { " (unstable)" };
        println!("  {} {}{}", marker, release.version, label);
    }

    Ok(())
}
