use goup::config::Config;
use goup::core::GoupResult;
use goup::di::ServiceContainer;
use goup::updater::Updater;
use std::path::PathBuf;

pub async fn run(unstable: bool, goroot: Option<PathBuf>) -> GoupResult<()> {
    let config = Config::load()?;
    let options = config.select_options(unstable);
    let container = ServiceContainer::with_config(config, goroot.as_deref())?;

    let plan = Updater::new(&container).plan(&options).await?;

    println!(
        "New version available: {} -> {}",
        plan.installed.version, plan.file.version
    );
    println!("  file: {}", plan.file.filename);
    println!("  url:  {}", container.config.download_url(&plan.file.filename));
    println!("\nRun `goup upgrade --apply` to install it.");

    Ok(())
}
