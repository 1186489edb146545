use dialoguer::Confirm;
use goup::config::Config;
use goup::core::{GoupError, GoupResult};
use goup::di::ServiceContainer;
use goup::updater::{Updater, UpgradeOptions};
use std::path::PathBuf;

pub struct UpgradeArgs {
    pub unstable: bool,
    pub dry_run: bool,
    pub apply: bool,
    pub yes: bool,
    pub goroot: Option<PathBuf>,
}

impl UpgradeArgs {
    /// Resolve flags against the loaded config. `--apply` wins over everything.
    fn options(&self, config: &Config) -> UpgradeOptions {
        let dry_run = if self.apply {
            false
        } else {
            self.dry_run || config.dry_run
        };

        UpgradeOptions {
            select: config.select_options(self.unstable),
            dry_run,
            goroot: self.goroot.clone().or_else(|| config.goroot.clone()),
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

pub async fn run(args: UpgradeArgs) -> GoupResult<()> {
    let config = Config::load()?;
    let options = args.options(&config);
    let container = ServiceContainer::with_config(config, options.goroot.as_deref())?;
    let updater = Updater::new(&container);

    let plan = updater.plan(&options.select).await?;
    let goroot = updater.resolve_goroot(&options)?;

    println!(
        "Upgrading Go {} -> {} ({})",
        plan.installed.version, plan.file.version, plan.file.filename
    );

    let staged = updater
        .stage_until(&plan, &goroot, options.dry_run, interrupted())
        .await?;

    println!(
        "✓ Extracted {} files and {} directories ({} bytes)",
        staged.summary.files, staged.summary.directories, staged.summary.bytes
    );
    if staged.summary.skipped > 0 {
        println!("  skipped {} unsupported entries", staged.summary.skipped);
    }

    if options.dry_run {
        println!("Dry run: GOROOT {} left untouched.", goroot.display());
        println!("Run with --apply to install.");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Replace {} with {}?",
                goroot.display(),
                plan.file.version
            ))
            .default(false)
            .interact()
            .map_err(|e| GoupError::Config(format!("Failed to read input: {}", e)))?;

        if !confirmed {
            return Err(GoupError::Aborted("upgrade declined".to_string()));
        }
    }

    let outcome = updater.install(&plan, staged, &goroot)?;

    if let Some(backup) = outcome.backup {
        println!("  previous toolchain kept at {}", backup.display());
    }
    println!("✓ Installed Go {} into {}", plan.file.version, outcome.goroot.display());

    Ok(())
}
