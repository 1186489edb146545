use goup::config::Config;
use goup::core::path::config_file;
use goup::core::{GoupError, GoupResult};

pub fn show() -> GoupResult<()> {
    let config = Config::load()?;
    let content = serde_yaml::to_string(&config)
        .map_err(|e| GoupError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", content);
    Ok(())
}

pub fn init(force: bool) -> GoupResult<()> {
    let path = config_file()?;
    if path.exists() && !force {
        return Err(GoupError::Config(format!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    let path = Config::default().save()?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

pub fn path() -> GoupResult<()> {
    println!("{}", config_file()?.display());
    Ok(())
}
