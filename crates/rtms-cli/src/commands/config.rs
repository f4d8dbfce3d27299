use anyhow::{Context, Result};
use rtms_core::config::AppConfig;
use rtms_infrastructure::ConfigService;

/// Prints the effective configuration (file, environment and flags) as TOML.
pub fn show(service: &ConfigService, config: &AppConfig) -> Result<()> {
    println!("# {}", service.path().display());
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Writes a config file with default values unless one exists.
pub fn init(service: &ConfigService) -> Result<()> {
    let path = service.path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, AppConfig::default().to_toml_string()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Wrote {}", path.display());
    Ok(())
}
