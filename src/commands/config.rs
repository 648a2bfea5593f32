//! Config file command handlers.

use std::path::Path;

use super::CommandResult;
use analogsense::Config;

/// Print where the config is read from
pub fn config_path(path: &Path) -> CommandResult {
    println!("{}", path.display());
    Ok(())
}

/// Write the default config
pub fn init_config(path: &Path, force: bool) -> CommandResult {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
