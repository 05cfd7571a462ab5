use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$FOLIOSCAN_HOME`, else `~/.folioscan`
pub fn folioscan_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FOLIOSCAN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".folioscan"))
}

pub fn ensure_folioscan_home() -> Result<PathBuf> {
    let dir = folioscan_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(folioscan_home()?.join("config.toml"))
}
