use anyhow::{Context, Result};
use folioscan_ingest::ParseOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::{config_path, ensure_folioscan_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub parser: ParseOptions,
    #[serde(default)]
    pub pdf: PdfSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// One of csv, json, dicts, table
    pub format: String,
    /// Where timestamped CSV files go when no --output is given
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfSection {
    /// Environment variable holding the statement password
    pub password_env: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            directory: PathBuf::from("."),
        }
    }
}

impl Default for PdfSection {
    fn default() -> Self {
        Self {
            password_env: "FOLIOSCAN_PDF_PASSWORD".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_folioscan_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
