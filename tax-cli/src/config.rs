//! Regime configuration loading.
//!
//! The built-in FY 2025-26 regime is used unless a TOML file is supplied. The
//! file uses the same layout that `advance-tax config` prints.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tax_core::RegimeConfig;
use tracing::info;

/// Parses and validates a regime from TOML text.
pub fn parse_regime(text: &str) -> Result<RegimeConfig> {
    let config: RegimeConfig = toml::from_str(text).context("invalid regime TOML")?;
    config.validate().context("regime failed validation")?;
    Ok(config)
}

/// Loads the regime from `path`, or the built-in one when no path is given.
pub fn load_regime(path: Option<&Path>) -> Result<RegimeConfig> {
    let Some(path) = path else {
        return Ok(RegimeConfig::builtin().clone());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read regime file: {}", path.display()))?;
    let config =
        parse_regime(&text).with_context(|| format!("in regime file: {}", path.display()))?;

    info!(
        path = %path.display(),
        assessment_year = %config.assessment_year,
        "loaded regime override"
    );
    Ok(config)
}

/// Renders a regime in the layout [`parse_regime`] accepts.
pub fn regime_toml(config: &RegimeConfig) -> Result<String> {
    toml::to_string_pretty(config).context("cannot render regime as TOML")
}
