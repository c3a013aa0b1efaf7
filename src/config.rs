use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "supplier-finder.json";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Where the supplier workbook lives.
///
/// ```json
/// { "workbook": "Pivot Table.xlsx", "sheet": "Sheet1" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub workbook: PathBuf,
    pub sheet: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("Pivot Table.xlsx"),
            sheet: "Sheet1".to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `path`; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(settings)
    }
}
