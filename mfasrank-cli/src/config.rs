/// Config file loading and creation for the mfasrank CLI.
///
/// Config lives at ~/.config/mfasrank/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug)]
pub struct MfasrankConfig {
    pub max_vertices: Option<usize>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub columns: ColumnConfig,
}

/// Column names of the answer CSV.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnConfig {
    pub segment: String,
    pub system1: String,
    pub system2: String,
    pub cmp: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            segment: "segmentId".to_string(),
            system1: "system1".to_string(),
            system2: "system2".to_string(),
            cmp: "cmp".to_string(),
        }
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# mfasrank configuration
# All values here can be overridden by CLI flags.

# Refuse segments that compare more systems than this.
# Exact ranking visits up to 2^n states per segment.
# max_vertices = 20

# Number of segments ranked in parallel
# jobs = 1

# Column names in the answer CSV
# [columns]
# segment = \"segmentId\"
# system1 = \"system1\"
# system2 = \"system2\"
# cmp = \"cmp\"
";

/// Returns the default config path: ~/.config/mfasrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("mfasrank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> MfasrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => MfasrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn parse_config(content: &str) -> Result<MfasrankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let cfg = parse_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(cfg.max_vertices, None);
        assert_eq!(cfg.jobs, None);
        assert_eq!(cfg.columns, ColumnConfig::default());
    }

    #[test]
    fn test_partial_columns_keep_defaults() {
        let cfg = parse_config("max_vertices = 12\n[columns]\ncmp = \"result\"\n").unwrap();
        assert_eq!(cfg.max_vertices, Some(12));
        assert_eq!(cfg.columns.cmp, "result");
        assert_eq!(cfg.columns.segment, "segmentId");
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml"));
        assert!(cfg.max_vertices.is_none());
    }
}
