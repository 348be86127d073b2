use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CATEGORY: &str = "general";
const CONFIG_FILE: &str = "udlex";
const ENV_PREFIX: &str = "UDLEX";

/// Defaults, then `udlex.toml` (optional), then `UDLEX_*` variables.
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Site root containing `articles/`.
    pub root: PathBuf,
    /// Category for structured records that do not name one.
    pub default_category: String,
    /// Where `search` loads the index from: a site root or an http(s) base URL.
    pub source: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Same layering with an explicit config file (extension optional).
    pub fn load_from(config_file: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("root", ".")?
            .set_default("default_category", DEFAULT_CATEGORY)?
            .add_source(File::with_name(config_file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_then_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let file = dir.path().join("udlex");
        std::fs::write(
            dir.path().join("udlex.toml"),
            "root = \"site\"\ndefault_category = \"from-file\"\n",
        )
        .unwrap();

        std::env::remove_var("UDLEX_DEFAULT_CATEGORY");
        let defaults = Settings::load_from(&missing.to_string_lossy()).unwrap();
        assert_eq!(defaults.root, PathBuf::from("."));
        assert_eq!(defaults.default_category, DEFAULT_CATEGORY);
        assert_eq!(defaults.source, None);

        let from_file = Settings::load_from(&file.to_string_lossy()).unwrap();
        assert_eq!(from_file.root, PathBuf::from("site"));
        assert_eq!(from_file.default_category, "from-file");

        std::env::set_var("UDLEX_DEFAULT_CATEGORY", "from-env");
        let from_env = Settings::load_from(&file.to_string_lossy());
        std::env::remove_var("UDLEX_DEFAULT_CATEGORY");
        let from_env = from_env.unwrap();
        assert_eq!(from_env.root, PathBuf::from("site"));
        assert_eq!(from_env.default_category, "from-env");
    }
}
