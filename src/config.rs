//! Runtime configuration
//!
//! Defaults, then `<config_dir>/cafe-finder/config.json`, then `CAFE_*`
//! environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_SEARCH_URL: &str = "https://46hnny0f46.execute-api.ap-northeast-1.amazonaws.com/dev/test";
pub const DEFAULT_HISTORY_URL: &str = "https://6kasisg23f.execute-api.ap-northeast-1.amazonaws.com/dev/test";
pub const DEFAULT_USER_ID: &str = "1";
pub const DEFAULT_KEYWORD_PREFIX: &str = "カフェ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub search_url: String,
    pub history_url: String,
    /// Sent with every request; there is no login.
    pub user_id: String,
    /// Prepended to every search keyword, separated by one space.
    pub keyword_prefix: String,
}

/// Partial config as it appears on disk; absent keys keep the current value.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    search_url: Option<String>,
    history_url: Option<String>,
    user_id: Option<String>,
    keyword_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            keyword_prefix: DEFAULT_KEYWORD_PREFIX.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(path) = config_path() {
            config.apply_file(&path);
        }
        config.apply_env(|key| env::var(key).ok());

        config
    }

    fn apply_file(&mut self, path: &Path) {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return;
            }
        };

        match serde_json::from_str::<FileConfig>(&raw) {
            Ok(file) => {
                info!("Loaded config from {}", path.display());
                self.merge(file);
            }
            Err(e) => warn!("Ignoring invalid config {}: {}", path.display(), e),
        }
    }

    fn merge(&mut self, file: FileConfig) {
        let FileConfig { search_url, history_url, user_id, keyword_prefix } = file;
        set_if_some(&mut self.search_url, search_url);
        set_if_some(&mut self.history_url, history_url);
        set_if_some(&mut self.user_id, user_id);
        set_if_some(&mut self.keyword_prefix, keyword_prefix);
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| {
            lookup(key).filter(|v| !v.is_empty()).inspect(|v| {
                info!("{key} set, using {v}");
            })
        };
        set_if_some(&mut self.search_url, var("CAFE_SEARCH_URL"));
        set_if_some(&mut self.history_url, var("CAFE_HISTORY_URL"));
        set_if_some(&mut self.user_id, var("CAFE_USER_ID"));
        set_if_some(&mut self.keyword_prefix, var("CAFE_KEYWORD_PREFIX"));
    }

    /// Keyword exactly as the search service expects it.
    pub fn prefixed_keyword(&self, keyword: &str) -> String {
        format!("{} {}", self.keyword_prefix, keyword)
    }
}

fn set_if_some(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cafe-finder").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.user_id, "1");
        assert_eq!(config.keyword_prefix, "カフェ");
    }

    #[test]
    fn test_prefixed_keyword_keeps_input_verbatim() {
        let config = Config::default();
        assert_eq!(config.prefixed_keyword("渋谷"), "カフェ 渋谷");
        assert_eq!(config.prefixed_keyword(""), "カフェ ");
        assert_eq!(config.prefixed_keyword("  two  spaces "), "カフェ   two  spaces ");
    }

    #[test]
    fn test_file_then_env() {
        let mut config = Config::default();
        config.merge(serde_json::from_str(r#"{"user_id": "42", "search_url": "http://file"}"#).unwrap());

        let env: HashMap<&str, &str> = [("CAFE_SEARCH_URL", "http://env"), ("CAFE_USER_ID", "")].into();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.search_url, "http://env");
        // Empty env values are ignored.
        assert_eq!(config.user_id, "42");
        assert_eq!(config.history_url, DEFAULT_HISTORY_URL);
    }

    #[test]
    fn test_missing_and_invalid_file_keep_defaults() {
        let dir = std::env::temp_dir().join(format!("cafe-finder-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut config = Config::default();
        config.apply_file(&dir.join("absent.json"));
        assert_eq!(config, Config::default());

        let bad = dir.join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        config.apply_file(&bad);
        assert_eq!(config, Config::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
