//! Project configuration (`tokens-to.config.json`) and option layering.
//!
//! Options come from three layers, highest precedence first: command-line
//! flags, the project configuration file, built-in defaults. Layering is
//! per field, so a config file that only sets `prefix` keeps every other
//! default.
//!
//! ```json
//! {
//!   "css": { "sources": ["tokens/**/*.json"], "prefix": "ds", "bundled": false },
//!   "json": { "outDir": "./build/tokens" }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokensError};

/// The name of the configuration file looked up in the project root.
pub const CONFIG_FILENAME: &str = "tokens-to.config.json";

pub const DEFAULT_OUT_FILE_NAME: &str = "tokens";
pub const DEFAULT_CSS_OUT_DIR: &str = "./dist/css";
pub const DEFAULT_JSON_OUT_DIR: &str = "./dist/json";
pub const DEFAULT_SELECTOR: &str = ":root";

/// Which artifact a command generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Css,
    Json,
}

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::Css => "css",
            Target::Json => "json",
        }
    }

    fn default_out_dir(&self) -> &'static str {
        match self {
            Target::Css => DEFAULT_CSS_OUT_DIR,
            Target::Json => DEFAULT_JSON_OUT_DIR,
        }
    }
}

/// One layer of generation options; unset fields fall through to the next
/// layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    /// File paths, directories or glob patterns of token sources.
    pub sources: Option<Vec<String>>,
    /// Output file name (without extension) for bundled output.
    pub out_file_name: Option<String>,
    /// Directory for output files.
    pub out_dir: Option<PathBuf>,
    /// Merge all sources into a single output file.
    pub bundled: Option<bool>,
    /// CSS selector wrapping the declarations (CSS only).
    pub selector: Option<String>,
    /// Prefix prepended to every variable name (CSS only).
    pub prefix: Option<String>,
}

impl PartialOptions {
    /// Fill unset fields of `self` from `fallback`.
    pub fn or(self, fallback: PartialOptions) -> PartialOptions {
        PartialOptions {
            sources: self.sources.or(fallback.sources),
            out_file_name: self.out_file_name.or(fallback.out_file_name),
            out_dir: self.out_dir.or(fallback.out_dir),
            bundled: self.bundled.or(fallback.bundled),
            selector: self.selector.or(fallback.selector),
            prefix: self.prefix.or(fallback.prefix),
        }
    }
}

/// Contents of `tokens-to.config.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub css: PartialOptions,
    pub json: PartialOptions,
}

impl Configuration {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TokensError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read configuration: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| TokensError::Parse {
            message: format!("Invalid configuration: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Look for the configuration file in `root`.
    ///
    /// Returns `Ok(None)` when there is no file.
    pub fn find(root: &Path) -> Result<Option<Self>> {
        let path = root.join(CONFIG_FILENAME);
        if !path.exists() {
            log::debug!("no {} in {}", CONFIG_FILENAME, root.display());
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// The layer for a given target.
    pub fn for_target(&self, target: Target) -> &PartialOptions {
        match target {
            Target::Css => &self.css,
            Target::Json => &self.json,
        }
    }
}

/// Fully resolved options for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub target: Target,
    pub sources: Vec<String>,
    pub out_file_name: String,
    pub out_dir: PathBuf,
    pub bundled: bool,
    pub selector: String,
    pub prefix: String,
}

impl GenerationOptions {
    /// Built-in defaults for a target.
    pub fn defaults(target: Target) -> Self {
        Self {
            target,
            sources: Vec::new(),
            out_file_name: DEFAULT_OUT_FILE_NAME.to_string(),
            out_dir: PathBuf::from(target.default_out_dir()),
            bundled: true,
            selector: DEFAULT_SELECTOR.to_string(),
            prefix: String::new(),
        }
    }

    /// Layer command-line options over the configuration file over defaults.
    ///
    /// JSON output has no selector and never prefixes names, so those two
    /// fields are ignored for [`Target::Json`].
    pub fn resolve(target: Target, config: &Configuration, cli: PartialOptions) -> Self {
        let merged = cli.or(config.for_target(target).clone());
        let defaults = Self::defaults(target);

        let (selector, prefix) = match target {
            Target::Css => (
                merged.selector.unwrap_or(defaults.selector),
                merged.prefix.unwrap_or(defaults.prefix),
            ),
            Target::Json => (defaults.selector, defaults.prefix),
        };

        Self {
            target,
            sources: merged.sources.unwrap_or(defaults.sources),
            out_file_name: merged.out_file_name.unwrap_or(defaults.out_file_name),
            out_dir: merged.out_dir.unwrap_or(defaults.out_dir),
            bundled: merged.bundled.unwrap_or(defaults.bundled),
            selector,
            prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_css_defaults() {
        let options = GenerationOptions::defaults(Target::Css);

        assert!(options.sources.is_empty());
        assert_eq!(options.out_file_name, "tokens");
        assert_eq!(options.out_dir, PathBuf::from("./dist/css"));
        assert!(options.bundled);
        assert_eq!(options.selector, ":root");
        assert_eq!(options.prefix, "");
    }

    #[test]
    fn test_json_defaults() {
        let options = GenerationOptions::defaults(Target::Json);
        assert_eq!(options.out_dir, PathBuf::from("./dist/json"));
    }

    #[test]
    fn test_parse_full_configuration() {
        let config = Configuration::parse(
            r#"{
                "css": {
                    "sources": ["tokens/*.json"],
                    "outFileName": "variables",
                    "outDir": "./build/css",
                    "bundled": false,
                    "selector": ".theme",
                    "prefix": "ds"
                },
                "json": { "outDir": "./build/json" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.css.sources, Some(vec!["tokens/*.json".to_string()]));
        assert_eq!(config.css.out_file_name.as_deref(), Some("variables"));
        assert_eq!(config.css.bundled, Some(false));
        assert_eq!(config.css.prefix.as_deref(), Some("ds"));
        assert_eq!(config.json.out_dir, Some(PathBuf::from("./build/json")));
        assert_eq!(config.json.sources, None);
    }

    #[test]
    fn test_parse_empty_configuration() {
        let config = Configuration::parse("{}").unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_parse_invalid_configuration() {
        let result = Configuration::parse(r#"{"css": {"bundled": "yes"}}"#);
        assert!(matches!(result, Err(TokensError::Parse { .. })));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = Configuration::parse(r#"{"css": {"prefix": "ds"}}"#).unwrap();
        let options = GenerationOptions::resolve(Target::Css, &config, PartialOptions::default());

        assert_eq!(options.prefix, "ds");
        assert_eq!(options.selector, ":root");
        assert_eq!(options.out_file_name, "tokens");
        assert!(options.bundled);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Configuration::parse(
            r#"{"css": {"sources": ["a/*.json"], "outDir": "./from-config", "bundled": false}}"#,
        )
        .unwrap();
        let cli = PartialOptions {
            sources: Some(vec!["b.json".to_string()]),
            bundled: Some(true),
            ..Default::default()
        };

        let options = GenerationOptions::resolve(Target::Css, &config, cli);

        assert_eq!(options.sources, vec!["b.json".to_string()]);
        assert!(options.bundled);
        assert_eq!(options.out_dir, PathBuf::from("./from-config"));
    }

    #[test]
    fn test_json_ignores_selector_and_prefix() {
        let config = Configuration::parse(r#"{"json": {"prefix": "ds", "selector": ".x"}}"#).unwrap();
        let cli = PartialOptions {
            prefix: Some("cli".to_string()),
            ..Default::default()
        };

        let options = GenerationOptions::resolve(Target::Json, &config, cli);

        assert_eq!(options.prefix, "");
        assert_eq!(options.selector, ":root");
    }

    #[test]
    fn test_find_missing_configuration() {
        let dir = tempdir().unwrap();
        assert_eq!(Configuration::find(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_find_configuration() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"json": {"outFileName": "tokens-map"}}"#,
        )
        .unwrap();

        let config = Configuration::find(dir.path()).unwrap().unwrap();
        assert_eq!(config.json.out_file_name.as_deref(), Some("tokens-map"));
    }
}
