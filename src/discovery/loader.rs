//! Token source loader - parses discovered files into token trees.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Result, TokensError};
use crate::tokens::{parse_tokens, TokenTree};

use super::scanner::{detect_format, ScanResult};

/// Loaded token trees keyed by source path, in discovery order.
pub type TokenSources = IndexMap<PathBuf, TokenTree>;

/// Load every scanned file.
///
/// All files are attempted; if any fail, a single error listing every
/// failure is returned and nothing is loaded.
pub fn load_sources(scan: &ScanResult) -> Result<TokenSources> {
    let mut sources = TokenSources::new();
    let mut errors: Vec<String> = Vec::new();

    for path in &scan.files {
        match load_source(path) {
            Ok(tree) => {
                log::debug!("{}: {} token(s)", path.display(), tree.leaf_count());
                sources.insert(path.clone(), tree);
            }
            Err(e) => {
                errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    if !errors.is_empty() {
        return Err(TokensError::Build {
            message: format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ),
            help: Some("Fix the errors above and try again".to_string()),
        });
    }

    Ok(sources)
}

/// Load a single token file.
///
/// The document root must be a mapping. Only top-level groups (mapping
/// values) are kept; top-level scalars and sequences are metadata such as
/// `"$schema"` or `"version"` and never produce variables.
pub fn load_source(path: &Path) -> Result<TokenTree> {
    let format = detect_format(path).ok_or_else(|| TokensError::Parse {
        message: format!("Unsupported token file: {}", path.display()),
        help: Some("Token files must end in .json, .yaml or .yml".to_string()),
    })?;

    let content = fs::read_to_string(path).map_err(|e| TokensError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    let tree = parse_tokens(&content, format)?;
    retain_groups(tree, format.name())
}

fn retain_groups(tree: TokenTree, format: &str) -> Result<TokenTree> {
    match tree {
        TokenTree::Node(mut children) => {
            children.retain(|key, child| {
                let keep = child.is_node();
                if !keep {
                    log::debug!("dropping top-level field '{}': not a token group", key);
                }
                keep
            });
            Ok(TokenTree::Node(children))
        }
        _ => Err(TokensError::Parse {
            message: format!("{} document root must be a mapping of token groups", format),
            help: Some("Wrap the tokens in an object, e.g. { \"color\": { ... } }".to_string()),
        }),
    }
}
