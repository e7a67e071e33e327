//! Validation of resolved generation options.
//!
//! Runs before any source is discovered; a single error aborts the command
//! so that no partial output is ever written.

mod diagnostic;

pub use diagnostic::{Diagnostic, Severity, ValidationResult};

use crate::config::{GenerationOptions, Target, CONFIG_FILENAME};
use crate::error::{Result, TokensError};

/// Run all option checks.
pub fn validate_options(options: &GenerationOptions) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_out_file_name(options, &mut result);
    check_sources(options, &mut result);
    if options.target == Target::Css {
        check_selector(options, &mut result);
    }

    result
}

/// Turn a validation result with errors into a fatal error.
pub fn ensure_valid(result: &ValidationResult) -> Result<()> {
    if !result.has_errors() {
        return Ok(());
    }

    let details: Vec<String> = result
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.message.clone())
        .collect();

    Err(TokensError::Options {
        message: format!("Command line option errors: {}", details.join("; ")),
        help: result
            .iter()
            .find(|d| d.severity == Severity::Error)
            .and_then(|d| d.help.clone()),
    })
}

fn check_out_file_name(options: &GenerationOptions, result: &mut ValidationResult) {
    let name = options.out_file_name.trim();

    if name.is_empty() {
        result.push(
            Diagnostic::error(
                "tokens-to::options::out-file-name",
                "outFileName must not be empty",
            )
            .with_help("Pass --out-file-name or remove the empty value from the configuration"),
        );
    } else if name.ends_with('.') {
        result.push(
            Diagnostic::error(
                "tokens-to::options::out-file-name",
                format!("outFileName '{}' should not end with a dot", name),
            )
            .with_help("The extension is added automatically; drop the trailing dot"),
        );
    }
}

fn check_sources(options: &GenerationOptions, result: &mut ValidationResult) {
    if options.sources.is_empty() {
        result.push(
            Diagnostic::error("tokens-to::options::sources", "no token sources given")
                .with_help(format!(
                    "Pass files or glob patterns, or set \"{}.sources\" in {}",
                    options.target.name(),
                    CONFIG_FILENAME
                )),
        );
    }
}

fn check_selector(options: &GenerationOptions, result: &mut ValidationResult) {
    if options.selector.trim().is_empty() {
        result.push(Diagnostic::warning(
            "tokens-to::options::selector",
            "selector is empty; declarations will not be scoped",
        ));
    }
}
