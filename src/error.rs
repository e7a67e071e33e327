use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tokens-to operations
#[derive(Error, Diagnostic, Debug)]
pub enum TokensError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tokens_to::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tokens_to::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tokens_to::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid pattern: {message}")]
    #[diagnostic(code(tokens_to::pattern))]
    Pattern {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Illegal options: {message}")]
    #[diagnostic(code(tokens_to::options))]
    Options {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(tokens_to::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TokensError>;
