//! tokens-to - Design token flattener
//!
//! A library for turning nested design-token trees (JSON or YAML) into flat
//! CSS custom properties or flat JSON variable maps.
//!
//! ```
//! use tokens_to::{Flattener, TokenTree};
//!
//! let tree = TokenTree::node().with(
//!     "color",
//!     TokenTree::node().with("black", TokenTree::leaf("#000")),
//! );
//!
//! let mut flattener = Flattener::new();
//! flattener.set_prefix("ds");
//! flattener.resolve(&tree);
//!
//! assert_eq!(flattener.raw_string(), "{--ds-color-black: #000;}");
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod error;
pub mod flatten;
pub mod output;
pub mod tokens;
pub mod validation;

pub use config::{Configuration, GenerationOptions, PartialOptions, Target};
pub use discovery::{discover, resolve_sources, DiscoveryResult, ScanResult, TokenSources};
pub use emit::{format_css, format_json, FileSink, OutputFormat};
pub use error::{Result, TokensError};
pub use flatten::{flatten, BatchReport, BatchResolver, Flattener, OutputMode, OutputSink};
pub use tokens::{parse_tokens, Scalar, SourceFormat, TokenTree};
pub use validation::{validate_options, Diagnostic, Severity, ValidationResult};
