//! Token tree model and source document parsing.

mod convert;
mod tree;

pub use convert::{parse_tokens, SourceFormat};
pub use tree::{Scalar, TokenTree};
