pub mod completions;
pub mod css;
pub mod generate;
pub mod json;

use clap::{Parser, Subcommand};

/// tokens-to - Flatten design token files into CSS custom properties or JSON
#[derive(Parser, Debug)]
#[command(name = "tokens-to")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate CSS custom properties from token files
    Css(css::CssArgs),

    /// Generate flat JSON variable maps from token files
    Json(json::JsonArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
