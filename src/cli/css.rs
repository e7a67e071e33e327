//! `css` command: flatten token files into CSS custom properties.

use std::path::Path;

use clap::Args;

use crate::config::{PartialOptions, Target};
use crate::error::Result;
use crate::output::Printer;

use super::generate::{generate, GenerateArgs};

/// Generate CSS custom properties from token files
#[derive(Args, Debug, Default)]
pub struct CssArgs {
    #[command(flatten)]
    pub common: GenerateArgs,

    /// Selector wrapping the generated properties (default: :root)
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Prefix inserted after `--` in every property name
    #[arg(short, long)]
    pub prefix: Option<String>,
}

impl CssArgs {
    pub fn to_partial(&self) -> PartialOptions {
        PartialOptions {
            selector: self.selector.clone(),
            prefix: self.prefix.clone(),
            ..self.common.to_partial()
        }
    }
}

pub fn run(args: CssArgs, printer: &Printer) -> Result<()> {
    let root = std::env::current_dir()?;
    run_in(args, &root, printer)
}

fn run_in(args: CssArgs, root: &Path, printer: &Printer) -> Result<()> {
    generate(Target::Css, args.to_partial(), root, printer).map(|_| ())
}
