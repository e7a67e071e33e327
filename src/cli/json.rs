//! `json` command: flatten token files into flat JSON objects.
//!
//! JSON output never carries a selector or a prefix.

use std::path::Path;

use clap::Args;

use crate::config::Target;
use crate::error::Result;
use crate::output::Printer;

use super::generate::{generate, GenerateArgs};

/// Generate flat JSON variable maps from token files
#[derive(Args, Debug, Default)]
pub struct JsonArgs {
    #[command(flatten)]
    pub common: GenerateArgs,
}

pub fn run(args: JsonArgs, printer: &Printer) -> Result<()> {
    let root = std::env::current_dir()?;
    run_in(args, &root, printer)
}

fn run_in(args: JsonArgs, root: &Path, printer: &Printer) -> Result<()> {
    generate(Target::Json, args.common.to_partial(), root, printer).map(|_| ())
}
