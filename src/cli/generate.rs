//! Shared generation pipeline for the `css` and `json` commands.
//!
//! Layers options, validates them, discovers and loads token sources, then
//! runs the batch resolver into a file sink.

use std::path::Path;

use clap::Args;

use crate::config::{Configuration, GenerationOptions, PartialOptions, Target};
use crate::discovery::discover;
use crate::emit::FileSink;
use crate::error::{Result, TokensError};
use crate::flatten::{BatchReport, BatchResolver, OutputMode};
use crate::output::{display_path, plural, Printer};
use crate::validation::{ensure_valid, validate_options};

/// Options shared by every generating command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Token files, directories or glob patterns (default: configured sources)
    pub files: Vec<String>,

    /// Output file name for bundled output, without extension
    #[arg(short = 'o', long)]
    pub out_file_name: Option<String>,

    /// Output directory
    #[arg(short = 'd', long)]
    pub out_dir: Option<std::path::PathBuf>,

    /// Bundle all sources into one file (use --bundled=false for one file per source)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub bundled: Option<bool>,
}

impl GenerateArgs {
    /// The command-line layer of the options.
    pub fn to_partial(&self) -> PartialOptions {
        PartialOptions {
            sources: if self.files.is_empty() {
                None
            } else {
                Some(self.files.clone())
            },
            out_file_name: self.out_file_name.clone(),
            out_dir: self.out_dir.clone(),
            bundled: self.bundled,
            selector: None,
            prefix: None,
        }
    }
}

/// Run a full generation for `target` in project directory `root`.
pub fn generate(
    target: Target,
    cli: PartialOptions,
    root: &Path,
    printer: &Printer,
) -> Result<BatchReport> {
    let config = load_configuration(root, printer);
    let options = GenerationOptions::resolve(target, &config, cli);
    log::debug!("resolved options: {:?}", options);

    let validation = validate_options(&options);
    for d in validation.iter() {
        printer.diagnostic(d);
    }
    ensure_valid(&validation)?;

    let discovery = discover(&options.sources, root)?;
    let scan = &discovery.scan;

    for path in &scan.skipped {
        printer.warning(
            "Skipping",
            &format!("{} (unsupported file type)", display_path(path, root)),
        );
    }
    for pattern in &scan.unmatched {
        printer.warning("Unmatched", &format!("'{}' matched no token files", pattern));
    }

    if scan.is_empty() {
        printer.warning("Finished", "no token files found, nothing written");
        return Ok(BatchReport::default());
    }

    printer.status(
        "Loading",
        &plural(scan.total(), "token file", "token files"),
    );
    let sources = discovery.load()?;

    let mode = OutputMode::from_bundled(options.bundled);
    let mut sink = FileSink::new(root, &options);
    let mut resolver = BatchResolver::new(mode).with_prefix(options.prefix.as_str());
    let report = resolver.run(&sources, &mut sink)?;

    for path in &report.written {
        printer.status("Writing", &display_path(path, root));
    }
    for (source, written) in &report.overwritten {
        printer.warning(
            "Overwrote",
            &format!(
                "{} with {}",
                display_path(written, root),
                display_path(source, root)
            ),
        );
    }
    for (source, err) in &report.failures {
        printer.error("error", &format!("{}: {}", display_path(source, root), err));
    }

    if !report.is_success() {
        return Err(TokensError::Build {
            message: format!(
                "failed to write {} of {}",
                plural(report.failures.len(), "output", "outputs"),
                sources.len()
            ),
            help: Some("Check that the output directory is writable".to_string()),
        });
    }

    let singular = format!("{} file", target.name());
    let pluralized = format!("{} files", target.name());
    printer.status(
        "Finished",
        &format!(
            "{} from {}",
            plural(report.written.len(), &singular, &pluralized),
            plural(sources.len(), "source", "sources")
        ),
    );

    Ok(report)
}

/// Load the project configuration; problems fall back to defaults.
fn load_configuration(root: &Path, printer: &Printer) -> Configuration {
    match Configuration::find(root) {
        Ok(Some(config)) => config,
        Ok(None) => Configuration::default(),
        Err(e) => {
            printer.warning("Config", &format!("{}; using default configuration", e));
            Configuration::default()
        }
    }
}
