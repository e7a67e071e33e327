//! Batch resolution across many token sources.
//!
//! Drives a [`Flattener`] over every loaded source and hands the result to
//! an [`OutputSink`], either once for the whole batch (bundled) or once per
//! source with a full reset in between.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{Result, TokensError};
use crate::tokens::TokenTree;

use super::Flattener;

/// How sources map to output artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One merged artifact for all sources.
    Bundled,
    /// One artifact per source.
    PerSource,
}

impl OutputMode {
    pub fn from_bundled(bundled: bool) -> Self {
        if bundled {
            OutputMode::Bundled
        } else {
            OutputMode::PerSource
        }
    }
}

/// Receives flattened results and turns them into artifacts.
pub trait OutputSink {
    /// Emit the merged result of a bundled batch. Returns the artifact path.
    fn write_bundle(&mut self, flattener: &Flattener) -> Result<PathBuf>;

    /// Emit the result for a single source. Returns the artifact path.
    fn write_source(&mut self, source: &Path, flattener: &Flattener) -> Result<PathBuf>;
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Artifacts written, in order.
    pub written: Vec<PathBuf>,
    /// Sources whose artifact could not be written (per-source mode only).
    pub failures: Vec<(PathBuf, TokensError)>,
    /// `(source, artifact)` pairs where the artifact had already been
    /// written by an earlier source in the same batch, e.g. `a.json` and
    /// `a.yaml` both producing `a.css`.
    pub overwritten: Vec<(PathBuf, PathBuf)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs a flattener over a set of sources in bundled or per-source mode.
#[derive(Debug)]
pub struct BatchResolver {
    mode: OutputMode,
    prefix: String,
    flattener: Flattener,
}

impl BatchResolver {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            prefix: String::new(),
            flattener: Flattener::new(),
        }
    }

    /// Prefix applied to every generated variable name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Resolve all sources and emit them through `sink`.
    ///
    /// In bundled mode a sink failure aborts the batch. In per-source mode a
    /// failure is recorded in the report and the remaining sources are still
    /// processed; the flattener is reset after every source either way.
    pub fn run<S: OutputSink>(
        &mut self,
        sources: &IndexMap<PathBuf, TokenTree>,
        sink: &mut S,
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        match self.mode {
            OutputMode::Bundled => {
                if sources.is_empty() {
                    log::debug!("no sources to bundle, nothing written");
                    return Ok(report);
                }

                self.flattener.reset();
                self.flattener.set_prefix(self.prefix.as_str());
                self.flattener.resolve_many(sources.values());
                log::debug!(
                    "bundled {} source(s) into {} variable(s)",
                    sources.len(),
                    self.flattener.variables().len()
                );

                let written = sink.write_bundle(&self.flattener);
                self.flattener.reset();
                report.written.push(written?);
            }
            OutputMode::PerSource => {
                for (path, tree) in sources {
                    self.flattener.set_prefix(self.prefix.as_str());
                    self.flattener.resolve(tree);
                    log::debug!(
                        "{}: {} variable(s)",
                        path.display(),
                        self.flattener.variables().len()
                    );

                    match sink.write_source(path, &self.flattener) {
                        Ok(written) => {
                            if report.written.contains(&written) {
                                log::warn!(
                                    "{} overwrites {} written earlier in this batch",
                                    path.display(),
                                    written.display()
                                );
                                report.overwritten.push((path.clone(), written.clone()));
                            }
                            report.written.push(written);
                        }
                        Err(e) => report.failures.push((path.clone(), e)),
                    }

                    self.flattener.reset();
                }
            }
        }

        Ok(report)
    }
}
