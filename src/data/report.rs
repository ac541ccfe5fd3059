//! Report and console sinks

use std::fs;
use std::path::PathBuf;

use crate::core::calendar::format_day;
use crate::core::error::Result;
use crate::core::types::SimulationResult;

/// Render the report document: analysis text, a blank line, then one line
/// per record with rank 1 for the winner
pub fn render_report(report: &str, results: &SimulationResult) -> String {
    let mut out = String::with_capacity(report.len() + results.len() * 32);
    out.push_str(report);
    out.push_str("\n\n");

    for (rank, record) in results.ranked() {
        out.push_str(&format!("{}º {} on {}\n", rank, record.entity, format_day(record.date)));
    }
    out
}

/// Destination for finished reports
pub trait ReportSink {
    /// Persist a report under `destination`, returning where it went
    fn persist(&self, report: &str, results: &SimulationResult, destination: &str) -> Result<PathBuf>;
}

/// Writes reports as text files under a directory
#[derive(Debug, Clone)]
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileReportSink {
    fn persist(&self, report: &str, results: &SimulationResult, destination: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(destination);
        fs::write(&path, render_report(report, results))?;

        tracing::info!("Report written to {}", path.display());
        Ok(path)
    }
}

/// Side channel for a run's log lines
pub trait ConsoleSink {
    fn emit(&self, lines: &[String]);
}

/// Prints log lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ConsoleSink for StdoutSink {
    fn emit(&self, lines: &[String]) {
        println!("{}", lines.join("\n"));
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ConsoleSink for NullSink {
    fn emit(&self, _lines: &[String]) {}
}

impl ReportSink for NullSink {
    fn persist(&self, _report: &str, _results: &SimulationResult, destination: &str) -> Result<PathBuf> {
        Ok(PathBuf::from(destination))
    }
}
