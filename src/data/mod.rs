//! Reference data and output sinks around the royale engine

pub mod reference;
pub mod report;

pub use reference::{Country, ReferenceData, WorldData};
pub use report::{render_report, ConsoleSink, FileReportSink, NullSink, ReportSink, StdoutSink};
