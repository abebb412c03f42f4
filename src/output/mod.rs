//! Export of simulation results
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the on-disk format; each format is
//! an independent implementation in its own sub-module. Adding a format
//! means adding a file, never touching existing code.
//!
//! # Available formats
//!
//! | Format | Module  |
//! |--------|---------|
//! | CSV    | [`csv`] |
//!
//! # Usage
//!
//! ```rust,ignore
//! use therm_rs::output::{CsvExporter, Exporter, ExportSeries};
//!
//! let exporter = CsvExporter::default();
//! let path = exporter.default_path("forward");
//! exporter.export(&snapshot, ExportSeries::Temperature, &path)?;
//! ```

pub mod csv;

pub use csv::{CsvConfig, CsvError, CsvExporter};

use crate::control::ProgressSnapshot;

/// Which recorded time series to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSeries {
    /// Temperature at the point of interest.
    Temperature,
    /// Boundary heat-flux history.
    HeatFlux,
}

impl ExportSeries {
    /// Column header of the quantity, `<Quantity> [<unit>]`.
    pub fn header(self) -> &'static str {
        match self {
            ExportSeries::Temperature => "Temperature [C]",
            ExportSeries::HeatFlux => "Heat flux [W/m2]",
        }
    }
}

/// Abstraction over export formats.
///
/// Each format owns its error type through the associated `Error`,
/// avoiding blanket boxing and letting callers match precisely.
pub trait Exporter {
    type Error: std::error::Error;

    /// Write one recorded series of `snapshot` to `path`: a time column
    /// plus the selected quantity, one row per committed step.
    fn export(
        &self,
        snapshot: &ProgressSnapshot,
        series: ExportSeries,
        path: &str,
    ) -> Result<(), Self::Error>;
}
