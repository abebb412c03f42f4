//! CSV export
//!
//! Writes a recorded time series to a comma-delimited UTF-8 file that
//! Excel, pandas and MATLAB all read directly:
//!
//! ```csv
//! Time [s],Temperature [C]
//! 0.000000,21.000000
//! 0.010000,21.004713
//! ```
//!
//! The default filename follows the `{algorithm}-{unix_timestamp}.csv`
//! convention so successive exports never collide. An optional header
//! block of `#` comment lines records the run parameters.

use std::fs::File;
use std::io::{BufWriter, Write};

use thiserror::Error;

use crate::control::ProgressSnapshot;
use crate::output::{Exporter, ExportSeries};

/// CSV export failures.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("nothing to export: the snapshot is empty")]
    EmptyData,

    #[error("series length mismatch: {time} time values vs {values} data values")]
    LengthMismatch { time: usize, values: usize },

    #[error("refusing to export non-finite values (row {row})")]
    NonFinite { row: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration of the CSV output.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default ',').
    pub delimiter: char,

    /// Decimal places for floating-point values (default 6).
    pub precision: usize,

    /// Extra `# key: value` comment lines written before the header.
    pub metadata: Vec<(String, String)>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            metadata: Vec::new(),
        }
    }
}

impl CsvConfig {
    /// Builder: record a `# key: value` metadata line.
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }
}

/// CSV exporter.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Default filename for `algorithm`:
    /// `{algorithm}-{unix_timestamp}.csv`.
    pub fn default_path(&self, algorithm: &str) -> String {
        format!("{}-{}.csv", algorithm, chrono::Utc::now().timestamp())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export(
        &self,
        snapshot: &ProgressSnapshot,
        series: ExportSeries,
        path: &str,
    ) -> Result<(), CsvError> {
        let values = match series {
            ExportSeries::Temperature => &snapshot.temperature_at_poi,
            ExportSeries::HeatFlux => &snapshot.heat_flux,
        };

        if snapshot.t.is_empty() || values.is_empty() {
            return Err(CsvError::EmptyData);
        }
        if snapshot.t.len() != values.len() {
            return Err(CsvError::LengthMismatch {
                time: snapshot.t.len(),
                values: values.len(),
            });
        }
        if let Some(row) = snapshot
            .t
            .iter()
            .zip(values)
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(CsvError::NonFinite { row });
        }

        let mut file = BufWriter::new(File::create(path)?);

        for (key, value) in &self.config.metadata {
            writeln!(file, "# {key}: {value}")?;
        }
        if !self.config.metadata.is_empty() {
            writeln!(file, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;
        }

        writeln!(file, "Time [s]{}{}", self.config.delimiter, series.header())?;

        let precision = self.config.precision;
        for (t, v) in snapshot.t.iter().zip(values) {
            writeln!(
                file,
                "{t:.precision$}{}{v:.precision$}",
                self.config.delimiter
            )?;
        }

        file.flush()?;
        Ok(())
    }
}
