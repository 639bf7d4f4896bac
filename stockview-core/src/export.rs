//! CSV export of a price series and the downloadable artifact wrapping it.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

use crate::data::series::PriceSeries;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Fixed leading columns; provider extras follow Volume.
pub const BASE_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

fn price_field(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        v.to_string()
    }
}

/// Serialize the series with its date index as the first column.
///
/// Columns: Date, Open, High, Low, Close, Volume, then any provider extras in
/// the order the series lists them. Output is deterministic for a given series.
pub fn to_csv(series: &PriceSeries) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    let header: Vec<&str> = BASE_COLUMNS
        .iter()
        .copied()
        .chain(series.extra_columns.iter().map(String::as_str))
        .collect();
    wtr.write_record(&header)?;

    for row in series.rows() {
        let mut record = vec![
            row.date.to_string(),
            price_field(row.open),
            price_field(row.high),
            price_field(row.low),
            price_field(row.close),
            row.volume.to_string(),
        ];
        record.extend(row.extras.iter().map(|v| price_field(*v)));
        wtr.write_record(&record)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

/// A named CSV blob ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvArtifact {
    pub filename: String,
    pub text: String,
}

impl CsvArtifact {
    pub fn new(symbol: &str, text: String) -> Self {
        Self {
            filename: format!("{symbol}_stock_data.csv"),
            text,
        }
    }

    /// Build the artifact straight from a series.
    pub fn from_series(series: &PriceSeries) -> Result<Self, ExportError> {
        Ok(Self::new(&series.symbol, to_csv(series)?))
    }

    /// `data:` URI carrying the CSV as base64.
    pub fn data_uri(&self) -> String {
        format!("data:file/csv;base64,{}", BASE64.encode(self.text.as_bytes()))
    }

    /// HTML download link embedding the data URI.
    pub fn html_link(&self) -> String {
        format!(
            r#"<a href="{}" download="{}">Download CSV File</a>"#,
            self.data_uri(),
            self.filename
        )
    }

    /// Write the CSV into `dir` under its filename, creating `dir` if needed.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.text)?;
        Ok(path)
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}
