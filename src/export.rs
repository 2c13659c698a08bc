//! Export pipeline: shaping the registrations table for file export.
//!
//! The data shape is fixed here — seven columns in a fixed order with
//! a locale-style date — and handed to a per-format encoder. The
//! delimited-text encoder is built in; the spreadsheet, paginated-
//! document, and word-processor encoders are external collaborators
//! injected through [`DocumentEncoder`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Registration;

/// Column headers, in the exported order.
pub const EXPORT_COLUMNS: [&str; 7] =
    ["Name", "Email", "Phone", "Country", "Service", "Message", "Date"];

/// The tabular shape fed to every encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: [&'static str; 7],
    pub rows: Vec<[String; 7]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no encoder registered for {0} export")]
    EncoderUnavailable(ExportFormat),

    #[error("{format} encoder failed: {message}")]
    Encode {
        format: ExportFormat,
        message: String,
    },

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// A file-format encoder for the shaped table.
pub trait DocumentEncoder: Send + Sync {
    fn encode(&self, table: &ExportTable) -> Result<Vec<u8>, ExportError>;
}

/// The set of encoders available to the dashboard. Delimited text is
/// always available; the other formats are present only when their
/// encoder was injected.
#[derive(Default)]
pub struct EncoderSet {
    xlsx: Option<Box<dyn DocumentEncoder>>,
    pdf: Option<Box<dyn DocumentEncoder>>,
    docx: Option<Box<dyn DocumentEncoder>>,
}

impl EncoderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_xlsx(mut self, encoder: Box<dyn DocumentEncoder>) -> Self {
        self.xlsx = Some(encoder);
        self
    }

    pub fn with_pdf(mut self, encoder: Box<dyn DocumentEncoder>) -> Self {
        self.pdf = Some(encoder);
        self
    }

    pub fn with_docx(mut self, encoder: Box<dyn DocumentEncoder>) -> Self {
        self.docx = Some(encoder);
        self
    }

    /// Encode the table in the requested format. Every path returns a
    /// `Result`: a missing encoder is an error, never a silent no-op.
    pub fn encode(
        &self,
        format: ExportFormat,
        table: &ExportTable,
    ) -> Result<Vec<u8>, ExportError> {
        let encoder = match format {
            ExportFormat::Csv => return Ok(encode_csv(table)),
            ExportFormat::Xlsx => self.xlsx.as_deref(),
            ExportFormat::Pdf => self.pdf.as_deref(),
            ExportFormat::Docx => self.docx.as_deref(),
        };

        encoder
            .ok_or(ExportError::EncoderUnavailable(format))?
            .encode(table)
    }
}

/// Shape registrations into the fixed seven-column export table.
///
/// Emails are lowercased and trimmed here as well as at insert time,
/// so rows written before normalization existed still export clean.
pub fn shape_rows(registrations: &[Registration]) -> ExportTable {
    let rows = registrations
        .iter()
        .map(|r| {
            [
                r.full_name.clone(),
                r.email.trim().to_lowercase(),
                r.phone.clone(),
                r.country.clone(),
                r.service.clone(),
                r.message.clone(),
                r.created_at.format("%-m/%-d/%Y").to_string(),
            ]
        })
        .collect();

    ExportTable {
        columns: EXPORT_COLUMNS,
        rows,
    }
}

/// The date-stamped export filename, e.g. `registrations_2024-01-05.csv`.
pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!("registrations_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Built-in delimited-text encoding. Synchronous and infallible once
/// the table is shaped.
fn encode_csv(table: &ExportTable) -> Vec<u8> {
    let mut out = String::new();

    let header: Vec<String> = table.columns.iter().map(|c| csv_field(c)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(|f| csv_field(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out.into_bytes()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write encoded bytes into the export directory, returning the full
/// path of the written file.
pub fn write_export(
    export_dir: impl AsRef<Path>,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf, ExportError> {
    let path = export_dir.as_ref().join(filename);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
