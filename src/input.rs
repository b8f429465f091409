//! Tabular input: reads a coordinate CSV in one of two formats and
//! normalizes it into [`CoordinateRecord`]s.

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::VerdokError;
use crate::models::{dms_to_dd, CoordinateRecord, Hemisphere};

/// How coordinates are encoded in the uploaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFormat {
    /// OSS degree/minute/second columns with hemisphere letters.
    Dms,
    /// Plain decimal-degree `x`/`y` columns.
    Decimal,
}

impl CoordinateFormat {
    fn name(&self) -> &'static str {
        match self {
            CoordinateFormat::Dms => "OSS-UTM (DMS)",
            CoordinateFormat::Decimal => "decimal-degree",
        }
    }

    fn required_columns(&self) -> &'static [&'static str] {
        match self {
            CoordinateFormat::Dms => &[
                "id",
                "bujur_derajat",
                "bujur_menit",
                "bujur_detik",
                "BT_BB",
                "lintang_derajat",
                "lintang_menit",
                "lintang_detik",
                "LU_LS",
            ],
            CoordinateFormat::Decimal => &["id", "x", "y"],
        }
    }
}

/// Read and normalize a coordinate table from a file path.
pub fn read_records(
    path: &Path,
    format: CoordinateFormat,
) -> Result<Vec<CoordinateRecord>, VerdokError> {
    let file = std::fs::File::open(path)?;
    read_records_from(file, format)
}

/// Read and normalize a coordinate table from any reader.
pub fn read_records_from<R: Read>(
    reader: R,
    format: CoordinateFormat,
) -> Result<Vec<CoordinateRecord>, VerdokError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = resolve_columns(&headers, format)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row?;
        // 1-based, matching what the user sees in a spreadsheet (plus header)
        let row_no = i + 2;
        records.push(parse_row(&row, &columns, format, row_no)?);
    }

    debug!(rows = records.len(), format = format.name(), "parsed input table");
    Ok(records)
}

/// Header name → column index for every required column.
struct Columns {
    indices: Vec<usize>,
}

fn resolve_columns(
    headers: &StringRecord,
    format: CoordinateFormat,
) -> Result<Columns, VerdokError> {
    let mut indices = Vec::new();
    for column in format.required_columns() {
        let idx = headers
            .iter()
            .position(|h| h == *column)
            .ok_or(VerdokError::MissingField {
                column,
                format: format.name(),
            })?;
        indices.push(idx);
    }
    Ok(Columns { indices })
}

fn parse_row(
    row: &StringRecord,
    columns: &Columns,
    format: CoordinateFormat,
    row_no: usize,
) -> Result<CoordinateRecord, VerdokError> {
    let cell = |slot: usize| row.get(columns.indices[slot]).unwrap_or("");
    let number = |slot: usize, name: &'static str| -> Result<f64, VerdokError> {
        cell(slot)
            .parse::<f64>()
            .map_err(|_| VerdokError::BadNumber {
                row: row_no,
                column: name,
                value: cell(slot).to_string(),
            })
    };

    let id = cell(0).to_string();

    match format {
        CoordinateFormat::Dms => {
            let lon_dir = Hemisphere::parse(cell(4), row_no)?;
            let lat_dir = Hemisphere::parse(cell(8), row_no)?;
            let longitude = dms_to_dd(
                number(1, "bujur_derajat")?,
                number(2, "bujur_menit")?,
                number(3, "bujur_detik")?,
                lon_dir,
            );
            let latitude = dms_to_dd(
                number(5, "lintang_derajat")?,
                number(6, "lintang_menit")?,
                number(7, "lintang_detik")?,
                lat_dir,
            );
            Ok(CoordinateRecord {
                id,
                longitude,
                latitude,
            })
        }
        CoordinateFormat::Decimal => Ok(CoordinateRecord {
            id,
            longitude: number(1, "x")?,
            latitude: number(2, "y")?,
        }),
    }
}
