//! CSV loader for batches of income records.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does **not** matter.
//! Every column is optional; a missing column or an empty cell counts as 0.
//!
//! | Column     | Type    | Notes                                         |
//! |------------|---------|-----------------------------------------------|
//! | `name`     | string  | Label for the report; defaults to `row N`     |
//! | `salary`   | decimal | Gross salary; unlocks the standard deduction  |
//! | `business` | decimal | Business or profession income                 |
//! | `rental`   | decimal | House property income                         |
//! | `other`    | decimal | Interest, dividends and other sources         |
//!
//! Amount cells go through [`parse_amount`], so grouping commas and a leading
//! `₹` are accepted, and invalid or negative entries are treated as 0.
//!
//! ### Example
//!
//! ```csv
//! name,salary,business,rental,other
//! Asha,"15,00,000",,,
//! Ravi,,6000000,,
//! ```
//!
//! Cells that contain grouping commas must be quoted.
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::IncomeInputs;

use crate::utils::parse_amount;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    name: Option<String>,
    salary: Option<String>,
    business: Option<String>,
    rental: Option<String>,
    other: Option<String>,
}

/// One labelled set of income heads read from the batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeRecord {
    pub name: String,
    pub inputs: IncomeInputs,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The file could not be opened.
    #[error("cannot open '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV deserialisation failed (bad quoting, unequal row
    /// lengths, unreadable bytes).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn amount(cell: Option<&str>) -> rust_decimal::Decimal {
    cell.map(parse_amount).unwrap_or_default()
}

/// Convert a single CSV row into an [`IncomeRecord`].
///
/// row_number is 1-based and only used for the default label.
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> IncomeRecord {
    let name = row
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    IncomeRecord {
        name,
        inputs: IncomeInputs::new(
            amount(row.salary.as_deref()),
            amount(row.business.as_deref()),
            amount(row.rental.as_deref()),
            amount(row.other.as_deref()),
        ),
    }
}

/// Load all records from any reader producing CSV text with a header row.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<IncomeRecord>, CsvLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        records.push(convert_row(row, index + 1));
    }

    tracing::info!(count = records.len(), "loaded income records");
    Ok(records)
}

/// Load all records from the CSV file at `path`.
pub fn load_from_file(path: &Path) -> Result<Vec<IncomeRecord>, CsvLoadError> {
    let file = File::open(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}
