// src/merge/csv_io.rs
//
// CSV files carry a UTF-8 BOM so spreadsheet tools open the accented
// French headers correctly. The reader tolerates damaged rows: a row
// whose field count disagrees with the header is logged and dropped.

use crate::merge::{Dataset, MergeError};
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a dataset file. Headers are taken from the first row (with the
/// BOM stripped if present); rows of the wrong width are skipped.
pub fn read_csv(path: &Path) -> Result<Dataset, MergeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(row) => row?,
        None => return Ok(Dataset::new()),
    };

    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == 0 {
                cell.trim_start_matches('\u{feff}').to_string()
            } else {
                cell.to_string()
            }
        })
        .collect();

    let mut dataset = Dataset::with_columns(columns);
    let mut skipped = 0;

    for row in records {
        let row = row?;
        if row.len() == dataset.columns().len() {
            dataset.push_row(row.iter().map(str::to_string).collect());
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        eprintln!(
            "⚠️ {} malformed row(s) skipped in {}",
            skipped,
            path.display()
        );
    }

    Ok(dataset)
}

/// Writes a dataset with a leading BOM. The cumulative file quotes every
/// cell; per-site batches only quote where needed.
pub fn write_csv(path: &Path, dataset: &Dataset, quote_all: bool) -> Result<(), MergeError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(BOM)?;

    let style = if quote_all {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };

    let mut writer = WriterBuilder::new().quote_style(style).from_writer(file);
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}
