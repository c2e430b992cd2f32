// src/merge/mod.rs
//
// Column-aligned concatenation and de-duplication of listing batches.
// The cumulative dataset file is the only thing the per-site scrapers
// share; nothing here is transactional and no lock guards the file.

mod csv_io;
mod merge_error;

pub use csv_io::{read_csv, write_csv};
pub use merge_error::MergeError;

use crate::record::{Record, PLACEHOLDER};
use std::collections::{HashMap, HashSet};

/// Key a merged dataset is de-duplicated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DedupeKey {
    Url,
    IdAndSource,
}

/// Which duplicate survives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keep {
    First,
    Last,
}

/// Columns of the reduced "light" projection written next to the full
/// dataset. Only the ones actually present are projected.
pub const LIGHT_COLUMNS: &[&str] = &[
    "source",
    "titre",
    "prix",
    "type_bien",
    "type_annonce",
    "quartier",
    "ville",
    "surface_m2",
    "nb_chambres",
    "nb_sdb",
    "nb_salons",
    "description",
    "date_publication",
    "vendeur",
    "caracteristiques",
];

/// An in-memory CSV: ordered columns plus string rows, every cell filled
/// (placeholder for anything a row's source never declared).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a batch from freshly extracted records. Columns are the
    /// union over all records, in first-seen order.
    pub fn from_records(records: &[Record]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for col in record.columns() {
                if !columns.iter().any(|c| c == col) {
                    columns.push(col.to_string());
                }
            }
        }

        let rows = records
            .iter()
            .map(|r| columns.iter().map(|c| r.get(c).to_string()).collect())
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Appends another dataset, first widening both sides to the union of
    /// their column sets. Absent cells are filled with the placeholder, so
    /// after the append every row covers every column.
    pub fn append(&mut self, other: Dataset) {
        for col in &other.columns {
            if self.column_index(col).is_none() {
                self.columns.push(col.clone());
                for row in &mut self.rows {
                    row.push(PLACEHOLDER.to_string());
                }
            }
        }

        let mapping: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|c| other.columns.iter().position(|oc| oc == c))
            .collect();

        for row in other.rows {
            let aligned = mapping
                .iter()
                .map(|idx| match idx {
                    Some(i) => row[*i].clone(),
                    None => PLACEHOLDER.to_string(),
                })
                .collect();
            self.rows.push(aligned);
        }
    }

    /// Drops duplicate rows on `key`, keeping the first or last occurrence.
    /// Rows whose key fields are unresolved placeholders are always kept.
    /// Running it twice over the same data changes nothing.
    pub fn dedupe(&mut self, key: DedupeKey, keep: Keep) {
        match keep {
            Keep::First => {
                let mut seen = HashSet::new();
                let columns = std::mem::take(&mut self.columns);
                self.rows.retain(|row| match row_key(&columns, row, key) {
                    Some(k) => seen.insert(k),
                    None => true,
                });
                self.columns = columns;
            }
            Keep::Last => {
                let columns = std::mem::take(&mut self.columns);
                let mut last: HashMap<String, usize> = HashMap::new();
                for (i, row) in self.rows.iter().enumerate() {
                    if let Some(k) = row_key(&columns, row, key) {
                        last.insert(k, i);
                    }
                }
                let mut i = 0;
                self.rows.retain(|row| {
                    let keep_row = match row_key(&columns, row, key) {
                        Some(k) => last[&k] == i,
                        None => true,
                    };
                    i += 1;
                    keep_row
                });
                self.columns = columns;
            }
        }
    }

    /// Reorders columns for the cumulative file: `source` first, the rest
    /// alphabetical.
    pub fn order_source_first(&mut self) {
        let mut order: Vec<usize> = (0..self.columns.len()).collect();
        order.sort_by_key(|&i| {
            let name = &self.columns[i];
            (name != "source", name.clone())
        });

        self.columns = order.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = order.iter().map(|&i| row[i].clone()).collect();
        }
    }

    /// The light projection: the requested columns that exist, in order.
    pub fn project(&self, wanted: &[&str]) -> Dataset {
        let present: Vec<usize> = wanted
            .iter()
            .filter_map(|c| self.column_index(c))
            .collect();

        Dataset {
            columns: present.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| present.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

fn row_key(columns: &[String], row: &[String], key: DedupeKey) -> Option<String> {
    let index = |name: &str| columns.iter().position(|c| c == name);
    match key {
        DedupeKey::Url => {
            let url = row.get(index("url")?)?;
            (!url.starts_with(PLACEHOLDER)).then(|| url.clone())
        }
        DedupeKey::IdAndSource => {
            let id = row.get(index("id_unique")?)?;
            let source = row.get(index("source")?)?;
            (!id.starts_with(PLACEHOLDER)).then(|| format!("{id}\u{1f}{source}"))
        }
    }
}
