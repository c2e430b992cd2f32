// src/pipeline.rs
//
// One run = fetch a site's pages, extract its listings, write the per-site
// batch file, then fold the batch into the cumulative dataset and refresh
// the light projection. Re-running a site is safe: the merge de-duplicates
// on the site's declared key.

use crate::fetch::{fetch_rendered, fetch_rendered_pages, read_snapshots, FetchError, FetchPlan, HttpFetcher};
use crate::merge::{read_csv, write_csv, Dataset, MergeError, LIGHT_COLUMNS};
use crate::sources::Site;
use std::fmt;
use std::path::Path;

const DATASET_FILE: &str = "dataset.csv";
const DATASET_LIGHT_FILE: &str = "dataset_light.csv";

#[derive(Debug)]
pub enum PipelineError {
    Fetch(FetchError),
    Merge(MergeError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Fetch(e) => write!(f, "Fetch failed: {}", e),
            PipelineError::Merge(e) => write!(f, "Merge failed: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        PipelineError::Fetch(e)
    }
}

impl From<MergeError> for PipelineError {
    fn from(e: MergeError) -> Self {
        PipelineError::Merge(e)
    }
}

pub struct RunStats {
    pub site: &'static str,
    pub extracted: usize,
    pub dataset_rows: usize,
}

fn fetch_and_extract(site: &dyn Site) -> Result<Vec<crate::record::Record>, FetchError> {
    let mut records = Vec::new();

    match site.plan() {
        FetchPlan::Http {
            urls,
            delay,
            stop_on_empty,
        } => {
            let fetcher = HttpFetcher::new()?;
            fetcher.fetch_paginated(&urls, delay, stop_on_empty, |html| {
                let batch = site.extract(&html);
                let count = batch.len();
                records.extend(batch);
                count
            })?;
        }
        FetchPlan::Browser(plan) => {
            let html = fetch_rendered(&plan)?;
            records = site.extract(&html);
        }
        FetchPlan::BrowserPages { urls, settle } => {
            for html in fetch_rendered_pages(&urls, settle)? {
                records.extend(site.extract(&html));
            }
        }
        FetchPlan::Snapshots { paths } => {
            for html in read_snapshots(&paths)? {
                records.extend(site.extract(&html));
            }
        }
    }

    Ok(records)
}

/// Scrapes one site end to end and folds the result into the cumulative
/// dataset under `data_dir`.
pub fn run_site(site: &dyn Site, data_dir: &Path) -> Result<RunStats, PipelineError> {
    eprintln!("🔄 Scraping {}...", site.name());

    let records = fetch_and_extract(site)?;
    eprintln!("📊 {} listings extracted from {}", records.len(), site.name());

    store_records(site, &records, data_dir)
}

/// Writes the batch file and merges the records into the cumulative
/// dataset. An empty batch touches nothing and reports the dataset as-is.
pub fn store_records(
    site: &dyn Site,
    records: &[crate::record::Record],
    data_dir: &Path,
) -> Result<RunStats, PipelineError> {
    let batch = Dataset::from_records(records);
    if batch.is_empty() {
        eprintln!("⚠️ No listings from {}, dataset left untouched", site.name());
        return Ok(RunStats {
            site: site.name(),
            extracted: 0,
            dataset_rows: existing_dataset_rows(data_dir)?,
        });
    }
    let batch_path = data_dir.join(format!("{}.csv", site.slug()));
    write_csv(&batch_path, &batch, false)?;
    eprintln!("💾 {} rows saved to {}", batch.len(), batch_path.display());

    let dataset_rows = merge_into_dataset(site, batch, data_dir)?;

    Ok(RunStats {
        site: site.name(),
        extracted: records.len(),
        dataset_rows,
    })
}

fn existing_dataset_rows(data_dir: &Path) -> Result<usize, MergeError> {
    let dataset_path = data_dir.join(DATASET_FILE);
    if dataset_path.exists() {
        Ok(read_csv(&dataset_path)?.len())
    } else {
        Ok(0)
    }
}

/// Appends a batch to the cumulative dataset, de-duplicates it on the
/// site's key, and rewrites both the full file and the light projection.
pub fn merge_into_dataset(
    site: &dyn Site,
    batch: Dataset,
    data_dir: &Path,
) -> Result<usize, PipelineError> {
    let dataset_path = data_dir.join(DATASET_FILE);
    let mut dataset = if dataset_path.exists() {
        read_csv(&dataset_path)?
    } else {
        Dataset::new()
    };
    let before = dataset.len();

    dataset.append(batch);
    dataset.dedupe(site.merge_key(), site.keep());
    dataset.order_source_first();
    write_csv(&dataset_path, &dataset, true)?;
    eprintln!(
        "✅ Dataset: {} rows ({} before merge)",
        dataset.len(),
        before
    );

    let light = dataset.project(LIGHT_COLUMNS);
    write_csv(&data_dir.join(DATASET_LIGHT_FILE), &light, true)?;

    Ok(dataset.len())
}
