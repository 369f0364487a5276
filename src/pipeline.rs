//! Table conversion orchestration.
//!
//! Reads the whole input document, walks its rows in order, cleans each cell
//! according to its column role, resolves any embedded file reference, and
//! serializes the assembled records to CSV in a single pass at the end.

use crate::clean;
use crate::config::MIN_CELLS;
use crate::models::{ColumnRole, MessierRecord, CSV_HEADER};
use crate::stats::RunStats;
use crate::table;
use crate::wikimedia::ImageResolver;
use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Converts the wiki table at `input` into a CSV catalogue at `output`.
///
/// Rows that split into fewer than `MIN_CELLS` cells are silently skipped
/// and only show up in the returned statistics. A missing input file or an
/// unwritable output path aborts the run.
pub fn run(input: &Path, output: &Path, resolver: &dyn ImageResolver) -> Result<RunStats> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input table: {}", input.display()))?;

    let blocks = table::row_blocks(&content);
    info!(rows = blocks.len(), "Extracted table rows");

    let mut stats = RunStats::new();
    let mut records = Vec::new();
    let pb = ProgressBar::new(blocks.len() as u64);

    for (i, block) in blocks.iter().enumerate() {
        // Row numbering stays 1-based across all extracted rows, including
        // ones later skipped, so image filenames are stable per run.
        let row = i + 1;
        pb.inc(1);
        stats.rows_seen += 1;

        let cells = table::split_cells(block);
        if cells.len() < MIN_CELLS {
            debug!(row, cells = cells.len(), "Skipping malformed row");
            stats.rows_skipped += 1;
            continue;
        }

        let cleaned: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                clean::clean(table::normalize_cell(cell), ColumnRole::from_index(col))
            })
            .collect();

        let image = match table::file_reference(block) {
            Some(name) => {
                let resolved = resolver.resolve(name, row);
                if resolved.is_some() {
                    stats.images_resolved += 1;
                } else {
                    stats.images_failed += 1;
                }
                resolved
            }
            None => None,
        };

        records.push(MessierRecord::from_cells(&cleaned, image));
        stats.records_written += 1;
    }
    pb.finish_and_clear();

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    writer.write_record(CSV_HEADER)?;
    for record in &records {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    info!(
        records = stats.records_written,
        skipped = stats.rows_skipped,
        "Conversion complete"
    );
    Ok(stats)
}
