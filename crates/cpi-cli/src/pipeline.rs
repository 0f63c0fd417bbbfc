//! CPI processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the two sheet exports and the curated lookups
//! 2. **Extract**: Scan month columns and melt each sheet to long format
//! 3. **Enrich**: Join lookups and derive the foods dataset
//! 4. **Pivot**: Reshape groups and foods into ranked wide tables
//! 5. **Output**: Write the five published CSV files
//!
//! Each stage takes the output of the previous stage and returns typed
//! results.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info, info_span};

use cpi_core::{divisions_dataset, extract_sheet, foods_dataset, groups_dataset};
use cpi_ingest::{Grid, read_grid, read_lookup};
use cpi_model::{EntityLookup, LongRecord, MonthEnd, PipelineConfig, SheetLayout};
use cpi_transform::{
    WideTable, divisions_frame, foods_frame, groups_frame, pivot_wide, wide_frame,
};

/// Published output file names, long format.
pub const LONG_DIVISIONS_FILE: &str = "long_cpi_major_divisions.csv";
pub const LONG_GROUPS_FILE: &str = "long_cpi_major_groups.csv";
pub const LONG_FOODS_FILE: &str = "long_cpi_major_foods.csv";
/// Published output file names, wide format.
pub const WIDE_GROUPS_FILE: &str = "wide_cpi_major_groups.csv";
pub const WIDE_FOODS_FILE: &str = "wide_cpi_major_foods.csv";

/// Inputs for one pipeline run.
#[derive(Debug)]
pub struct RunOptions {
    /// Directory holding the sheet exports and lookup files.
    pub input_dir: PathBuf,
    /// Directory the five output files are written into.
    pub output_dir: PathBuf,
    pub config: PipelineConfig,
}

/// Shape summary for one written dataset.
#[derive(Debug)]
pub struct DatasetReport {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    pub months: usize,
    pub entities: usize,
    pub path: PathBuf,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetReport>,
}

/// Run the full pipeline: ingest, extract, enrich, pivot, output.
pub fn run_pipeline(options: &RunOptions) -> Result<RunResult> {
    let started = Instant::now();
    let span = info_span!("pipeline", input = %options.input_dir.display());
    let _guard = span.enter();
    let config = &options.config;

    // Stage 1: ingest.
    let groups_grid = read_sheet(&options.input_dir, &config.groups_sheet)?;
    let divisions_grid = read_sheet(&options.input_dir, &config.divisions_sheet)?;
    let groups_lookup = read_named_lookup(&options.input_dir, &config.groups_lookup)?;
    let foods_lookup = read_named_lookup(&options.input_dir, &config.foods_lookup)?;

    // Stage 2: extract.
    let raw_groups = extract_records(&groups_grid, &config.groups_sheet, config.strict_months)?;
    let raw_divisions =
        extract_records(&divisions_grid, &config.divisions_sheet, config.strict_months)?;

    // Stage 3: enrich.
    let divisions = divisions_dataset(raw_divisions);
    let groups = groups_dataset(raw_groups, &groups_lookup);
    let foods = foods_dataset(
        &groups,
        &divisions,
        &foods_lookup,
        &config.food_group_code,
        config.food_code_len,
    );
    info!(
        divisions = divisions.len(),
        groups = groups.len(),
        foods = foods.len(),
        "long datasets assembled"
    );

    // Stage 4: pivot.
    let groups_wide = pivot_wide(&groups, &config.groups_wide);
    let foods_wide = pivot_wide(&foods, &config.foods_wide);

    // Stage 5: output.
    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!("create output directory {}", options.output_dir.display())
    })?;
    let mut datasets = Vec::with_capacity(5);
    datasets.push(write_long_dataset(
        &options.output_dir,
        LONG_DIVISIONS_FILE,
        divisions_frame(&divisions).context("build divisions frame")?,
        divisions.iter().map(|r| (r.code.as_str(), r.month)),
    )?);
    datasets.push(write_long_dataset(
        &options.output_dir,
        LONG_GROUPS_FILE,
        groups_frame(&groups).context("build groups frame")?,
        groups.iter().map(|r| (r.code.as_str(), r.month)),
    )?);
    datasets.push(write_long_dataset(
        &options.output_dir,
        LONG_FOODS_FILE,
        foods_frame(&foods).context("build foods frame")?,
        foods.iter().map(|r| (r.code.as_str(), r.month)),
    )?);
    datasets.push(write_wide_dataset(
        &options.output_dir,
        WIDE_GROUPS_FILE,
        &groups_wide,
    )?);
    datasets.push(write_wide_dataset(
        &options.output_dir,
        WIDE_FOODS_FILE,
        &foods_wide,
    )?);

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        outputs = datasets.len(),
        "pipeline finished"
    );
    Ok(RunResult {
        input_dir: options.input_dir.clone(),
        output_dir: options.output_dir.clone(),
        datasets,
    })
}

fn read_sheet(input_dir: &Path, layout: &SheetLayout) -> Result<Grid> {
    let path = input_dir.join(&layout.file);
    let grid = read_grid(&path)
        .with_context(|| format!("read sheet export {}", path.display()))?;
    debug!(
        sheet = %layout.name,
        rows = grid.row_count(),
        columns = grid.column_count(),
        "sheet export loaded"
    );
    Ok(grid)
}

fn read_named_lookup(input_dir: &Path, file: &str) -> Result<EntityLookup> {
    let path = input_dir.join(file);
    let lookup =
        read_lookup(&path).with_context(|| format!("read lookup {}", path.display()))?;
    debug!(lookup = file, entries = lookup.len(), "lookup loaded");
    Ok(lookup)
}

fn extract_records(
    grid: &Grid,
    layout: &SheetLayout,
    strict_months: bool,
) -> Result<Vec<LongRecord>> {
    let records = extract_sheet(grid, layout, strict_months)
        .with_context(|| format!("extract sheet '{}'", layout.name))?;
    Ok(records)
}

fn write_long_dataset<'a>(
    output_dir: &Path,
    file: &str,
    frame: DataFrame,
    shape: impl Iterator<Item = (&'a str, MonthEnd)>,
) -> Result<DatasetReport> {
    let mut entities = BTreeSet::new();
    let mut months = BTreeSet::new();
    for (code, month) in shape {
        entities.insert(code.to_string());
        months.insert(month);
    }
    let rows = frame.height();
    let columns = frame.width();
    let path = write_frame(output_dir, file, frame)?;
    Ok(DatasetReport {
        name: file.trim_end_matches(".csv").to_string(),
        rows,
        columns,
        months: months.len(),
        entities: entities.len(),
        path,
    })
}

fn write_wide_dataset(
    output_dir: &Path,
    file: &str,
    table: &WideTable,
) -> Result<DatasetReport> {
    let frame = wide_frame(table).with_context(|| format!("build {file} frame"))?;
    let path = write_frame(output_dir, file, frame)?;
    Ok(DatasetReport {
        name: file.trim_end_matches(".csv").to_string(),
        rows: table.rows.len(),
        columns: 2 + table.columns.len(),
        months: table.rows.len(),
        entities: table.columns.len(),
        path,
    })
}

fn write_frame(output_dir: &Path, file: &str, mut frame: DataFrame) -> Result<PathBuf> {
    let path = output_dir.join(file);
    let mut handle = File::create(&path)
        .with_context(|| format!("create output file {}", path.display()))?;
    CsvWriter::new(&mut handle)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("write output file {}", path.display()))?;
    info!(output = %path.display(), rows = frame.height(), "dataset written");
    Ok(path)
}
