//! Subcommand entry points.

use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use cpi_cli::pipeline::{RunOptions, RunResult, run_pipeline};
use cpi_model::{PipelineConfig, SheetLayout, WideRules};

use crate::cli::ProcessArgs;
use crate::summary::apply_table_style;

pub fn run_process(args: &ProcessArgs) -> Result<RunResult> {
    let config = load_config(args)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("output"));
    let options = RunOptions {
        input_dir: args.input_dir.clone(),
        output_dir,
        config,
    };
    run_pipeline(&options)
}

pub fn run_layouts() -> Result<()> {
    let config = PipelineConfig::default();
    let mut table = Table::new();
    table.set_header(vec![
        "Sheet", "File", "Code col", "Name col", "Header row", "Date row", "Data row",
    ]);
    apply_table_style(&mut table);
    for layout in [&config.groups_sheet, &config.divisions_sheet] {
        add_layout_row(&mut table, layout);
    }
    println!("{table}");

    let mut rules = Table::new();
    rules.set_header(vec!["Wide output", "First column", "Last column", "Excluded codes"]);
    apply_table_style(&mut rules);
    add_rules_row(&mut rules, "groups", &config.groups_wide);
    add_rules_row(&mut rules, "foods", &config.foods_wide);
    println!("{rules}");
    Ok(())
}

fn add_layout_row(table: &mut Table, layout: &SheetLayout) {
    table.add_row(vec![
        layout.name.clone(),
        layout.file.clone(),
        layout.code_column.to_string(),
        layout.name_column.to_string(),
        layout.header_row.to_string(),
        layout.date_row.to_string(),
        layout.data_start_row.to_string(),
    ]);
}

fn add_rules_row(table: &mut Table, name: &str, rules: &WideRules) {
    table.add_row(vec![
        name.to_string(),
        rules.pinned_first.clone(),
        rules.pinned_last.clone(),
        rules.excluded_codes.join(", "),
    ]);
}

/// Resolve the run configuration: built-in defaults, then the optional
/// JSON file, then individual CLI flags.
fn load_config(args: &ProcessArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config file {}", path.display()))?;
            let config: PipelineConfig = serde_json::from_str(&text)
                .with_context(|| format!("parse config file {}", path.display()))?;
            info!(config = %path.display(), "configuration file loaded");
            config
        }
        None => PipelineConfig::default(),
    };
    if args.strict_months {
        config.strict_months = true;
    }
    Ok(config)
}
