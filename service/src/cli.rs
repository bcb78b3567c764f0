//! Command-line interface for the usage report.
//!
//! Options mirror [`ReportConfig`]. A `--config` YAML file is read first and
//! any option given on the command line replaces the file's value.

use clap::Parser;
use colored::Colorize;
use linkml_core::error::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;
use crate::report::{ReportSummary, UsageReport};

/// Generate a TSV report of slot usage in a schema, guided by a workbook
/// rendering of the `LinkML` metamodel.
#[derive(Parser, Debug)]
#[command(name = "gen-pop-linkml2sheets", author, version, about, long_about = None)]
pub struct Cli {
    /// URL or filesystem path to the `LinkML` metamodel YAML
    /// [default: the linkml-model meta.yaml on GitHub]
    #[arg(long)]
    meta_path: Option<String>,

    /// Where the workbook rendering of the metamodel is saved [default: meta.xlsx]
    #[arg(long)]
    meta_model_excel_file: Option<PathBuf>,

    /// Metamodel class whose sheet forms the basis of the report [default: `slot_definition`]
    #[arg(long)]
    base_class: Option<String>,

    /// Metaslots not in the base class to put first (repeatable) [default: slot, class]
    #[arg(long = "columns-to-insert", value_name = "COLUMN")]
    columns_to_insert: Vec<String>,

    /// Base-class metaslots to leave out (repeatable)
    #[arg(long = "columns-to-remove", value_name = "COLUMN")]
    columns_to_remove: Vec<String>,

    /// Exact column list, overriding every other column option (repeatable)
    #[arg(long = "columns-to-use", value_name = "COLUMN")]
    columns_to_use: Vec<String>,

    /// URL or filesystem path to the schema that populates the report
    #[arg(long)]
    source_schema_path: Option<String>,

    /// Where the template is saved; the populated reports are named after it
    /// [default: `usage_template.tsv`]
    #[arg(long)]
    destination_template: Option<PathBuf>,

    /// Directory or URL that `linkml:` imports resolve against
    #[arg(long)]
    linkml_base: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Merge the configuration file (if any) with the command-line options
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn into_config(self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(meta_path) = self.meta_path {
            config.meta_path = meta_path;
        }
        if let Some(file) = self.meta_model_excel_file {
            config.meta_model_excel_file = file;
        }
        if let Some(base_class) = self.base_class {
            config.base_class = base_class;
        }
        if !self.columns_to_insert.is_empty() {
            config.columns.columns_to_insert = self.columns_to_insert;
        }
        if !self.columns_to_remove.is_empty() {
            config.columns.columns_to_remove = self.columns_to_remove;
        }
        if !self.columns_to_use.is_empty() {
            config.columns.columns_to_use = self.columns_to_use;
        }
        if self.source_schema_path.is_some() {
            config.source_schema_path = self.source_schema_path;
        }
        if let Some(template) = self.destination_template {
            config.destination_template = template;
        }
        if let Some(base) = self.linkml_base {
            config.imports.linkml_base = base;
        }
        Ok(config)
    }

    /// Install the tracing subscriber. `RUST_LOG` wins unless `--verbose` is set.
    pub fn init_tracing(&self) {
        let filter = if self.verbose {
            EnvFilter::new("linkml2sheets=debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkml2sheets=info"))
        };

        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            eprintln!("{} {e}", "Failed to initialise logging:".yellow());
        }
    }
}

/// Parse arguments, run the report, and print its summary
///
/// # Errors
///
/// Returns any configuration or pipeline error.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.init_tracing();

    let config = cli.into_config()?;
    match UsageReport::new(config).run().await {
        Ok(summary) => {
            print_summary(&summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", "✗ Report failed:".red().bold());
            Err(e)
        }
    }
}

fn print_summary(summary: &ReportSummary) {
    println!("{}", "✓ Usage report generated".green().bold());
    println!("  {} {}", "Workbook:".cyan(), summary.workbook.display());
    println!(
        "  {} {} ({} columns, {:?})",
        "Template:".cyan(),
        summary.template.display(),
        summary.template_columns,
        summary.selection
    );
    println!(
        "  {} {} ({} rows)",
        "Populated:".cyan(),
        summary.populated_raw.display(),
        summary.exported_rows
    );
    println!(
        "  {} {} ({} columns)",
        "Report:".cyan(),
        summary.populated_clean.display(),
        summary.report_columns
    );

    if !summary.annotation_tags.is_empty() {
        println!("  {} {}", "Annotation tags:".cyan(), summary.annotation_tags.join(", "));
    }
    if !summary.duplicate_columns.is_empty() {
        println!(
            "  {} {}",
            "Duplicate columns:".yellow(),
            summary.duplicate_columns.join(", ")
        );
    }
    if !summary.dropped_columns.is_empty() {
        println!(
            "  {} {}",
            "Dropped empty columns:".dimmed(),
            summary.dropped_columns.join(", ")
        );
    }
}
