//! The end-to-end usage report run

use linkml_core::error::{LinkMLError, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use super::annotations::discover_annotations;
use super::columns::{ColumnSelection, build_columns, duplicate_columns};
use super::header::TemplateHeader;
use super::postprocess::clean_populated;
use super::template::write_template;
use crate::config::ReportConfig;
use crate::generator::ExcelGenerator;
use crate::loader::read_sheet_columns;
use crate::schema_view::SchemaView;
use crate::schemasheets::SchemaExporter;

/// Outcome of a report run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Rendered metamodel workbook
    pub workbook: PathBuf,
    /// Blank template
    pub template: PathBuf,
    /// Exporter output, meta row included
    pub populated_raw: PathBuf,
    /// Final report
    pub populated_clean: PathBuf,
    /// Annotation tags appended as columns
    pub annotation_tags: Vec<String>,
    /// How the base columns were chosen
    pub selection: ColumnSelection,
    /// Columns in the template, tags included
    pub template_columns: usize,
    /// Column names the template repeats
    pub duplicate_columns: Vec<String>,
    /// Element rows exported
    pub exported_rows: usize,
    /// Columns in the final report
    pub report_columns: usize,
    /// Columns dropped for being empty
    pub dropped_columns: Vec<String>,
}

/// Generates a template from the metamodel and populates it from a schema
#[derive(Debug, Clone)]
pub struct UsageReport {
    config: ReportConfig,
    generator: ExcelGenerator,
}

impl UsageReport {
    /// Create a run with the default workbook generator
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            generator: ExcelGenerator::new(),
        }
    }

    /// Use a differently configured workbook generator
    #[must_use]
    pub fn with_generator(mut self, generator: ExcelGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Configuration of this run
    #[must_use]
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Run every stage in order, writing the workbook and three TSV files
    ///
    /// # Errors
    ///
    /// Returns the first error from any stage: invalid configuration, schema
    /// loading, workbook rendering, sheet lookup, template export or file I/O.
    pub async fn run(&self) -> Result<ReportSummary> {
        self.config.validate()?;
        let config = &self.config;
        let source_path = config
            .source_schema_path
            .as_deref()
            .ok_or_else(|| LinkMLError::config("source_schema_path is required"))?;

        info!(source = %config.meta_path, "loading metamodel");
        let meta_view = SchemaView::load(&config.meta_path, &config.imports).await?;

        info!(source = %source_path, "loading source schema");
        let source_view = SchemaView::load(source_path, &config.imports).await?;

        let annotation_tags = discover_annotations(&source_view);
        info!(tags = annotation_tags.len(), "discovered annotation tags");

        self.generator
            .generate_file(&meta_view, &config.meta_model_excel_file)?;
        let base_columns = read_sheet_columns(&config.meta_model_excel_file, &config.base_class)?;
        info!(sheet = %config.base_class, columns = base_columns.len(), "read base columns");

        let column_set = build_columns(&base_columns, &config.columns);
        let header = TemplateHeader::synthesize(column_set.columns(), &annotation_tags)?;
        let duplicates: Vec<String> = duplicate_columns(&header.columns)
            .into_iter()
            .map(|(name, _)| name.to_string())
            .collect();
        for tag in annotation_tags.iter().filter(|tag| column_set.columns().contains(tag)) {
            warn!(%tag, "annotation tag has the same name as a template column");
        }
        write_template(&config.destination_template, &header)?;

        let populated_raw = config.populated_raw_path();
        let exported_rows =
            SchemaExporter::new(&source_view).export_file(&config.destination_template, &populated_raw)?;

        let populated_clean = config.populated_clean_path();
        let cleaned = clean_populated(&populated_raw, &populated_clean)?;

        Ok(ReportSummary {
            workbook: config.meta_model_excel_file.clone(),
            template: config.destination_template.clone(),
            populated_raw,
            populated_clean,
            selection: column_set.selection(),
            template_columns: header.columns.len(),
            duplicate_columns: duplicates,
            annotation_tags,
            exported_rows,
            report_columns: cleaned.kept_columns.len(),
            dropped_columns: cleaned.dropped_columns,
        })
    }
}
