use super::super::traits::{GeneratorError, GeneratorResult};
use super::generator::ExcelGenerator;
use crate::schema_view::SchemaView;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

impl ExcelGenerator {
    /// Render the schema to an `.xlsx` file, overwriting any existing file.
    ///
    /// Returns the names of the worksheets written, in class order.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema has no concrete class, a sheet cannot
    /// be built, or the file cannot be written.
    pub fn generate_file(
        &self,
        view: &SchemaView,
        path: impl AsRef<Path>,
    ) -> GeneratorResult<Vec<String>> {
        let path = path.as_ref();
        let (mut workbook, sheets) = self.build_workbook(view)?;
        workbook.save(path).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write {}: {e}", path.display()))
        })?;
        info!(path = %path.display(), sheets = sheets.len(), "wrote workbook");
        Ok(sheets)
    }

    /// Check that the schema can be rendered at all.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no class is concrete.
    pub fn validate_schema(view: &SchemaView) -> GeneratorResult<()> {
        if view.merged().classes.values().any(|c| c.is_concrete()) {
            Ok(())
        } else {
            Err(GeneratorError::Validation(format!(
                "Schema '{}' has no concrete (non-abstract, non-mixin) class",
                view.schema().name
            )))
        }
    }

    fn build_workbook(&self, view: &SchemaView) -> GeneratorResult<(Workbook, Vec<String>)> {
        Self::validate_schema(view)?;

        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_background_color(Color::Gray)
            .set_font_color(Color::White)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin);

        let mut used_names: HashSet<String> = HashSet::new();
        let mut sheets = Vec::new();

        for (class_name, class_def) in &view.merged().classes {
            if !class_def.is_concrete() {
                continue;
            }

            let sheet_name = Self::sanitize_sheet_name(class_name);
            if sheet_name.is_empty() {
                warn!(class = %class_name, "class name has no usable sheet name, skipping");
                continue;
            }
            // Excel compares sheet names case-insensitively
            if !used_names.insert(sheet_name.to_lowercase()) {
                warn!(class = %class_name, sheet = %sheet_name, "duplicate sheet name, skipping");
                continue;
            }

            self.generate_class_sheet(&mut workbook, &sheet_name, class_name, view, &header_format)?;
            sheets.push(sheet_name);
        }

        Ok((workbook, sheets))
    }
}
