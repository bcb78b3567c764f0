use crate::generator::traits::{GeneratorError, GeneratorResult};
use crate::schema_view::SchemaView;
use linkml_core::prelude::{PermissibleValue, SlotDefinition};
use rust_xlsxwriter::{DataValidation, Format, Note, Workbook, Worksheet};
use tracing::debug;

use super::super::cast;
use super::super::generator::ExcelGenerator;

const HEADER_ROW: u32 = 0;
const DATA_START_ROW: u32 = 1;
const LAST_EXCEL_ROW: u32 = 1_048_575;
const MAX_SHEET_NAME_LEN: usize = 31;

impl ExcelGenerator {
    pub(crate) fn generate_class_sheet(
        &self,
        workbook: &mut Workbook,
        sheet_name: &str,
        class_name: &str,
        view: &SchemaView,
        header_format: &Format,
    ) -> GeneratorResult<()> {
        let worksheet = workbook.add_worksheet().set_name(sheet_name)?;

        let slots = Self::collect_class_slots(class_name, view)?;
        debug!(class = %class_name, slots = slots.len(), "rendering class sheet");
        if slots.is_empty() {
            return Ok(());
        }

        self.write_headers(worksheet, &slots, header_format)?;

        if self.add_validation() {
            Self::add_enum_validations(worksheet, &slots, view)?;
        }

        if self.freeze_headers() {
            worksheet.set_freeze_panes(DATA_START_ROW, 0)?;
        }

        let max_col = cast::usize_to_u16_column(slots.len() - 1)?;
        if self.add_filters() {
            worksheet.autofilter(HEADER_ROW, 0, HEADER_ROW, max_col)?;
        }

        for col in 0..=max_col {
            worksheet.set_column_width(col, 15)?;
        }

        Ok(())
    }

    /// Induced slots of a class, in header order.
    fn collect_class_slots(class_name: &str, view: &SchemaView) -> GeneratorResult<Vec<SlotDefinition>> {
        view.class_induced_slot_names(class_name)?
            .iter()
            .map(|slot_name| view.induced_slot(slot_name, class_name).map_err(GeneratorError::from))
            .collect()
    }

    fn write_headers(
        &self,
        worksheet: &mut Worksheet,
        slots: &[SlotDefinition],
        header_format: &Format,
    ) -> GeneratorResult<()> {
        for (col, slot_def) in slots.iter().enumerate() {
            let col = cast::usize_to_u16_column(col)?;
            worksheet.write_string_with_format(HEADER_ROW, col, &slot_def.name, header_format)?;

            if self.header_notes()
                && let Some(desc) = &slot_def.description
            {
                let note = Note::new(desc).set_author("linkml2sheets");
                worksheet.insert_note(HEADER_ROW, col, &note)?;
            }
        }
        Ok(())
    }

    fn add_enum_validations(
        worksheet: &mut Worksheet,
        slots: &[SlotDefinition],
        view: &SchemaView,
    ) -> GeneratorResult<()> {
        for (col_index, slot_def) in slots.iter().enumerate() {
            let Some(enum_def) = slot_def.range.as_deref().and_then(|r| view.get_enum(r)) else {
                continue;
            };
            let values: Vec<&str> = enum_def
                .permissible_values
                .iter()
                .map(PermissibleValue::text)
                .collect();
            if values.is_empty() {
                continue;
            }

            // Excel caps an inline list at 255 characters
            match DataValidation::new().allow_list_strings(&values) {
                Ok(validation) => {
                    let col = cast::usize_to_u16_column(col_index)?;
                    worksheet.add_data_validation(DATA_START_ROW, col, LAST_EXCEL_ROW, col, &validation)?;
                }
                Err(e) => {
                    debug!(slot = %slot_def.name, enum_name = %enum_def.name, error = %e, "skipping enum validation");
                }
            }
        }
        Ok(())
    }

    /// Strip characters Excel forbids in sheet names and cap the length.
    pub(crate) fn sanitize_sheet_name(name: &str) -> String {
        name.chars()
            .filter(|c| !matches!(c, '\\' | '/' | '?' | '*' | '[' | ']' | ':'))
            .take(MAX_SHEET_NAME_LEN)
            .collect()
    }
}
