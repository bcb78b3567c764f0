use super::super::traits::GeneratorError;

/// Safely cast usize to u16 for Excel column indices.
/// Excel has a maximum of 16,384 columns (2^14).
pub(super) fn usize_to_u16_column(value: usize) -> Result<u16, GeneratorError> {
    const MAX_EXCEL_COLUMNS: usize = 16_384;

    if value >= MAX_EXCEL_COLUMNS {
        return Err(GeneratorError::Generation(format!(
            "Too many columns for Excel: {value} (max: {MAX_EXCEL_COLUMNS})"
        )));
    }

    u16::try_from(value)
        .map_err(|_| GeneratorError::Generation(format!("Column index {value} cannot fit in u16")))
}
