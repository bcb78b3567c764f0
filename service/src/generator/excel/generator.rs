use super::features::ExcelFeatures;

/// Excel generator entry point.
#[derive(Debug, Clone, Copy)]
pub struct ExcelGenerator {
    /// Enabled Excel features.
    features: ExcelFeatures,
}

impl ExcelGenerator {
    /// Create a new Excel generator with all features enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            features: ExcelFeatures::ALL,
        }
    }

    /// Create a generator with an explicit feature set.
    #[must_use]
    pub fn with_features(features: ExcelFeatures) -> Self {
        Self { features }
    }

    /// Enabled features.
    #[must_use]
    pub fn features(&self) -> ExcelFeatures {
        self.features
    }

    /// Check if data validation is enabled.
    #[must_use]
    pub fn add_validation(&self) -> bool {
        self.features.contains(ExcelFeatures::ADD_VALIDATION)
    }

    /// Check if header freezing is enabled.
    #[must_use]
    pub fn freeze_headers(&self) -> bool {
        self.features.contains(ExcelFeatures::FREEZE_HEADERS)
    }

    /// Check if filters are enabled.
    #[must_use]
    pub fn add_filters(&self) -> bool {
        self.features.contains(ExcelFeatures::ADD_FILTERS)
    }

    /// Check if header notes are enabled.
    #[must_use]
    pub fn header_notes(&self) -> bool {
        self.features.contains(ExcelFeatures::HEADER_NOTES)
    }

    /// Configure data validation.
    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.features.set(ExcelFeatures::ADD_VALIDATION, enabled);
        self
    }

    /// Configure header freezing.
    #[must_use]
    pub fn with_frozen_headers(mut self, enabled: bool) -> Self {
        self.features.set(ExcelFeatures::FREEZE_HEADERS, enabled);
        self
    }

    /// Configure filter addition.
    #[must_use]
    pub fn with_filters(mut self, enabled: bool) -> Self {
        self.features.set(ExcelFeatures::ADD_FILTERS, enabled);
        self
    }
}

impl Default for ExcelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
