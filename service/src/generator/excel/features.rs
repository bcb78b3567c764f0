use bitflags::bitflags;

bitflags! {
    /// Excel generation features to enable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExcelFeatures: u8 {
        /// Drop-down validation for enum-ranged slots.
        const ADD_VALIDATION = 0b0001;
        /// Freeze the header row.
        const FREEZE_HEADERS = 0b0010;
        /// Add filters.
        const ADD_FILTERS = 0b0100;
        /// Attach slot descriptions to header cells as notes.
        const HEADER_NOTES = 0b1000;

        /// All features enabled (default).
        const ALL = Self::ADD_VALIDATION.bits()
                  | Self::FREEZE_HEADERS.bits()
                  | Self::ADD_FILTERS.bits()
                  | Self::HEADER_NOTES.bits();

        /// Header row only.
        const NONE = 0b0000;
    }
}
