//! Accepted input ranges. Widths are millimetres, lengths metres.

pub const MIN_MATERIAL_WIDTH: u32 = 500;
pub const MAX_MATERIAL_WIDTH: u32 = 910;

/// Narrowest usable width left after edge trimming.
pub const MIN_USABLE_WIDTH: u32 = 500;

pub const MIN_LENGTH: f64 = 30.0;
pub const MAX_LENGTH: f64 = 1100.0;

/// Narrowest width a catalog may list.
pub const MIN_CATALOG_WIDTH: f64 = 1.0;
