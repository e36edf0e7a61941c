/// Latitude span of a primary band, in degrees (40 arc-minutes)
pub const PRIMARY_LAT_SPAN: f64 = 2.0 / 3.0;

/// Longitude span of a primary band, in degrees
pub const PRIMARY_LON_SPAN: f64 = 1.0;

/// Added to the two-digit longitude index to get the band's west edge
pub const LON_OFFSET: f64 = 100.0;

/// Secondary cells per primary band edge (8×8 grid)
pub const SECONDARY_DIVISIONS: u32 = 8;

/// Tertiary cells per secondary cell edge (10×10 grid)
pub const TERTIARY_DIVISIONS: u32 = 10;

/// Largest valid one-based tertiary sub-index
pub const MAX_TERTIARY_INDEX: u32 = TERTIARY_DIVISIONS * TERTIARY_DIVISIONS;

/// Digit count of a primary-secondary code
pub const SECONDARY_CODE_LEN: usize = 6;

/// Digit count of a tertiary code
pub const TERTIARY_CODE_LEN: usize = 8;
