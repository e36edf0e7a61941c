use crate::core::constants::{
    LON_OFFSET, MAX_TERTIARY_INDEX, PRIMARY_LAT_SPAN, PRIMARY_LON_SPAN, SECONDARY_CODE_LEN,
    SECONDARY_DIVISIONS, TERTIARY_DIVISIONS,
};
use crate::core::level::MeshLevel;
use crate::util::code::parse_digits;
use crate::util::coord::LatLon;
use crate::util::error::{InvalidReason, JpMeshError};

/// The numeric fields of a mesh code, split out by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MeshDigits {
    pub level: MeshLevel,
    pub lat_idx: u32,
    pub lon_idx: u32,
    pub lat_sub: u32,
    pub lon_sub: u32,
    /// One-based tertiary sub-index, present for 8-digit codes.
    pub tertiary: Option<u32>,
}

impl MeshDigits {
    /// Zero-based `(row, col)` of the tertiary cell inside its parent.
    ///
    /// Uses floor division, so an index of `0` lands on row -1, col 9.
    pub fn tertiary_row_col(&self) -> Option<(i64, i64)> {
        self.tertiary.map(|n| {
            let zero_based = i64::from(n) - 1;
            let divisions = i64::from(TERTIARY_DIVISIONS);
            (
                zero_based.div_euclid(divisions),
                zero_based.rem_euclid(divisions),
            )
        })
    }

    fn check_ranges(&self, code: &str) -> Result<(), JpMeshError> {
        let sub_ok = self.lat_sub < SECONDARY_DIVISIONS && self.lon_sub < SECONDARY_DIVISIONS;
        let tertiary_ok = self
            .tertiary
            .is_none_or(|n| (1..=MAX_TERTIARY_INDEX).contains(&n));

        if sub_ok && tertiary_ok {
            Ok(())
        } else {
            Err(JpMeshError::invalid(code, InvalidReason::SubIndexOutOfRange))
        }
    }
}

/// Splits a mesh code into its numeric fields.
///
/// With `strict` set, sub-indices outside `0..=7` and tertiary indices outside
/// `1..=100` are rejected as well.
pub(crate) fn parse_mesh_code(code: &str, strict: bool) -> Result<MeshDigits, JpMeshError> {
    let level = MeshLevel::from_len(code.len())
        .ok_or_else(|| JpMeshError::invalid(code, InvalidReason::UnsupportedLength(code.len())))?;

    let tertiary = match level {
        MeshLevel::Secondary => None,
        MeshLevel::Tertiary => Some(parse_digits(code, SECONDARY_CODE_LEN, code.len())?),
    };

    let digits = MeshDigits {
        level,
        lat_idx: parse_digits(code, 0, 2)?,
        lon_idx: parse_digits(code, 2, 4)?,
        lat_sub: parse_digits(code, 4, 5)?,
        lon_sub: parse_digits(code, 5, 6)?,
        tertiary,
    };

    if strict {
        digits.check_ranges(code)?;
    }
    Ok(digits)
}

fn secondary_center(d: &MeshDigits) -> LatLon {
    let divisions = SECONDARY_DIVISIONS as f64;

    let base_lat = d.lat_idx as f64 * 2.0 / 3.0;
    let base_lon = d.lon_idx as f64 + LON_OFFSET;

    let sub_lat = d.lat_sub as f64 * PRIMARY_LAT_SPAN / divisions;
    let sub_lon = d.lon_sub as f64 * PRIMARY_LON_SPAN / divisions;

    LatLon::new(
        base_lat + sub_lat + PRIMARY_LAT_SPAN / (2.0 * divisions),
        base_lon + sub_lon + PRIMARY_LON_SPAN / (2.0 * divisions),
    )
}

/// Steps from the parent's center into its 10x10 grid.
///
/// The parent's half-cell is removed and the tertiary half-cell added back, so
/// the result is the center of tertiary cell (`row`, `col`). It agrees with
/// the corner-based bounds to within rounding, not bit for bit.
fn tertiary_center(parent: LatLon, row: i64, col: i64) -> LatLon {
    let fine = (SECONDARY_DIVISIONS * TERTIARY_DIVISIONS) as f64;
    let parent_half = 2.0 * SECONDARY_DIVISIONS as f64;

    let lat_offset = row as f64 * PRIMARY_LAT_SPAN / fine - PRIMARY_LAT_SPAN / parent_half
        + PRIMARY_LAT_SPAN / (2.0 * fine);
    let lon_offset = col as f64 * PRIMARY_LON_SPAN / fine - PRIMARY_LON_SPAN / parent_half
        + PRIMARY_LON_SPAN / (2.0 * fine);

    LatLon::new(parent.lat + lat_offset, parent.lon + lon_offset)
}

/// Computes the cell center for already-parsed digits.
pub(crate) fn center_of(digits: &MeshDigits) -> LatLon {
    let parent = secondary_center(digits);
    match (digits.level, digits.tertiary_row_col()) {
        (MeshLevel::Tertiary, Some((row, col))) => tertiary_center(parent, row, col),
        _ => parent,
    }
}

/// Decodes a mesh code to the center of the cell it denotes.
///
/// Six-digit codes resolve to the center of a secondary cell; eight-digit codes
/// resolve their six-digit prefix first and then step into the 10×10 tertiary
/// grid. Sub-indices are not range checked, so `"539946"` still decodes even
/// though `9` is past the last secondary row. Use [`decode_strict`] to reject those.
///
/// # Example
/// ```
/// use jpmesh_rs::decode;
///
/// # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
/// let center = decode("533946")?;
/// assert!((center.lat - 35.708333).abs() < 1e-6);
/// assert!((center.lon - 139.8125).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`JpMeshError::InvalidMeshCode`] with [`InvalidReason::UnsupportedLength`] -
///   the code is not 6 or 8 characters
/// - [`JpMeshError::InvalidMeshCode`] with [`InvalidReason::NonNumericDigit`] -
///   a character is not an ASCII digit
pub fn decode(code: &str) -> Result<LatLon, JpMeshError> {
    let digits = parse_mesh_code(code, false)?;
    Ok(center_of(&digits))
}

/// Like [`decode`], but rejects sub-indices outside their grid.
///
/// # Errors
///
/// Everything [`decode`] returns, plus [`InvalidReason::SubIndexOutOfRange`]
/// when a secondary sub-index exceeds 7 or the tertiary index is not in `1..=100`.
pub fn decode_strict(code: &str) -> Result<LatLon, JpMeshError> {
    let digits = parse_mesh_code(code, true)?;
    Ok(center_of(&digits))
}
