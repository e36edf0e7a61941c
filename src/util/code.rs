use crate::core::level::MeshLevel;
use crate::util::error::{InvalidReason, JpMeshError};

/// Parses `code[start..end]` as an unsigned decimal number.
///
/// Works on bytes, so a multi-byte character never splits a slice; it just
/// fails the digit check.
pub(crate) fn parse_digits(code: &str, start: usize, end: usize) -> Result<u32, JpMeshError> {
    let digits = code
        .as_bytes()
        .get(start..end)
        .ok_or_else(|| JpMeshError::invalid(code, InvalidReason::UnsupportedLength(code.len())))?;

    digits.iter().try_fold(0u32, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + u32::from(b - b'0'))
        } else {
            Err(JpMeshError::invalid(code, InvalidReason::NonNumericDigit))
        }
    })
}

/// Zero-pads an integer mesh code to the width of `level`.
///
/// Mesh codes stored as integers lose their leading zeros (`000000` becomes `0`),
/// which would shift every index when the string is sliced. Callers holding
/// integer codes should go through this before decoding.
///
/// # Example
/// ```
/// use jpmesh_rs::{MeshLevel, pad_mesh_code};
///
/// # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
/// assert_eq!(pad_mesh_code(533946, MeshLevel::Secondary)?, "533946");
/// assert_eq!(pad_mesh_code(46, MeshLevel::Secondary)?, "000046");
/// assert_eq!(pad_mesh_code(1, MeshLevel::Tertiary)?, "00000001");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// [`JpMeshError::InvalidMeshCode`] when `value` has more digits than the level allows.
pub fn pad_mesh_code(value: u64, level: MeshLevel) -> Result<String, JpMeshError> {
    let width = level.code_len();
    let code = format!("{:0width$}", value, width = width);
    if code.len() != width {
        return Err(JpMeshError::invalid(
            &code,
            InvalidReason::UnsupportedLength(code.len()),
        ));
    }
    Ok(code)
}
