use crate::api::mesh_cell::MeshCell;
use crate::core::decode::decode;
use crate::util::coord::LatLon;
use crate::util::error::JpMeshError;
use rayon::prelude::*;

/// Decodes many mesh codes in parallel.
///
/// Results come back in input order; one bad code does not stop the others.
///
/// # Example
/// ```
/// use jpmesh_rs::decode_all;
///
/// let results = decode_all(&["533946", "12345", "53394611"]);
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// assert!(results[2].is_ok());
/// ```
pub fn decode_all<S>(codes: &[S]) -> Vec<Result<LatLon, JpMeshError>>
where
    S: AsRef<str> + Sync,
{
    codes.par_iter().map(|code| decode(code.as_ref())).collect()
}

/// Builds a [`MeshCell`] for every code, in parallel.
///
/// Fails with the first invalid code encountered.
pub fn cells_from_codes<S>(codes: &[S]) -> Result<Vec<MeshCell>, JpMeshError>
where
    S: AsRef<str> + Sync,
{
    codes
        .par_iter()
        .map(|code| MeshCell::from_code(code.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_all_preserves_order() -> Result<(), JpMeshError> {
        let codes: Vec<String> = (1..100).map(|n| format!("533946{:02}", n)).collect();
        let results = decode_all(&codes);

        assert_eq!(results.len(), codes.len());
        for (code, result) in codes.iter().zip(results) {
            assert_eq!(result?, decode(code)?);
        }
        Ok(())
    }

    #[test]
    fn test_decode_all_mixed() {
        let results = decode_all(&["533946", "ab3946", "123456789"]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_cells_from_codes() -> Result<(), JpMeshError> {
        let cells = cells_from_codes(&["533946", "53394611"])?;
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].code, "53394611");
        Ok(())
    }

    #[test]
    fn test_cells_from_codes_fails_on_invalid() {
        assert!(cells_from_codes(&["533946", "5339"]).is_err());
    }
}
