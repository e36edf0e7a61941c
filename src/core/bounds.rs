use crate::core::constants::{LON_OFFSET, PRIMARY_LAT_SPAN, PRIMARY_LON_SPAN, SECONDARY_DIVISIONS};
use crate::core::decode::{MeshDigits, parse_mesh_code};
use crate::core::level::MeshLevel;
use crate::util::coord::LatLon;
use crate::util::error::JpMeshError;
use geo_types::{Polygon, Rect, coord};

pub(crate) fn south_west_of(d: &MeshDigits) -> LatLon {
    let divisions = SECONDARY_DIVISIONS as f64;
    let lat =
        d.lat_idx as f64 * PRIMARY_LAT_SPAN + d.lat_sub as f64 * PRIMARY_LAT_SPAN / divisions;
    let lon = d.lon_idx as f64 + LON_OFFSET + d.lon_sub as f64 * PRIMARY_LON_SPAN / divisions;

    match d.tertiary_row_col() {
        Some((row, col)) => {
            let fine = MeshLevel::Tertiary;
            LatLon::new(
                lat + row as f64 * fine.lat_span(),
                lon + col as f64 * fine.lon_span(),
            )
        }
        None => LatLon::new(lat, lon),
    }
}

pub(crate) fn bounds_of(d: &MeshDigits) -> Rect<f64> {
    let sw = south_west_of(d);
    Rect::new(
        coord! { x: sw.lon, y: sw.lat },
        coord! { x: sw.lon + d.level.lon_span(), y: sw.lat + d.level.lat_span() },
    )
}

/// Returns the south-west corner of the cell a mesh code denotes.
///
/// Sub-indices are range checked, since a corner outside the parent grid has
/// no meaning.
pub fn south_west(code: &str) -> Result<LatLon, JpMeshError> {
    let digits = parse_mesh_code(code, true)?;
    Ok(south_west_of(&digits))
}

/// Returns the bounding box of the cell a mesh code denotes (x = longitude, y = latitude).
///
/// # Example
/// ```
/// use jpmesh_rs::cell_bounds;
///
/// # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
/// let rect = cell_bounds("533946")?;
/// assert!((rect.min().x - 139.75).abs() < 1e-9);
/// assert!((rect.max().x - 139.875).abs() < 1e-9);
/// # Ok(())
/// # }
/// ```
pub fn cell_bounds(code: &str) -> Result<Rect<f64>, JpMeshError> {
    let digits = parse_mesh_code(code, true)?;
    Ok(bounds_of(&digits))
}

/// Builds the closed rectangular polygon of a mesh cell.
pub fn create_cell_polygon(code: &str) -> Result<Polygon<f64>, JpMeshError> {
    Ok(cell_bounds(code)?.to_polygon())
}
