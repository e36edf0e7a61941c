use crate::api::mesh_arrow::MeshCellsToArrow;
use crate::api::mesh_parquet::MeshCellsToGeoParquet;
use crate::core::bounds::bounds_of;
use crate::core::constants::SECONDARY_CODE_LEN;
use crate::core::decode::{center_of, parse_mesh_code};
use crate::core::level::MeshLevel;
use crate::util::code::pad_mesh_code;
use crate::util::coord::{Coordinate, LatLon};
use crate::util::error::JpMeshError;
use arrow_array::RecordBatch;
use geo::{Distance, Haversine};
use geo_types::{Point, Polygon, Rect};
use geoarrow_array::array::{PointArray, PolygonArray};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single cell of the Japanese standard area mesh.
///
/// Each `MeshCell` holds the code it was built from, its resolution level and
/// its center point in longitude/latitude degrees.
///
/// # Example
///
/// ```
/// use jpmesh_rs::MeshCell;
///
/// # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
/// let cell = MeshCell::from_code("53394611")?;
/// println!("Center: ({}, {})", cell.lat(), cell.lon());
///
/// if let Some(parent) = cell.parent() {
///     assert_eq!(parent.code, "533946");
///     assert!(parent.contains(&cell.center));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCell {
    /// The 6 or 8 digit mesh code
    pub code: String,
    /// Resolution level, derived from the code length
    pub level: MeshLevel,
    /// Cell center (x = longitude, y = latitude)
    pub center: Point<f64>,
    /// Cell extent (x = longitude, y = latitude)
    pub bounds: Rect<f64>,
}

impl MeshCell {
    /// Create a MeshCell from a mesh code string.
    ///
    /// Unlike [`decode`](crate::decode), sub-indices are range checked here:
    /// a cell always has well-defined bounds.
    pub fn from_code(code: &str) -> Result<Self, JpMeshError> {
        let digits = parse_mesh_code(code, true)?;
        let center = center_of(&digits).to_point();

        Ok(Self {
            code: code.to_string(),
            level: digits.level,
            center,
            bounds: bounds_of(&digits),
        })
    }

    /// Create a MeshCell from an integer mesh code, restoring leading zeros.
    ///
    /// # Example
    /// ```
    /// use jpmesh_rs::{MeshCell, MeshLevel};
    ///
    /// # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
    /// let cell = MeshCell::from_integer(1, MeshLevel::Tertiary)?;
    /// assert_eq!(cell.code, "00000001");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_integer(value: u64, level: MeshLevel) -> Result<Self, JpMeshError> {
        let code = pad_mesh_code(value, level)?;
        Self::from_code(&code)
    }

    /// Returns the latitude of the cell center in degrees.
    pub fn lat(&self) -> f64 {
        self.center.y()
    }

    /// Returns the longitude of the cell center in degrees.
    pub fn lon(&self) -> f64 {
        self.center.x()
    }

    pub fn lat_lon(&self) -> LatLon {
        LatLon::new(self.lat(), self.lon())
    }

    /// Returns the south-west corner of the cell.
    pub fn south_west(&self) -> LatLon {
        LatLon::new(self.bounds.min().y, self.bounds.min().x)
    }

    /// Converts this cell to a rectangular polygon.
    ///
    /// Returns a `geo_types::Polygon` suitable for spatial operations or
    /// GeoJSON/WKT export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Returns the secondary cell an 8-digit cell lies in, or `None` for a 6-digit cell.
    pub fn parent(&self) -> Option<Self> {
        match self.level {
            MeshLevel::Secondary => None,
            MeshLevel::Tertiary => Self::from_code(self.code.get(..SECONDARY_CODE_LEN)?).ok(),
        }
    }

    /// Returns true when the point falls inside this cell.
    ///
    /// The south and west edges belong to the cell, the north and east edges to
    /// its neighbours, so adjacent cells never both claim a point.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        coord.x() >= min.x && coord.x() < max.x && coord.y() >= min.y && coord.y() < max.y
    }

    /// Great-circle distance between two cell centers in meters.
    pub fn distance_to(&self, other: &MeshCell) -> f64 {
        Haversine.distance(self.center, other.center)
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, JpMeshError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), JpMeshError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

impl FromStr for MeshCell {
    type Err = JpMeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for MeshCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
