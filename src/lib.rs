//! # jpmesh-rs
//!
//! Decoder for the Japanese standard area-mesh code. There are currently
//! three main entry points.
//!
//! ### 1. `decode` - Mesh Code to Coordinate
//!
//! ```
//! use jpmesh_rs::decode;
//!
//! # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
//! let center = decode("53394611")?;
//! println!("{}, {}", center.lat, center.lon);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `MeshCell` - Single Cell Operations
//!
//! ```
//! use jpmesh_rs::MeshCell;
//!
//! # fn main() -> Result<(), jpmesh_rs::JpMeshError> {
//! let cell = MeshCell::from_code("533946")?;
//! let polygon = cell.to_polygon();
//! println!("{} spans {:?}", cell, cell.bounds);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `MeshCsv` - CSV File Enrichment
//!
//! Append latitude/longitude columns to a CSV whose rows carry mesh codes:
//!
//! ```no_run
//! use jpmesh_rs::{MeshCsv, MeshCsvConfig, GeometryFormat};
//!
//! let config = MeshCsvConfig::new("mesh_code")
//!     .exclude(vec!["source_code".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! // Using trait method
//! "traffic.csv".to_mesh_csv("traffic_located.csv", &config).unwrap();
//! ```
//!
//! Codes stored as integers lose their leading zeros; restore them with
//! [`pad_mesh_code`] (or `MeshCsvConfig::pad_to`) before decoding.

pub mod api;
pub mod core;
pub mod util;

pub use api::{
    GeometryFormat, MeshCell, MeshCellsToArrow, MeshCellsToGeoParquet, MeshCsv, MeshCsvConfig,
    MeshCsvSummary, cells_from_codes, csv_to_mesh_csv, decode_all, write_geoparquet,
};
pub use core::{
    LON_OFFSET, MAX_TERTIARY_INDEX, MeshLevel, PRIMARY_LAT_SPAN, PRIMARY_LON_SPAN,
    SECONDARY_CODE_LEN, SECONDARY_DIVISIONS, TERTIARY_CODE_LEN, TERTIARY_DIVISIONS, cell_bounds,
    create_cell_polygon, decode, decode_strict, south_west,
};
pub use util::{Coordinate, InvalidReason, JpMeshError, LatLon, pad_mesh_code};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
