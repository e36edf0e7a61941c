pub mod batch;
pub mod mesh_arrow;
pub mod mesh_cell;
pub mod mesh_csv;
pub mod mesh_parquet;

pub use batch::{cells_from_codes, decode_all};
pub use mesh_arrow::MeshCellsToArrow;
pub use mesh_cell::MeshCell;
pub use mesh_csv::{GeometryFormat, MeshCsv, MeshCsvConfig, MeshCsvSummary, csv_to_mesh_csv};
pub use mesh_parquet::{MESH_CODE_COLUMN_KEY, MeshCellsToGeoParquet, write_geoparquet};
