use crate::api::mesh_arrow::MeshCellsToArrow;
use crate::api::mesh_cell::MeshCell;
use crate::core::level::MeshLevel;
use crate::util::error::JpMeshError;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use log::debug;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use parquet::format::KeyValue;
use std::fs::File;
use std::path::Path;

/// File-level key naming the column that holds mesh codes.
pub const MESH_CODE_COLUMN_KEY: &str = "jpmesh:code_column";

fn io_err(e: impl std::fmt::Display) -> JpMeshError {
    JpMeshError::IoError(e.to_string())
}

/// Writes record batches with a GeoArrow geometry column to a GeoParquet file.
///
/// Every batch becomes its own row group. All batches must share the first
/// one's schema. Geometry is stored as WKB with the `geo` metadata computed over
/// every batch.
pub fn write_geoparquet(
    batches: &[RecordBatch],
    path: impl AsRef<Path>,
) -> Result<(), JpMeshError> {
    let first = batches
        .first()
        .ok_or_else(|| JpMeshError::IoError("no record batches to write".into()))?;

    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&first.schema(), &options).map_err(io_err)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::default()))
        .build();
    let file = File::create(path).map_err(io_err)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), Some(props)).map_err(io_err)?;

    for batch in batches {
        let encoded = encoder.encode_record_batch(batch).map_err(io_err)?;
        writer.write(&encoded).map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        debug!("wrote row group of {} cells", batch.num_rows());
    }

    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_err)?);
    writer.append_key_value_metadata(KeyValue::new(
        MESH_CODE_COLUMN_KEY.to_string(),
        "code".to_string(),
    ));
    writer.close().map_err(io_err)?;
    Ok(())
}

pub trait MeshCellsToGeoParquet: MeshCellsToArrow {
    /// Writes the cells to GeoParquet with one row group per mesh level.
    ///
    /// Secondary cells come first, then tertiary cells; input order is kept
    /// within a level.
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), JpMeshError>;
}

impl MeshCellsToGeoParquet for [MeshCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), JpMeshError> {
        let mut batches = Vec::new();
        for level in [MeshLevel::Secondary, MeshLevel::Tertiary] {
            let cells: Vec<MeshCell> = self.iter().filter(|c| c.level == level).cloned().collect();
            if !cells.is_empty() {
                batches.push(cells.to_record_batch()?);
            }
        }
        if batches.is_empty() {
            // an empty file still carries the schema
            batches.push(self.to_record_batch()?);
        }
        write_geoparquet(&batches, path)
    }
}
