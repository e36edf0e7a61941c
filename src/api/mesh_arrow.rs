use crate::api::mesh_cell::MeshCell;
use crate::util::error::JpMeshError;
use arrow_array::builder::{Float64Builder, StringBuilder, UInt8Builder};
use arrow_array::{ArrayRef, RecordBatch, StructArray};
use arrow_schema::{DataType, Field, Fields, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

/// Mesh coordinates are plain WGS84 degrees with x = longitude.
fn wgs84() -> Arc<Metadata> {
    Arc::new(Metadata::new(
        Crs::from_authority_code("EPSG:4326".to_string()),
        None,
    ))
}

fn bbox_fields() -> Fields {
    Fields::from(
        ["xmin", "ymin", "xmax", "ymax"]
            .into_iter()
            .map(|name| Field::new(name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    )
}

/// Schema shared by every batch built from mesh cells.
fn mesh_schema(geometry: Field) -> Schema {
    Schema::new(vec![
        Field::new("code", DataType::Utf8, false),
        Field::new("level", DataType::UInt8, false),
        Field::new("latitude", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("bbox", DataType::Struct(bbox_fields()), false),
        geometry,
    ])
}

/// Conversion of mesh cells into Arrow arrays.
pub trait MeshCellsToArrow {
    /// Cell centers as a GeoArrow point array.
    fn to_arrow_points(&self) -> PointArray;
    /// Cell rectangles as a GeoArrow polygon array.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Cell bounds as a struct of `xmin`, `ymin`, `xmax`, `ymax`.
    fn to_arrow_bbox(&self) -> Result<StructArray, JpMeshError>;
    /// One row per cell: code, level, latitude, longitude, bbox, geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, JpMeshError>;
}

impl MeshCellsToArrow for [MeshCell] {
    fn to_arrow_points(&self) -> PointArray {
        let mut points =
            PointBuilder::with_capacity(PointType::new(Dimension::XY, wgs84()), self.len());
        self.iter()
            .for_each(|cell| points.push_point(Some(&cell.center)));
        points.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let rects: Vec<_> = self.par_iter().map(|cell| cell.bounds.to_polygon()).collect();
        PolygonBuilder::from_polygons(&rects, PolygonType::new(Dimension::XY, wgs84())).finish()
    }

    fn to_arrow_bbox(&self) -> Result<StructArray, JpMeshError> {
        let mut corners: [Float64Builder; 4] =
            std::array::from_fn(|_| Float64Builder::with_capacity(self.len()));
        for cell in self {
            let (min, max) = (cell.bounds.min(), cell.bounds.max());
            for (builder, value) in corners.iter_mut().zip([min.x, min.y, max.x, max.y]) {
                builder.append_value(value);
            }
        }
        let columns: Vec<ArrayRef> = corners
            .iter_mut()
            .map(|builder| Arc::new(builder.finish()) as ArrayRef)
            .collect();
        StructArray::try_new(bbox_fields(), columns, None)
            .map_err(|e| JpMeshError::IoError(e.to_string()))
    }

    fn to_record_batch(&self) -> Result<RecordBatch, JpMeshError> {
        let mut codes = StringBuilder::with_capacity(self.len(), self.len() * 8);
        let mut levels = UInt8Builder::with_capacity(self.len());
        let mut lats = Float64Builder::with_capacity(self.len());
        let mut lons = Float64Builder::with_capacity(self.len());
        for cell in self {
            codes.append_value(&cell.code);
            levels.append_value(cell.level.code_len() as u8);
            lats.append_value(cell.lat());
            lons.append_value(cell.lon());
        }

        let polygons = self.to_arrow_polygons();
        let schema = mesh_schema(polygons.extension_type().to_field("geometry", false));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(codes.finish()),
            Arc::new(levels.finish()),
            Arc::new(lats.finish()),
            Arc::new(lons.finish()),
            Arc::new(self.to_arrow_bbox()?),
            Arc::new(polygons.into_arrow()),
        ];

        RecordBatch::try_new(Arc::new(schema), columns)
            .map_err(|e| JpMeshError::IoError(e.to_string()))
    }
}
