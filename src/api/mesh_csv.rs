use crate::core::bounds::bounds_of;
use crate::core::decode::{center_of, parse_mesh_code};
use crate::core::level::MeshLevel;
use crate::util::code::pad_mesh_code;
use crate::util::error::JpMeshError;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

fn default_lat_column() -> String {
    "latitude".to_string()
}

fn default_lon_column() -> String {
    "longitude".to_string()
}

fn default_skip_invalid() -> bool {
    true
}

/// Configuration for attaching coordinates to a CSV with a mesh code column.
///
/// Can be built in code or read from JSON:
///
/// ```
/// use jpmesh_rs::MeshCsvConfig;
///
/// let config = MeshCsvConfig::from_json_str(
///     r#"{ "mesh_column": "mesh_code", "cell_geometry": "wkt" }"#,
/// ).unwrap();
/// assert_eq!(config.lat_column, "latitude");
/// assert!(config.skip_invalid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshCsvConfig {
    pub mesh_column: String,
    #[serde(default = "default_lat_column")]
    pub lat_column: String,
    #[serde(default = "default_lon_column")]
    pub lon_column: String,
    #[serde(default)]
    pub exclude_columns: Vec<String>,
    /// Reject sub-indices outside their grid instead of decoding them anyway.
    #[serde(default)]
    pub strict: bool,
    /// Drop rows whose code fails to decode rather than aborting.
    #[serde(default = "default_skip_invalid")]
    pub skip_invalid: bool,
    /// Zero-pad codes that lost their leading zeros to this level's width.
    #[serde(default)]
    pub pad_to: Option<MeshLevel>,
    #[serde(default)]
    pub cell_geometry: Option<GeometryFormat>,
}

impl MeshCsvConfig {
    /// Create config for a CSV whose `mesh_column` holds mesh codes.
    ///
    /// # Example
    /// ```
    /// use jpmesh_rs::{GeometryFormat, MeshCsvConfig};
    ///
    /// let config = MeshCsvConfig::new("mesh_code")
    ///     .lat_column("lat")
    ///     .lon_column("lng")
    ///     .with_cell_geometry(GeometryFormat::GeoJson);
    /// ```
    pub fn new(mesh_column: impl Into<String>) -> Self {
        Self {
            mesh_column: mesh_column.into(),
            lat_column: default_lat_column(),
            lon_column: default_lon_column(),
            exclude_columns: Vec::new(),
            strict: false,
            skip_invalid: default_skip_invalid(),
            pad_to: None,
            cell_geometry: None,
        }
    }

    /// Reads a config from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, JpMeshError> {
        serde_json::from_str(json).map_err(|e| JpMeshError::ConfigError(e.to_string()))
    }

    /// Reads a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, JpMeshError> {
        let file = File::open(path).map_err(|e| JpMeshError::IoError(e.to_string()))?;
        serde_json::from_reader(file).map_err(|e| JpMeshError::ConfigError(e.to_string()))
    }

    pub fn lat_column(mut self, name: impl Into<String>) -> Self {
        self.lat_column = name.into();
        self
    }

    pub fn lon_column(mut self, name: impl Into<String>) -> Self {
        self.lon_column = name.into();
        self
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Zero-pad integer-looking codes shorter than `level`'s width.
    ///
    /// Codes that are already 6 or 8 digits long are never padded.
    pub fn pad_to(mut self, level: MeshLevel) -> Self {
        self.pad_to = Some(level);
        self
    }

    /// Include the cell polygon in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.cell_geometry = Some(format);
        self
    }
}

/// Row counts from a [`csv_to_mesh_csv`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshCsvSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    /// Rows dropped for an empty or undecodable mesh code.
    pub rows_skipped: usize,
}

pub trait MeshCsv {
    fn to_mesh_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &MeshCsvConfig,
    ) -> Result<MeshCsvSummary, JpMeshError>;
}

impl<P: AsRef<Path>> MeshCsv for P {
    fn to_mesh_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &MeshCsvConfig,
    ) -> Result<MeshCsvSummary, JpMeshError> {
        csv_to_mesh_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

/// Trims a raw field and restores leading zeros when `pad_to` is set.
///
/// A code whose length already names a level is left alone, so 6-digit codes
/// survive in a file padded to the tertiary width.
fn normalise_code(raw: &str, pad_to: Option<MeshLevel>) -> String {
    let trimmed = raw.trim();
    if MeshLevel::from_len(trimmed.len()).is_some() {
        return trimmed.to_string();
    }
    match pad_to {
        Some(level) if trimmed.len() < level.code_len() => trimmed
            .parse::<u64>()
            .ok()
            .and_then(|value| pad_mesh_code(value, level).ok())
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}

/// Decoded output fields for one row: latitude, longitude, optional geometry.
fn decode_fields(code: &str, config: &MeshCsvConfig) -> Result<Vec<String>, JpMeshError> {
    let digits = parse_mesh_code(code, config.strict)?;
    let center = center_of(&digits);

    let mut fields = vec![center.lat.to_string(), center.lon.to_string()];
    if let Some(format) = config.cell_geometry {
        let polygon = bounds_of(&digits).to_polygon();
        fields.push(match format {
            GeometryFormat::Wkt => polygon_to_wkt(&polygon),
            GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
        });
    }
    Ok(fields)
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Copies a CSV file, appending the decoded center of each row's mesh code.
///
/// Streams output to minimize memory usage for large files. Rows with an empty
/// mesh code are dropped; rows with an undecodable one are dropped too when
/// `skip_invalid` is set, otherwise the whole run fails.
///
/// # Example
///
/// ```no_run
/// use jpmesh_rs::{csv_to_mesh_csv, GeometryFormat, MeshCsvConfig, MeshLevel};
///
/// let config = MeshCsvConfig::new("mesh_code")
///     .pad_to(MeshLevel::Tertiary)
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// let summary = csv_to_mesh_csv("traffic.csv", "traffic_located.csv", &config).unwrap();
/// println!("{} rows written", summary.rows_written);
/// ```
pub fn csv_to_mesh_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &MeshCsvConfig,
) -> Result<MeshCsvSummary, JpMeshError> {
    let file = File::open(csv_path).map_err(|e| JpMeshError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| JpMeshError::CsvError(e.to_string()))?
        .clone();

    let mesh_idx = headers
        .iter()
        .position(|h| h == config.mesh_column)
        .ok_or_else(|| {
            JpMeshError::CsvError(format!("Mesh column '{}' not found", config.mesh_column))
        })?;

    let exclude_indices: HashSet<usize> = config
        .exclude_columns
        .iter()
        .filter_map(|col_name| headers.iter().position(|h| h == col_name))
        .collect();

    let out_file = File::create(output_path).map_err(|e| JpMeshError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    // Write header row
    let mut header_row: Vec<&str> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !exclude_indices.contains(i))
        .map(|(_, h)| h)
        .collect();
    header_row.push(&config.lat_column);
    header_row.push(&config.lon_column);
    if config.cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    writer
        .write_record(&header_row)
        .map_err(|e| JpMeshError::CsvError(e.to_string()))?;

    let mut summary = MeshCsvSummary::default();

    for result in reader.records() {
        let record = result.map_err(|e| JpMeshError::CsvError(e.to_string()))?;
        summary.rows_read += 1;

        let code = normalise_code(record.get(mesh_idx).unwrap_or_default(), config.pad_to);
        if code.is_empty() {
            debug!("Row {}: empty mesh code, skipping", summary.rows_read);
            summary.rows_skipped += 1;
            continue;
        }

        let decoded = match decode_fields(&code, config) {
            Ok(fields) => fields,
            Err(e) if config.skip_invalid => {
                warn!("Row {}: {}, skipping", summary.rows_read, e);
                summary.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut row: Vec<String> = record
            .iter()
            .enumerate()
            .filter(|(i, _)| !exclude_indices.contains(i))
            .map(|(_, field)| field.to_string())
            .collect();
        row.extend(decoded);

        writer
            .write_record(&row)
            .map_err(|e| JpMeshError::CsvError(e.to_string()))?;
        summary.rows_written += 1;
    }

    writer
        .flush()
        .map_err(|e| JpMeshError::CsvError(e.to_string()))?;

    info!(
        "Located {} of {} rows ({} skipped)",
        summary.rows_written, summary.rows_read, summary.rows_skipped
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::decode::decode;
    use crate::util::error::InvalidReason;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_csv(path: &Path, lines: &[&str]) -> Result<(), JpMeshError> {
        let mut file = File::create(path).map_err(|e| JpMeshError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| JpMeshError::IoError(e.to_string()))?;
        }
        Ok(())
    }

    fn read_rows(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), JpMeshError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| JpMeshError::CsvError(e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| JpMeshError::CsvError(e.to_string()))?
            .iter()
            .map(String::from)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| JpMeshError::CsvError(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok((headers, rows))
    }

    #[test]
    fn test_appends_coordinates() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(
            &csv_path,
            &[
                "timestamp,mesh_code,traffic_volume",
                "2023/01/01 00:00,53394611,42",
                "2023/01/01 00:05,533946,17",
            ],
        )?;

        let config = MeshCsvConfig::new("mesh_code");
        let summary = csv_to_mesh_csv(&csv_path, &output_path, &config)?;

        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.rows_skipped, 0);

        let (headers, rows) = read_rows(&output_path)?;
        assert_eq!(
            headers,
            vec!["timestamp", "mesh_code", "traffic_volume", "latitude", "longitude"]
        );

        let expected = decode("53394611")?;
        let lat: f64 = rows[0][3].parse().map_err(|_| JpMeshError::CsvError("lat".into()))?;
        let lon: f64 = rows[0][4].parse().map_err(|_| JpMeshError::CsvError("lon".into()))?;
        assert_eq!(lat, expected.lat);
        assert_eq!(lon, expected.lon);
        Ok(())
    }

    #[test]
    fn test_skips_empty_and_invalid_codes() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(
            &csv_path,
            &["id,mesh_code", "1,533946", "2,", "3,ab3946", "4,12345"],
        )?;

        let summary = csv_path.to_mesh_csv(&output_path, &MeshCsvConfig::new("mesh_code"))?;

        assert_eq!(summary.rows_read, 4);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(summary.rows_skipped, 3);

        let (_, rows) = read_rows(&output_path)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "1");
        Ok(())
    }

    #[test]
    fn test_invalid_code_fails_without_skip() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(&csv_path, &["id,mesh_code", "1,533946", "2,5339"])?;

        let config = MeshCsvConfig::new("mesh_code").skip_invalid(false);
        let result = csv_to_mesh_csv(&csv_path, &output_path, &config);

        assert!(matches!(
            result,
            Err(JpMeshError::InvalidMeshCode {
                reason: InvalidReason::UnsupportedLength(4),
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_strict_drops_out_of_range() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(&csv_path, &["id,mesh_code", "1,533986", "2,53394600"])?;

        let permissive = csv_to_mesh_csv(&csv_path, &output_path, &MeshCsvConfig::new("mesh_code"))?;
        assert_eq!(permissive.rows_written, 2);

        let strict = csv_to_mesh_csv(
            &csv_path,
            &output_path,
            &MeshCsvConfig::new("mesh_code").strict(true),
        )?;
        assert_eq!(strict.rows_written, 0);
        assert_eq!(strict.rows_skipped, 2);
        Ok(())
    }

    #[test]
    fn test_pad_to_restores_leading_zeros() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        // 000046 stored as an integer
        write_csv(&csv_path, &["id,mesh_code", "1,46"])?;

        let unpadded = csv_to_mesh_csv(&csv_path, &output_path, &MeshCsvConfig::new("mesh_code"))?;
        assert_eq!(unpadded.rows_written, 0);

        let config = MeshCsvConfig::new("mesh_code").pad_to(MeshLevel::Secondary);
        let padded = csv_to_mesh_csv(&csv_path, &output_path, &config)?;
        assert_eq!(padded.rows_written, 1);

        let (_, rows) = read_rows(&output_path)?;
        let lon: f64 = rows[0][3].parse().map_err(|_| JpMeshError::CsvError("lon".into()))?;
        assert_eq!(lon, decode("000046")?.lon);
        Ok(())
    }

    #[test]
    fn test_pad_to_keeps_mixed_levels() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        // 00000046 stored as an integer next to full-width codes of both levels
        write_csv(
            &csv_path,
            &["id,mesh_code", "1,533946", "2,53394611", "3,46"],
        )?;

        let config = MeshCsvConfig::new("mesh_code").pad_to(MeshLevel::Tertiary);
        let summary = csv_to_mesh_csv(&csv_path, &output_path, &config)?;
        assert_eq!(summary.rows_written, 3);

        let (_, rows) = read_rows(&output_path)?;
        let expected = [decode("533946")?, decode("53394611")?, decode("00000046")?];
        for (row, center) in rows.iter().zip(expected) {
            let lat: f64 = row[2].parse().map_err(|_| JpMeshError::CsvError("lat".into()))?;
            let lon: f64 = row[3].parse().map_err(|_| JpMeshError::CsvError("lon".into()))?;
            assert_eq!(lat, center.lat, "row {}", row[0]);
            assert_eq!(lon, center.lon, "row {}", row[0]);
        }
        Ok(())
    }

    #[test]
    fn test_normalise_code() {
        assert_eq!(normalise_code(" 533946 ", Some(MeshLevel::Tertiary)), "533946");
        assert_eq!(normalise_code("46", Some(MeshLevel::Tertiary)), "00000046");
        assert_eq!(normalise_code("46", None), "46");
        assert_eq!(normalise_code("4x", Some(MeshLevel::Secondary)), "4x");
    }

    #[test]
    fn test_geometry_and_renamed_columns() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(&csv_path, &["id,prefecture,mesh_code", "1,Tokyo,53394611"])?;

        let config = MeshCsvConfig::new("mesh_code")
            .lat_column("lat")
            .lon_column("lng")
            .exclude(vec!["prefecture".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        csv_to_mesh_csv(&csv_path, &output_path, &config)?;

        let (headers, rows) = read_rows(&output_path)?;
        assert_eq!(headers, vec!["id", "mesh_code", "lat", "lng", "cell_geometry"]);
        assert!(rows[0][4].starts_with("POLYGON"));
        Ok(())
    }

    #[test]
    fn test_geojson_geometry() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(&csv_path, &["mesh_code", "533946"])?;

        let config = MeshCsvConfig::new("mesh_code").with_cell_geometry(GeometryFormat::GeoJson);
        csv_to_mesh_csv(&csv_path, &output_path, &config)?;

        let (_, rows) = read_rows(&output_path)?;
        assert!(rows[0][3].contains("\"Polygon\""));
        Ok(())
    }

    #[test]
    fn test_missing_mesh_column() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("traffic.csv");
        let output_path = dir.path().join("output.csv");

        write_csv(&csv_path, &["id,code", "1,533946"])?;

        let result = csv_to_mesh_csv(&csv_path, &output_path, &MeshCsvConfig::new("mesh_code"));
        assert!(matches!(result, Err(JpMeshError::CsvError(_))));
        Ok(())
    }

    #[test]
    fn test_config_from_json() -> Result<(), JpMeshError> {
        let config = MeshCsvConfig::from_json_str(
            r#"{
                "mesh_column": "mesh_code",
                "lat_column": "lat",
                "strict": true,
                "skip_invalid": false,
                "pad_to": "tertiary",
                "cell_geometry": "geojson"
            }"#,
        )?;

        assert_eq!(config.lat_column, "lat");
        assert_eq!(config.lon_column, "longitude");
        assert!(config.strict);
        assert!(!config.skip_invalid);
        assert_eq!(config.pad_to, Some(MeshLevel::Tertiary));
        assert_eq!(config.cell_geometry, Some(GeometryFormat::GeoJson));
        Ok(())
    }

    #[test]
    fn test_config_from_json_file() -> Result<(), JpMeshError> {
        let dir = tempdir().map_err(|e| JpMeshError::IoError(e.to_string()))?;
        let path = dir.path().join("config.json");
        write_csv(&path, &[r#"{ "mesh_column": "mesh" }"#])?;

        let config = MeshCsvConfig::from_json_file(&path)?;
        assert_eq!(config, MeshCsvConfig::new("mesh"));
        Ok(())
    }

    #[test]
    fn test_config_missing_mesh_column() {
        let result = MeshCsvConfig::from_json_str("{}");
        assert!(matches!(result, Err(JpMeshError::ConfigError(_))));
    }
}
