use crate::core::constants::{
    PRIMARY_LAT_SPAN, PRIMARY_LON_SPAN, SECONDARY_CODE_LEN, SECONDARY_DIVISIONS,
    TERTIARY_CODE_LEN, TERTIARY_DIVISIONS,
};
use serde::{Deserialize, Serialize};

/// Resolution level of a mesh code, determined by its digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshLevel {
    /// 6-digit code: 1/8 × 1/8 of a primary band (roughly 10 km square).
    Secondary,
    /// 8-digit code: 1/10 × 1/10 of a secondary cell (roughly 1 km square).
    Tertiary,
}

impl MeshLevel {
    /// Returns the level for a code of `len` digits, if there is one.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            SECONDARY_CODE_LEN => Some(MeshLevel::Secondary),
            TERTIARY_CODE_LEN => Some(MeshLevel::Tertiary),
            _ => None,
        }
    }

    pub fn code_len(&self) -> usize {
        match self {
            MeshLevel::Secondary => SECONDARY_CODE_LEN,
            MeshLevel::Tertiary => TERTIARY_CODE_LEN,
        }
    }

    /// Latitude extent of one cell at this level, in degrees.
    pub fn lat_span(&self) -> f64 {
        match self {
            MeshLevel::Secondary => PRIMARY_LAT_SPAN / SECONDARY_DIVISIONS as f64,
            MeshLevel::Tertiary => {
                PRIMARY_LAT_SPAN / (SECONDARY_DIVISIONS * TERTIARY_DIVISIONS) as f64
            }
        }
    }

    /// Longitude extent of one cell at this level, in degrees.
    pub fn lon_span(&self) -> f64 {
        match self {
            MeshLevel::Secondary => PRIMARY_LON_SPAN / SECONDARY_DIVISIONS as f64,
            MeshLevel::Tertiary => {
                PRIMARY_LON_SPAN / (SECONDARY_DIVISIONS * TERTIARY_DIVISIONS) as f64
            }
        }
    }
}
