pub mod bounds;
pub mod constants;
pub mod decode;
pub mod level;

pub use bounds::{cell_bounds, create_cell_polygon, south_west};
pub use constants::{
    LON_OFFSET, MAX_TERTIARY_INDEX, PRIMARY_LAT_SPAN, PRIMARY_LON_SPAN, SECONDARY_CODE_LEN,
    SECONDARY_DIVISIONS, TERTIARY_CODE_LEN, TERTIARY_DIVISIONS,
};
pub use decode::{decode, decode_strict};
pub use level::MeshLevel;
