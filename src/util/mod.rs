pub mod code;
pub mod coord;
pub mod error;

pub use code::pad_mesh_code;
pub use coord::{Coordinate, LatLon};
pub use error::{InvalidReason, JpMeshError};
