pub mod batch;
pub mod conversion;
pub mod coordinate;

pub use batch::{BatchRecord, BatchRow, BatchSummary};
pub use conversion::{
    ConversionRequest, PointResponse, ReverseConversionRequest, ReversePointResponse,
};
pub use coordinate::{Axis, CoordinateFormat, GeographicPoint, ProjectedPoint};
