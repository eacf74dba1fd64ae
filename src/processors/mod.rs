pub mod batch_processor;
pub mod coordinate_converter;

pub use batch_processor::{BatchOutput, BatchProcessor};
pub use coordinate_converter::{project_with, CoordinateConverter};
