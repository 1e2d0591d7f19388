pub mod frame;
pub mod kind;
pub mod reading;

pub use frame::{CommandFrame, DEFAULT_FRAME_WIDTH};
pub use kind::MeasurementKind;
pub use reading::Reading;
