pub mod annotations;
pub mod position;
pub mod seek;
pub mod slider;
pub mod tooltip;

pub use annotations::AnnotationOverlay;
pub use seek::{SeekCommand, SeekCoordinator};
pub use slider::TimeSlider;
pub use tooltip::TimeTip;
