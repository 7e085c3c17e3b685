pub mod step;
pub mod xrange;

pub use step::{step_series, StepPoint};
pub use xrange::{workshop_timeline, TimelineBand, WorkshopTimeline, MACHINE_DISPLAY_ORDER};
