#![forbid(unsafe_code)]

pub mod analytics;
pub mod model;
pub mod motion;
pub mod resolve;
pub mod time;

pub use analytics::{AnalyticsEvent, EventName, PropertyValue};
pub use motion::{Motion, MotionKind, SwipeDirection, TransitionTimings};
pub use resolve::resolve;
pub use time::Clock;
