//! Parameter types for Start.Info requests.
//!
//! Closed value sets (monitor mode, tour type, map options) are enums so
//! that out-of-range values are rejected when they are parsed, before any
//! request is built.

mod params;
mod time;

pub use params::{InvalidParameter, MapFormat, MonitorMode, ThumbnailSize, TourType};
pub use time::{UNUSED_UPDATE_TIME, epoch_millis, format_timestamp, parse_timestamp};

pub(crate) use params::{require, require_all};
pub(crate) use time::require_epoch_millis;
