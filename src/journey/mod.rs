//! The follower journey: the recorded series, its snapshot file, the
//! recording cycle, and the chart.

pub mod chart;
pub mod recorder;
pub mod series;
pub mod snapshot;

pub use chart::ChartSettings;
pub use recorder::{JourneyRecorder, RecordError};
pub use series::{AccountIds, FollowerRecord, Journey};
