//! Panel segmentation of manga pages.
//!
//! A page is reduced to luma, binarized with a fixed inverted threshold, split
//! into external connected regions, filtered by size and finally ordered for
//! reading right-to-left, top-to-bottom.
//!
//! Ordering is a flat geometric sort on `(-x, y)`. Panels are not clustered
//! into rows first, so a layout with staggered heights can come out in an
//! order a reader would not choose.
//!
//! [`PanelSegmenter`] is immutable once built; share one instance freely
//! across threads.

mod config;
mod order;
mod report;
mod segmenter;

pub use config::{
    ConfigError, DEFAULT_BINARIZATION_THRESHOLD, DEFAULT_MIN_PANEL_HEIGHT, DEFAULT_MIN_PANEL_WIDTH,
    SegmenterConfig,
};
pub use order::{filter_by_size, reading_order_cmp, sort_reading_order};
pub use report::{SegmentReport, StageTiming, TimingBreakdown};
pub use segmenter::{PanelSegmenter, PanelSequence, segment};

pub use mp_region::Connectivity;
