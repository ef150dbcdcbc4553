//! Umbrella crate for the `manga-panels` workspace.
//!
//! Re-exports the image primitives, the individual segmentation stages and the
//! [`PanelSegmenter`] that chains them.
//!
//! ```
//! use manga_panels::{Image, PanelBox, PanelSegmenter};
//!
//! let mut page = Image::new_fill(400, 300, 255u8);
//! page.fill_rect(20, 20, 120, 200, 0);
//! page.fill_rect(220, 20, 120, 200, 0);
//!
//! let panels = PanelSegmenter::default().segment(&page.as_view());
//! assert_eq!(
//!     panels,
//!     vec![PanelBox::new(220, 20, 120, 200), PanelBox::new(20, 20, 120, 200)]
//! );
//! ```

pub use mp_core::*;
pub use mp_mask::{binarize_inv_u8, binarize_luma_inv, count_foreground, to_luma_u8};
pub use mp_panel::*;
pub use mp_region::{Region, RegionConfig, extract_external_regions, extract_regions};
