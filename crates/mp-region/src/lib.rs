//! Connected foreground regions of a binary mask and their bounding boxes.
//!
//! Foreground is any mask value `> 0`. Components are grown with the
//! configured connectivity; the background uses the dual connectivity so that
//! a closed 8-connected border really separates its interior from the rest of
//! the page:
//! - [`Connectivity::C8`] (default): foreground includes diagonals,
//!   background is 4-connected.
//! - [`Connectivity::C4`]: foreground is 4-connected, background includes
//!   diagonals.
//!
//! Only *external* components are of interest downstream. The mask is treated
//! as if it were surrounded by a one-pixel background frame; the background
//! component containing that frame is the page's outside. A foreground
//! component is external iff it touches the outside. Components lying in a
//! hole of another component (text or decoration inside a panel border) are
//! internal.

mod label;
mod region;

pub use label::{Connectivity, RegionConfig, extract_external_regions, extract_regions};
pub use region::Region;
