//! Foundational primitives for manga page segmentation.
//!
//! ## Image Views and Stride
//! Images use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//! This allows borrowed views over padded buffers, so a caller can hand over
//! a decoder's buffer without copying it.
//!
//! ## Pixels
//! Pages arrive as gray (`u8`), RGB (`[u8; 3]`) or RGBA (`[u8; 4]`) samples.
//! Every pixel type implements [`Luma`], a deterministic and monotonic
//! reduction to an 8-bit luminance value.
//!
//! ## Coordinates
//! Pixel `(x, y)` is column `x`, row `y`, with the origin at the top-left.
//! [`PanelBox`] uses the same frame: `(x, y)` is its top-left pixel and
//! `width`/`height` count pixels, so a box spans `x..x + width`.

mod error;
mod geom;
mod image;
mod pixel;

pub use error::Error;
pub use geom::PanelBox;
pub use image::{Image, ImageView};
pub use pixel::{Luma, luma_from_rgb};
