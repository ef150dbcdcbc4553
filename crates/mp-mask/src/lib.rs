//! Grayscale conversion and fixed-threshold inverted binarization.
//!
//! Masks are `u8` images whose pixels are `0` (background) or `255`
//! (foreground). Foreground is ink: any pixel whose luma is not brighter than
//! the threshold. Paper, strictly brighter than the threshold, is background.
//!
//! The threshold is a fixed constant. Pages with unusual exposure or inverted
//! (white-on-black) artwork segment poorly; no adaptive correction is made.

use mp_core::{Image, ImageView, Luma};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

pub const DEFAULT_THRESHOLD: u8 = 200;

pub fn to_luma_u8<P: Luma>(src: &ImageView<'_, P>) -> Image<u8> {
    src.map(|px| px.luma())
}

pub fn binarize_inv_u8(src: &ImageView<'_, u8>, threshold: u8) -> Image<u8> {
    src.map(|&v| if v > threshold { BACKGROUND } else { FOREGROUND })
}

/// Grayscale conversion and binarization fused into one pass.
///
/// Produces the same mask as [`to_luma_u8`] followed by [`binarize_inv_u8`]
/// without materializing the luma image.
pub fn binarize_luma_inv<P: Luma>(src: &ImageView<'_, P>, threshold: u8) -> Image<u8> {
    src.map(|px| {
        if px.luma() > threshold {
            BACKGROUND
        } else {
            FOREGROUND
        }
    })
}

pub fn count_foreground(mask: &ImageView<'_, u8>) -> usize {
    (0..mask.height())
        .map(|y| mask.row(y).iter().filter(|&&v| v != BACKGROUND).count())
        .sum()
}
