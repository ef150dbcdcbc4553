/// Reduction of a pixel sample to 8-bit luminance.
///
/// Implementations must be deterministic and monotonic in brightness: raising
/// any channel never lowers the result.
pub trait Luma: Copy {
    fn luma(&self) -> u8;
}

// ITU-R BT.601 weights in 14-bit fixed point; they sum to 1 << 14.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

#[inline]
pub fn luma_from_rgb(r: u8, g: u8, b: u8) -> u8 {
    let y = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B + LUMA_ROUND;
    // Max is (255 << 14) + 8192, which still shifts down to 255.
    (y >> LUMA_SHIFT) as u8
}

impl Luma for u8 {
    #[inline]
    fn luma(&self) -> u8 {
        *self
    }
}

impl Luma for [u8; 3] {
    #[inline]
    fn luma(&self) -> u8 {
        luma_from_rgb(self[0], self[1], self[2])
    }
}

/// Alpha is ignored: a transparent pixel keeps the luminance of its color.
impl Luma for [u8; 4] {
    #[inline]
    fn luma(&self) -> u8 {
        luma_from_rgb(self[0], self[1], self[2])
    }
}

#[cfg(test)]
mod tests {
    use super::{Luma, luma_from_rgb};

    #[test]
    fn extremes_map_to_extremes() {
        assert_eq!(luma_from_rgb(0, 0, 0), 0);
        assert_eq!(luma_from_rgb(255, 255, 255), 255);
        assert_eq!([255u8, 255, 255, 0].luma(), 255);
    }

    #[test]
    fn gray_rgb_keeps_its_level() {
        for v in [1u8, 17, 128, 199, 200, 201, 254] {
            assert_eq!([v, v, v].luma(), v, "level {v}");
        }
    }

    #[test]
    fn green_weighs_more_than_red_and_blue() {
        let r = [255u8, 0, 0].luma();
        let g = [0u8, 255, 0].luma();
        let b = [0u8, 0, 255].luma();
        assert!(g > r && r > b, "r={r} g={g} b={b}");
    }

    #[test]
    fn monotonic_in_each_channel() {
        for c in 0..3 {
            let mut prev = 0u8;
            for v in 0..=255u8 {
                let mut px = [40u8, 90, 160];
                px[c] = v;
                let y = px.luma();
                assert!(y >= prev, "channel {c} value {v}");
                prev = y;
            }
        }
    }
}
