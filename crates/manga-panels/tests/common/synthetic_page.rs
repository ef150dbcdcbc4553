use manga_panels::{Image, PanelBox};
use proptest::collection::vec;
use proptest::prelude::*;

pub const PAPER: [u8; 3] = [255, 255, 255];
pub const INK: [u8; 3] = [16, 16, 16];

pub fn blank_page(width: usize, height: usize) -> Image<[u8; 3]> {
    Image::new_fill(width, height, PAPER)
}

/// Draws the outline of `b` with ink, `thickness` pixels wide, inside `b`.
pub fn draw_panel_border(page: &mut Image<[u8; 3]>, b: PanelBox, thickness: usize) {
    assert!(2 * thickness < b.width && 2 * thickness < b.height, "border too thick");
    page.fill_rect(b.x, b.y, b.width, thickness, INK);
    page.fill_rect(b.x, b.bottom() - thickness, b.width, thickness, INK);
    page.fill_rect(b.x, b.y, thickness, b.height, INK);
    page.fill_rect(b.right() - thickness, b.y, thickness, b.height, INK);
}

/// Drawing instructions for a cluttered page: bordered boxes (possibly
/// overlapping or touching the page edge), gray blots and 2x3 ink specks.
#[derive(Debug, Clone)]
pub struct PageSketch {
    pub width: usize,
    pub height: usize,
    pub borders: Vec<(PanelBox, usize)>,
    pub blots: Vec<(PanelBox, u8)>,
    pub specks: Vec<(usize, usize)>,
}

impl PageSketch {
    pub fn render(&self) -> Image<[u8; 3]> {
        let mut page = blank_page(self.width, self.height);
        for &(b, thickness) in &self.borders {
            draw_panel_border(&mut page, b, thickness);
        }
        for &(b, shade) in &self.blots {
            page.fill_rect(b.x, b.y, b.width, b.height, [shade, shade, shade]);
        }
        for &(x, y) in &self.specks {
            page.fill_rect(x, y, 2, 3, INK);
        }
        page
    }
}

fn arb_border(width: usize, height: usize) -> impl Strategy<Value = (PanelBox, usize)> {
    (12..=width / 2, 12..=height / 2)
        .prop_flat_map(move |(w, h)| (0..=width - w, 0..=height - h, Just(w), Just(h), 1usize..5))
        .prop_map(|(x, y, w, h, thickness)| (PanelBox::new(x, y, w, h), thickness))
}

fn arb_blot(width: usize, height: usize) -> impl Strategy<Value = (PanelBox, u8)> {
    (0..width, 0..height, 1usize..80, 1usize..80, any::<u8>())
        .prop_map(|(x, y, w, h, shade)| (PanelBox::new(x, y, w, h), shade))
}

/// Pages between 120x100 and 479x419 pixels.
pub fn arb_page() -> impl Strategy<Value = PageSketch> {
    (120usize..480, 100usize..420)
        .prop_flat_map(|(width, height)| {
            (
                Just(width),
                Just(height),
                vec(arb_border(width, height), 0..7),
                vec(arb_blot(width, height), 0..4),
                vec((0..width, 0..height), 0..40),
            )
        })
        .prop_map(|(width, height, borders, blots, specks)| PageSketch {
            width,
            height,
            borders,
            blots,
            specks,
        })
}
