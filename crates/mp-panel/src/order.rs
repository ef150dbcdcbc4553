use core::cmp::Ordering;

use mp_core::PanelBox;

/// Keeps boxes strictly wider than `min_width` and strictly taller than
/// `min_height`.
pub fn filter_by_size(
    boxes: impl IntoIterator<Item = PanelBox>,
    min_width: usize,
    min_height: usize,
) -> Vec<PanelBox> {
    boxes
        .into_iter()
        .filter(|b| b.width > min_width && b.height > min_height)
        .collect()
}

/// Lexicographic comparison on `(-x, y)`: rightmost first, then topmost.
pub fn reading_order_cmp(a: &PanelBox, b: &PanelBox) -> Ordering {
    b.x.cmp(&a.x).then(a.y.cmp(&b.y))
}

/// Sorts panels into manga reading order.
///
/// The sort is stable: boxes sharing both `x` and `y` keep their input order.
pub fn sort_reading_order(panels: &mut [PanelBox]) {
    panels.sort_by(reading_order_cmp);
}
