/// Axis-aligned panel rectangle in source-image pixel coordinates.
///
/// `(x, y)` is the top-left pixel; the box covers columns `x..x + width` and
/// rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PanelBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl PanelBox {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the box spanning the inclusive pixel extents
    /// `min_x..=max_x`, `min_y..=max_y`.
    pub fn from_extents(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        debug_assert!(min_x <= max_x && min_y <= max_y, "inverted extents");
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the box is non-empty and lies inside a `width x height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        !self.is_empty() && self.right() <= width && self.bottom() <= height
    }

    pub fn contains_box(&self, other: &PanelBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::PanelBox;

    #[test]
    fn extents_are_inclusive() {
        let b = PanelBox::from_extents(500, 50, 699, 349);
        assert_eq!(b, PanelBox::new(500, 50, 200, 300));
        assert_eq!(b.right(), 700);
        assert_eq!(b.bottom(), 350);

        let single = PanelBox::from_extents(3, 4, 3, 4);
        assert_eq!((single.width, single.height), (1, 1));
    }

    #[test]
    fn fits_within_checks_far_edges() {
        let b = PanelBox::new(10, 10, 90, 40);
        assert!(b.fits_within(100, 50));
        assert!(!b.fits_within(99, 50));
        assert!(!b.fits_within(100, 49));
        assert!(!PanelBox::new(0, 0, 0, 5).fits_within(100, 100));
    }

    #[test]
    fn containment() {
        let outer = PanelBox::new(0, 0, 100, 100);
        assert!(outer.contains_box(&PanelBox::new(10, 10, 20, 20)));
        assert!(outer.contains_box(&outer));
        assert!(!outer.contains_box(&PanelBox::new(90, 90, 20, 5)));
    }
}
