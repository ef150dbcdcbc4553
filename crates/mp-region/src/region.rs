use mp_core::PanelBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub bbox: PanelBox,
    pub pixel_count: usize,
    pub is_external: bool,
}

/// Running min/max extents of a component being labeled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtentAccumulator {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
    count: usize,
}

impl ExtentAccumulator {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            count: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.count += 1;
    }

    pub(crate) fn into_region(self, is_external: bool) -> Region {
        Region {
            bbox: PanelBox::from_extents(self.min_x, self.min_y, self.max_x, self.max_y),
            pixel_count: self.count,
            is_external,
        }
    }
}
