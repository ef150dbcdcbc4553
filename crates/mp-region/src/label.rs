use mp_core::ImageView;

use crate::region::{ExtentAccumulator, Region};

const DX: [isize; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [isize; 8] = [0, -1, -1, -1, 0, 1, 1, 1];
const DIRS_C4: [u8; 4] = [0, 2, 4, 6];
const DIRS_C8: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

const UNSEEN: u8 = 0;
const OUTSIDE: u8 = 1;
const LABELED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    C4,
    #[default]
    C8,
}

impl Connectivity {
    /// Connectivity the background must use so that foreground borders
    /// enclose their interior.
    pub fn dual(self) -> Self {
        match self {
            Self::C4 => Self::C8,
            Self::C8 => Self::C4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionConfig {
    /// Foreground connectivity; the background uses [`Connectivity::dual`].
    pub connectivity: Connectivity,
}

/// Returns the external components of `mask` in row-major order of their
/// first pixel.
pub fn extract_external_regions(mask: &ImageView<'_, u8>, cfg: &RegionConfig) -> Vec<Region> {
    let mut regions = extract_regions(mask, cfg);
    regions.retain(|r| r.is_external);
    regions
}

/// Returns every foreground component of `mask`, external or not, in
/// row-major order of their first pixel.
pub fn extract_regions(mask: &ImageView<'_, u8>, cfg: &RegionConfig) -> Vec<Region> {
    let width = mask.width();
    let height = mask.height();
    let Some(n) = width.checked_mul(height) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let mut foreground = vec![false; n];
    for y in 0..height {
        let row = mask.row(y);
        let dst = &mut foreground[y * width..(y + 1) * width];
        for (d, &v) in dst.iter_mut().zip(row) {
            *d = v != 0;
        }
    }

    let mut state = vec![UNSEEN; n];
    let mut stack = Vec::new();
    mark_outside(
        &foreground,
        &mut state,
        &mut stack,
        width,
        height,
        cfg.connectivity.dual(),
    );

    let dirs = dirs_for(cfg.connectivity);
    let mut regions = Vec::new();

    for start in 0..n {
        if !foreground[start] || state[start] != UNSEEN {
            continue;
        }

        let mut extent = ExtentAccumulator::new(start % width, start / width);
        let mut is_external = false;
        stack.clear();
        state[start] = LABELED;
        stack.push(start);

        while let Some(p) = stack.pop() {
            let (x, y) = (p % width, p / width);
            extent.push(x, y);

            if !is_external {
                is_external = touches_outside(p, &state, &foreground, width, height);
            }

            for &dir in dirs {
                let Some(nb) = neighbor_index(p, dir, width, height) else {
                    continue;
                };
                if foreground[nb] && state[nb] == UNSEEN {
                    state[nb] = LABELED;
                    stack.push(nb);
                }
            }
        }

        regions.push(extent.into_region(is_external));
    }

    regions
}

/// Flood-fills the background reachable from the virtual frame around the
/// mask. Every background pixel on the image border is adjacent to the frame.
fn mark_outside(
    foreground: &[bool],
    state: &mut [u8],
    stack: &mut Vec<usize>,
    width: usize,
    height: usize,
    background: Connectivity,
) {
    stack.clear();
    let seed = |p: usize, state: &mut [u8], stack: &mut Vec<usize>| {
        if !foreground[p] && state[p] == UNSEEN {
            state[p] = OUTSIDE;
            stack.push(p);
        }
    };

    for x in 0..width {
        seed(x, state, stack);
        seed((height - 1) * width + x, state, stack);
    }
    for y in 0..height {
        seed(y * width, state, stack);
        seed(y * width + width - 1, state, stack);
    }

    let dirs = dirs_for(background);
    while let Some(p) = stack.pop() {
        for &dir in dirs {
            let Some(nb) = neighbor_index(p, dir, width, height) else {
                continue;
            };
            if !foreground[nb] && state[nb] == UNSEEN {
                state[nb] = OUTSIDE;
                stack.push(nb);
            }
        }
    }
}

/// A foreground pixel borders the outside if one of its 4-neighbors is the
/// frame or outside background.
#[inline]
fn touches_outside(
    p: usize,
    state: &[u8],
    foreground: &[bool],
    width: usize,
    height: usize,
) -> bool {
    DIRS_C4.iter().any(|&dir| match neighbor_index(p, dir, width, height) {
        None => true,
        Some(nb) => !foreground[nb] && state[nb] == OUTSIDE,
    })
}

#[inline]
fn dirs_for(connectivity: Connectivity) -> &'static [u8] {
    match connectivity {
        Connectivity::C4 => &DIRS_C4,
        Connectivity::C8 => &DIRS_C8,
    }
}

#[inline]
fn neighbor_index(p: usize, dir: u8, width: usize, height: usize) -> Option<usize> {
    let x = p % width;
    let y = p / width;
    let nx = x as isize + DX[dir as usize];
    let ny = y as isize + DY[dir as usize];
    if nx < 0 || ny < 0 {
        return None;
    }

    let (nxu, nyu) = (nx as usize, ny as usize);
    if nxu >= width || nyu >= height {
        return None;
    }

    Some(nyu * width + nxu)
}
