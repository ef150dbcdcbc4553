use mp_core::PanelBox;

/// Wall-clock time of one segmentation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageTiming {
    pub label: &'static str,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: &'static str, elapsed_ms: f64) {
        self.stages.push(StageTiming { label, elapsed_ms });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

/// Ordered panels of one page together with per-stage counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentReport {
    pub image_width: usize,
    pub image_height: usize,
    pub panels: Vec<PanelBox>,
    pub foreground_pixels: usize,
    /// External regions found before size filtering.
    pub external_regions: usize,
    /// External regions dropped by the size filter.
    pub rejected_regions: usize,
    pub timings: TimingBreakdown,
}

impl SegmentReport {
    pub fn num_panels(&self) -> usize {
        self.panels.len()
    }
}
