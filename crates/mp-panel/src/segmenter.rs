use std::time::Instant;

use log::debug;
use mp_core::{ImageView, Luma, PanelBox};
use mp_mask::{binarize_luma_inv, count_foreground};
use mp_region::{RegionConfig, extract_external_regions};

use crate::config::{ConfigError, SegmenterConfig, ValidatedConfig};
use crate::order::{filter_by_size, sort_reading_order};
use crate::report::{SegmentReport, TimingBreakdown};

pub type PanelSequence = Vec<PanelBox>;

/// Segments pages with the default configuration.
pub fn segment<P: Luma>(image: &ImageView<'_, P>) -> PanelSequence {
    PanelSegmenter::default().segment(image)
}

#[derive(Debug, Clone)]
pub struct PanelSegmenter {
    config: SegmenterConfig,
    validated: ValidatedConfig,
}

impl Default for PanelSegmenter {
    fn default() -> Self {
        Self {
            config: SegmenterConfig::default(),
            validated: ValidatedConfig::default(),
        }
    }
}

impl PanelSegmenter {
    /// Validates `config` up front so that no page is ever processed with a
    /// malformed configuration.
    pub fn new(config: SegmenterConfig) -> Result<Self, ConfigError> {
        let validated = config.narrow()?;
        Ok(Self { config, validated })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    pub fn segment<P: Luma>(&self, image: &ImageView<'_, P>) -> PanelSequence {
        self.segment_detailed(image).panels
    }

    pub fn segment_detailed<P: Luma>(&self, image: &ImageView<'_, P>) -> SegmentReport {
        let (width, height) = (image.width(), image.height());
        if image.is_empty() {
            debug!("PanelSegmenter::segment empty {width}x{height} image -> no panels");
            return SegmentReport {
                image_width: width,
                image_height: height,
                ..SegmentReport::default()
            };
        }

        let cfg = &self.validated;
        let mut timings = TimingBreakdown::default();
        let total_start = Instant::now();

        let t0 = Instant::now();
        let mask = binarize_luma_inv(image, cfg.threshold);
        let foreground_pixels = count_foreground(&mask.as_view());
        timings.push("binarize", elapsed_ms(t0));

        let t0 = Instant::now();
        let region_cfg = RegionConfig {
            connectivity: cfg.connectivity,
        };
        let regions = extract_external_regions(&mask.as_view(), &region_cfg);
        timings.push("regions", elapsed_ms(t0));

        let t0 = Instant::now();
        let external_regions = regions.len();
        let mut panels = filter_by_size(
            regions.into_iter().map(|r| r.bbox),
            cfg.min_width,
            cfg.min_height,
        );
        timings.push("filter", elapsed_ms(t0));

        let t0 = Instant::now();
        sort_reading_order(&mut panels);
        timings.push("order", elapsed_ms(t0));
        timings.total_ms = elapsed_ms(total_start);

        debug_assert!(panels.iter().all(|p| p.fits_within(width, height)));
        debug!(
            "PanelSegmenter::segment {width}x{height} fg={foreground_pixels} regions={external_regions} panels={} ({:.3} ms)",
            panels.len(),
            timings.total_ms
        );

        SegmentReport {
            image_width: width,
            image_height: height,
            rejected_regions: external_regions - panels.len(),
            panels,
            foreground_pixels,
            external_regions,
            timings,
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1e3
}

#[cfg(test)]
mod tests {
    use mp_core::{Image, PanelBox};

    use super::{PanelSegmenter, segment};
    use crate::{Connectivity, ConfigError, SegmenterConfig};

    const PAPER: [u8; 3] = [255, 255, 255];
    const INK: [u8; 3] = [16, 16, 16];

    fn draw_panel_border(page: &mut Image<[u8; 3]>, b: PanelBox, thickness: usize) {
        assert!(2 * thickness < b.width && 2 * thickness < b.height, "border too thick");
        page.fill_rect(b.x, b.y, b.width, thickness, INK);
        page.fill_rect(b.x, b.bottom() - thickness, b.width, thickness, INK);
        page.fill_rect(b.x, b.y, thickness, b.height, INK);
        page.fill_rect(b.right() - thickness, b.y, thickness, b.height, INK);
    }

    #[test]
    fn construction_rejects_bad_config() {
        let err = PanelSegmenter::new(SegmenterConfig {
            binarization_threshold: 300,
            ..SegmenterConfig::default()
        })
        .expect_err("threshold out of range");
        assert_eq!(err, ConfigError::ThresholdOutOfRange(300));
    }

    #[test]
    fn blank_page_has_no_panels() {
        let page = Image::new_fill(320, 240, PAPER);
        let report = PanelSegmenter::default().segment_detailed(&page.as_view());

        assert!(report.panels.is_empty());
        assert_eq!(report.foreground_pixels, 0);
        assert_eq!(report.external_regions, 0);
        assert_eq!(report.timings.stages.len(), 4);
        assert!(report.timings.stage_ms("regions").is_some());
        assert!(report.timings.stage_ms("ocr").is_none());
    }

    #[test]
    fn zero_area_page_has_no_panels() {
        let page = Image::<[u8; 3]>::new_fill(0, 480, PAPER);
        let report = PanelSegmenter::default().segment_detailed(&page.as_view());
        assert!(report.panels.is_empty());
        assert_eq!(report.image_height, 480);
        assert!(report.timings.stages.is_empty());
    }

    #[test]
    fn bordered_panels_in_reading_order() {
        let mut page = Image::new_fill(400, 300, PAPER);
        let left = PanelBox::new(10, 10, 150, 200);
        let right = PanelBox::new(200, 40, 150, 200);
        draw_panel_border(&mut page, left, 3);
        draw_panel_border(&mut page, right, 3);
        // A speck that the size filter must drop.
        page.fill_rect(380, 280, 4, 4, INK);

        let report = PanelSegmenter::default().segment_detailed(&page.as_view());
        assert_eq!(report.panels, vec![right, left]);
        assert_eq!(report.external_regions, 3);
        assert_eq!(report.rejected_regions, 1);
        assert_eq!(report.num_panels(), 2);
    }

    #[test]
    fn gray_pages_are_accepted() {
        let mut page = Image::new_fill(200, 200, 250u8);
        page.fill_rect(20, 30, 100, 120, 0);

        let panels = segment(&page.as_view());
        assert_eq!(panels, vec![PanelBox::new(20, 30, 100, 120)]);
    }

    #[test]
    fn custom_min_size_and_threshold() {
        let mut page = Image::new_fill(200, 200, 255u8);
        page.fill_rect(10, 10, 40, 40, 150);

        assert!(segment(&page.as_view()).is_empty(), "40x40 below default minimum");

        let small = PanelSegmenter::new(SegmenterConfig {
            min_panel_width: 30,
            min_panel_height: 30,
            ..SegmenterConfig::default()
        })
        .expect("valid config");
        assert_eq!(small.segment(&page.as_view()).len(), 1);

        let strict = PanelSegmenter::new(SegmenterConfig {
            binarization_threshold: 100,
            min_panel_width: 30,
            min_panel_height: 30,
            connectivity: Connectivity::C4,
        })
        .expect("valid config");
        assert!(strict.segment(&page.as_view()).is_empty(), "gray 150 is paper at 100");
    }
}
