use core::fmt;

use mp_region::Connectivity;

pub const DEFAULT_BINARIZATION_THRESHOLD: i32 = 200;
pub const DEFAULT_MIN_PANEL_WIDTH: i32 = 50;
pub const DEFAULT_MIN_PANEL_HEIGHT: i32 = 50;

/// Recognized segmentation options.
///
/// Values are signed so that configuration read from outside (flags, JSON)
/// can be rejected with a precise error by [`SegmenterConfig::validate`]
/// instead of wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmenterConfig {
    /// Luma cutoff: pixels not brighter than this are foreground. `0..=255`.
    pub binarization_threshold: i32,
    /// Regions at most this wide are discarded.
    pub min_panel_width: i32,
    /// Regions at most this tall are discarded.
    pub min_panel_height: i32,
    pub connectivity: Connectivity,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            binarization_threshold: DEFAULT_BINARIZATION_THRESHOLD,
            min_panel_width: DEFAULT_MIN_PANEL_WIDTH,
            min_panel_height: DEFAULT_MIN_PANEL_HEIGHT,
            connectivity: Connectivity::C8,
        }
    }
}

/// Configuration checked and narrowed to the types the stages use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ValidatedConfig {
    pub threshold: u8,
    pub min_width: usize,
    pub min_height: usize,
    pub connectivity: Connectivity,
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self {
            threshold: mp_mask::DEFAULT_THRESHOLD,
            min_width: DEFAULT_MIN_PANEL_WIDTH as usize,
            min_height: DEFAULT_MIN_PANEL_HEIGHT as usize,
            connectivity: Connectivity::C8,
        }
    }
}

impl SegmenterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.narrow().map(|_| ())
    }

    pub(crate) fn narrow(&self) -> Result<ValidatedConfig, ConfigError> {
        let threshold = u8::try_from(self.binarization_threshold)
            .map_err(|_| ConfigError::ThresholdOutOfRange(self.binarization_threshold))?;
        let min_width = usize::try_from(self.min_panel_width).map_err(|_| {
            ConfigError::NegativeMinSize {
                field: "min_panel_width",
                value: self.min_panel_width,
            }
        })?;
        let min_height = usize::try_from(self.min_panel_height).map_err(|_| {
            ConfigError::NegativeMinSize {
                field: "min_panel_height",
                value: self.min_panel_height,
            }
        })?;

        Ok(ValidatedConfig {
            threshold,
            min_width,
            min_height,
            connectivity: self.connectivity,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ThresholdOutOfRange(i32),
    NegativeMinSize { field: &'static str, value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(v) => {
                write!(f, "binarization_threshold must be in 0..=255, got {v}")
            }
            Self::NegativeMinSize { field, value } => {
                write!(f, "{field} must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
