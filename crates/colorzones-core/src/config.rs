use serde::{Deserialize, Serialize};

/// Pixel count above which a pass is split into parallel row bands.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

/// Execution settings for [`ColorZonesStage`](crate::pipeline::stage::ColorZonesStage).
///
/// Missing fields fall back to their defaults, so a host can embed this in
/// its own settings file and only override what it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Allow rayon to split large tiles.
    pub parallel: bool,
    /// Tiles with more pixels than this run in parallel.
    pub parallel_threshold: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl StageConfig {
    /// Always run on the calling thread.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn runs_parallel(&self, pixels: usize) -> bool {
        self.parallel && pixels > self.parallel_threshold
    }
}
