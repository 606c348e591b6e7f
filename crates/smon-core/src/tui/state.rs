//! Render-loop state.

use crate::metrics::DerivedMetrics;
use crate::model::SysInfo;

/// Everything the renderer reads for one frame.
///
/// Replaced wholesale on every tick; the renderer never touches rate state.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub metrics: DerivedMetrics,
    pub identity: SysInfo,
    /// Refresh interval shown in the footer.
    pub interval_secs: u64,
}

impl AppState {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            interval_secs,
            ..Default::default()
        }
    }
}
