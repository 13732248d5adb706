//! Visibility of the scroll buttons around the tab strip.

use serde::{Deserialize, Serialize};

/// Horizontal geometry of the scrollable tab strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

impl ScrollMetrics {
    pub fn overflows(&self) -> bool {
        self.scroll_width > self.client_width
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Metrics after scrolling by `delta`, clamped to the scrollable range.
    pub fn scrolled_by(&self, delta: f64) -> Self {
        Self {
            scroll_left: (self.scroll_left + delta).clamp(0.0, self.max_scroll()),
            ..*self
        }
    }
}

/// Which scroll buttons are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollButtons {
    pub left: bool,
    pub right: bool,
}

/// Show the left button when scrolled away from the start and the right
/// button when more than one pixel remains before the end.
///
/// ```
/// use tabtint::scroll::{ScrollButtons, ScrollMetrics, scroll_buttons};
///
/// let metrics = ScrollMetrics { scroll_left: 0.0, scroll_width: 900.0, client_width: 400.0 };
/// assert_eq!(scroll_buttons(&metrics), ScrollButtons { left: false, right: true });
/// ```
pub fn scroll_buttons(metrics: &ScrollMetrics) -> ScrollButtons {
    if !metrics.overflows() {
        return ScrollButtons::default();
    }
    ScrollButtons {
        left: metrics.scroll_left > 0.0,
        right: metrics.scroll_left < metrics.scroll_width - metrics.client_width - 1.0,
    }
}
