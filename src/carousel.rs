//! Slide carousel state machine.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::schedule::{Scheduler, TimerHandle};

/// Region whose carousel advances on its own.
pub const AUTO_ADVANCE_REGION: &str = "outcome";
/// Default period between automatic advances.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(5000);

/// Layout of a slide inside the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideLayout {
    /// In normal flow; sizes the track.
    Static,
    /// Taken out of flow, stacked under the active slide.
    Absolute,
}

/// Which slide a carousel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub current: usize,
    pub len: usize,
    /// Whether indicator controls exist for this carousel
    pub indicators: bool,
}

impl CarouselView {
    pub fn is_active(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn layout(&self, index: usize) -> SlideLayout {
        if self.is_active(index) {
            SlideLayout::Static
        } else {
            SlideLayout::Absolute
        }
    }
}

/// Auto-advance policy for newly created carousels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoAdvance {
    pub region: String,
    pub interval: Duration,
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self {
            region: AUTO_ADVANCE_REGION.to_string(),
            interval: AUTO_ADVANCE_INTERVAL,
        }
    }
}

/// One carousel instance.
#[derive(Debug, Clone)]
pub struct Carousel {
    id: String,
    len: usize,
    current: usize,
    indicators: bool,
    interval: Option<Duration>,
    timer: Option<TimerHandle>,
}

impl Carousel {
    /// Create a carousel over `slides` slides showing slide 0.
    ///
    /// Returns `None` when there are no slides. The carousel auto-advances
    /// only when `id` is the region named by `policy`.
    pub fn new(
        id: &str,
        slides: usize,
        indicators: bool,
        policy: &AutoAdvance,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        if slides == 0 {
            debug!(region = id, "No slides, carousel not created");
            return None;
        }
        let mut carousel = Self {
            id: id.to_string(),
            len: slides,
            current: 0,
            indicators,
            interval: (id == policy.region).then_some(policy.interval),
            timer: None,
        };
        carousel.go_to_slide(0, scheduler);
        Some(carousel)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn auto_advances(&self) -> bool {
        self.interval.is_some()
    }

    /// Handle of the pending auto-advance timer.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn view(&self) -> CarouselView {
        CarouselView {
            current: self.current,
            len: self.len,
            indicators: self.indicators,
        }
    }

    /// Show slide `n`, wrapping `n >= len` to the first slide and `n < 0`
    /// to the last.
    ///
    /// The pending timer is cancelled before the move and a fresh one is
    /// scheduled after it, so any navigation restarts the countdown.
    pub fn go_to_slide(&mut self, n: isize, scheduler: &mut dyn Scheduler) -> CarouselView {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }

        let target = if n < 0 {
            self.len - 1
        } else if n as usize >= self.len {
            0
        } else {
            n as usize
        };
        trace!(region = %self.id, from = self.current, to = target, "Slide transition");
        self.current = target;

        if let Some(interval) = self.interval {
            self.timer = Some(scheduler.schedule_repeating(&self.id, interval));
        }
        self.view()
    }

    /// Move `slides` positions forward without touching the timer.
    ///
    /// Used when whole auto-advance periods are skipped at once.
    pub fn skip_ahead(&mut self, slides: u64) {
        let len = self.len as u64;
        self.current = ((self.current as u64 + slides % len) % len) as usize;
    }

    pub fn next(&mut self, scheduler: &mut dyn Scheduler) -> CarouselView {
        self.go_to_slide(self.current as isize + 1, scheduler)
    }

    pub fn prev(&mut self, scheduler: &mut dyn Scheduler) -> CarouselView {
        self.go_to_slide(self.current as isize - 1, scheduler)
    }
}

/// Carousels of a page keyed by region id.
#[derive(Debug, Clone, Default)]
pub struct CarouselRegistry {
    carousels: BTreeMap<String, Carousel>,
}

impl CarouselRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a carousel, replacing any previous one for the same region.
    pub fn insert(&mut self, carousel: Carousel) -> Option<Carousel> {
        self.carousels.insert(carousel.id.clone(), carousel)
    }

    pub fn get(&self, region: &str) -> Option<&Carousel> {
        self.carousels.get(region)
    }

    pub fn get_mut(&mut self, region: &str) -> Option<&mut Carousel> {
        self.carousels.get_mut(region)
    }

    /// Region owning the timer `handle`.
    pub fn region_of(&self, handle: TimerHandle) -> Option<&str> {
        self.carousels
            .values()
            .find(|c| c.timer == Some(handle))
            .map(|c| c.id.as_str())
    }

    /// Carousel owning the timer `handle`.
    pub fn owner_mut(&mut self, handle: TimerHandle) -> Option<&mut Carousel> {
        self.carousels
            .values_mut()
            .find(|c| c.timer == Some(handle))
    }

    pub fn len(&self) -> usize {
        self.carousels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carousels.is_empty()
    }
}
