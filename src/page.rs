//! The composed page: palette, tabs, carousels and their presentation.

use std::time::Duration;

use tracing::{debug, info};
#[cfg(debug_assertions)]
use tracing::instrument;

use crate::accents::TabPalette;
use crate::carousel::{AutoAdvance, Carousel, CarouselRegistry, CarouselView};
use crate::config::PageConfig;
use crate::document::Document;
use crate::event::PageEvent;
use crate::schedule::{Scheduler, TimerHandle, VirtualClock};
use crate::scroll::{ScrollButtons, scroll_buttons};
use crate::tabs::{TabActivation, TabController, TabId};

/// Owns the page state and applies every decision to the document.
#[derive(Debug)]
pub struct Page<D, S> {
    document: D,
    scheduler: S,
    palette: TabPalette,
    tabs: TabController,
    carousels: CarouselRegistry,
    scroll_step: f64,
}

impl<D: Document, S: Scheduler> Page<D, S> {
    /// Run the load sequence.
    ///
    /// Writes the per-tab style variables, opens the initial tab from its
    /// control, creates a carousel for every region with slides, updates the
    /// scroll buttons and hides the loading screen.
    #[cfg_attr(debug_assertions, instrument(skip_all, fields(base = %config.palette.base)))]
    pub fn load(config: &PageConfig, document: D, scheduler: S) -> Self {
        let palette = TabPalette::generate(&config.palette.base, config.palette.hue_step);
        let mut page = Self {
            document,
            scheduler,
            palette,
            tabs: TabController::new(),
            carousels: CarouselRegistry::new(),
            scroll_step: config.scroll.step,
        };

        page.apply_palette();

        let initial = config.tabs.initial;
        if page.document.has_control(initial) {
            page.activate_tab_with(initial, Some(initial));
        }

        let policy = config.carousel.auto_advance();
        page.create_carousel(&policy.region, &policy);
        for region in config.layout.slides.keys() {
            if region != &policy.region {
                page.create_carousel(region, &policy);
            }
        }

        page.update_scroll_buttons();
        page.document.hide_loading_screen();
        info!(
            active = ?page.tabs.active(),
            carousels = page.carousels.len(),
            "Page loaded"
        );
        page
    }

    fn apply_palette(&mut self) {
        for (tab, colors) in self.palette.iter() {
            if !self.document.has_control(tab) {
                continue;
            }
            for (name, value) in colors.control_vars() {
                self.document.set_control_var(tab, name, value);
            }
            if self.document.has_panel(tab) {
                for (name, value) in colors.panel_vars() {
                    self.document.set_panel_var(tab, name, value);
                }
            }
        }
    }

    /// Create and register the carousel of `region`.
    ///
    /// Returns false when the region has no slides.
    pub fn create_carousel(&mut self, region: &str, policy: &AutoAdvance) -> bool {
        let slides = self.document.slide_count(region);
        let indicators = self.document.has_indicators(region);
        let Some(carousel) = Carousel::new(region, slides, indicators, policy, &mut self.scheduler)
        else {
            return false;
        };
        let view = carousel.view();
        if let Some(handle) = self
            .carousels
            .insert(carousel)
            .and_then(|previous| previous.timer())
        {
            self.scheduler.cancel(handle);
        }
        self.document.render_carousel(region, &view);
        debug!(region, slides, auto = policy.region == region, "Carousel created");
        true
    }

    /// Open `tab` using its own control as the trigger, if that control exists.
    pub fn activate_tab(&mut self, tab: TabId) {
        let trigger = self.document.has_control(tab).then_some(tab);
        self.activate_tab_with(tab, trigger);
    }

    /// Open `tab` as if `trigger` had been clicked.
    pub fn activate_tab_with(&mut self, tab: TabId, trigger: Option<TabId>) {
        let trigger = trigger.filter(|control| self.document.has_control(*control));
        let activation = self.tabs.activate(tab, trigger, &self.palette);
        self.apply_activation(&activation);
    }

    fn apply_activation(&mut self, activation: &TabActivation) {
        for tab in TabId::ALL {
            self.document
                .set_panel_hidden(tab, !activation.panel_visible(tab));
        }
        for tab in TabId::ALL {
            self.document
                .style_control(tab, &activation.control_style(tab));
        }

        if let Some(trigger) = activation.trigger {
            if let Some(color) = activation.accent.as_deref() {
                self.document.set_title_color(color);
                self.document.set_arrow_stroke(color);
            }
            if self
                .document
                .strip_metrics()
                .is_some_and(|metrics| metrics.overflows())
            {
                self.document.scroll_into_view(trigger);
            }
        }

        if activation.reset_carousel {
            self.go_to_slide(TabId::Outcome.as_str(), 0);
        }
        self.update_scroll_buttons();
    }

    /// Recompute which scroll buttons are shown.
    pub fn update_scroll_buttons(&mut self) -> Option<ScrollButtons> {
        let metrics = self.document.strip_metrics()?;
        let buttons = scroll_buttons(&metrics);
        self.document.set_scroll_buttons(buttons);
        Some(buttons)
    }

    pub fn scroll_strip_left(&mut self) {
        self.document.scroll_strip_by(-self.scroll_step);
        self.on_strip_scroll();
    }

    pub fn scroll_strip_right(&mut self) {
        self.document.scroll_strip_by(self.scroll_step);
        self.on_strip_scroll();
    }

    pub fn on_strip_scroll(&mut self) {
        self.update_scroll_buttons();
    }

    /// The window was resized and the strip is now `client_width` wide.
    pub fn on_resize(&mut self, client_width: f64) {
        self.document.set_client_width(client_width);
        self.update_scroll_buttons();
    }

    fn with_carousel(
        &mut self,
        region: &str,
        step: impl FnOnce(&mut Carousel, &mut dyn Scheduler) -> CarouselView,
    ) -> Option<CarouselView> {
        let carousel = self.carousels.get_mut(region)?;
        let view = step(carousel, &mut self.scheduler);
        self.document.render_carousel(region, &view);
        Some(view)
    }

    pub fn next_slide(&mut self, region: &str) -> Option<CarouselView> {
        self.with_carousel(region, |c, s| c.next(s))
    }

    pub fn prev_slide(&mut self, region: &str) -> Option<CarouselView> {
        self.with_carousel(region, |c, s| c.prev(s))
    }

    pub fn go_to_slide(&mut self, region: &str, n: isize) -> Option<CarouselView> {
        self.with_carousel(region, |c, s| c.go_to_slide(n, s))
    }

    /// A scheduled timer fired: advance the carousel that owns it.
    ///
    /// Stale handles are ignored.
    pub fn fire_timer(&mut self, handle: TimerHandle) -> Option<CarouselView> {
        let region = self.carousels.region_of(handle)?.to_string();
        debug!(region = %region, "Auto-advance");
        self.next_slide(&region)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.tabs.active()
    }

    pub fn carousel(&self, region: &str) -> Option<&Carousel> {
        self.carousels.get(region)
    }
}

impl<D: Document> Page<D, VirtualClock> {
    /// Let `by` of virtual time pass, firing every timer that comes due.
    ///
    /// Whole periods before the last firing of each timer are applied in one
    /// step, so long waits cost the same as short ones. Returns the number
    /// of slide advances.
    pub fn advance(&mut self, by: Duration) -> usize {
        let deadline = self.scheduler.now().saturating_add(by);
        let mut fired = 0usize;
        for (handle, periods) in self.scheduler.skip_periods(deadline) {
            if let Some(carousel) = self.carousels.owner_mut(handle) {
                carousel.skip_ahead(periods);
                fired = fired.saturating_add(usize::try_from(periods).unwrap_or(usize::MAX));
            }
        }
        while let Some(due) = self.scheduler.pop_due(deadline) {
            if self.fire_timer(due.handle).is_some() {
                fired = fired.saturating_add(1);
            }
        }
        self.scheduler.set_now(deadline);
        fired
    }

    /// Apply one user or clock event.
    pub fn dispatch(&mut self, event: &PageEvent) {
        match event {
            PageEvent::Tab(tab) => self.activate_tab(*tab),
            PageEvent::Next(region) => {
                self.next_slide(region);
            }
            PageEvent::Prev(region) => {
                self.prev_slide(region);
            }
            PageEvent::GoTo(region, n) => {
                self.go_to_slide(region, *n);
            }
            PageEvent::Wait(by) => {
                self.advance(*by);
            }
            PageEvent::ScrollLeft => self.scroll_strip_left(),
            PageEvent::ScrollRight => self.scroll_strip_right(),
            PageEvent::Resize(width) => self.on_resize(*width),
        }
    }
}
