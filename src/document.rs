//! The host page as seen by the controllers.
//!
//! [`Document`] is the single seam between decision logic and presentation.
//! Every lookup may miss; implementations turn writes to missing elements
//! into no-ops. [`HeadlessDocument`] keeps the whole page in memory so it can
//! be driven and inspected without a browser.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::carousel::{CarouselView, SlideLayout};
use crate::config::LayoutConfig;
use crate::scroll::{ScrollButtons, ScrollMetrics};
use crate::tabs::{ControlStyle, TabId};

/// Operations the controllers need from the rendered page.
pub trait Document {
    /// Whether the content panel of `tab` exists.
    fn has_panel(&self, tab: TabId) -> bool;
    /// Whether the tab control of `tab` exists.
    fn has_control(&self, tab: TabId) -> bool;
    fn set_panel_hidden(&mut self, tab: TabId, hidden: bool);
    fn set_panel_var(&mut self, tab: TabId, name: &str, value: &str);
    fn set_control_var(&mut self, tab: TabId, name: &str, value: &str);
    fn style_control(&mut self, tab: TabId, style: &ControlStyle);
    /// Recolour the page title. Returns false when there is no title.
    fn set_title_color(&mut self, color: &str) -> bool;
    /// Recolour both scroll arrows. Returns false unless both arrows exist.
    fn set_arrow_stroke(&mut self, color: &str) -> bool;

    /// Geometry of the tab strip, if it exists.
    fn strip_metrics(&self) -> Option<ScrollMetrics>;
    /// Bring the control of `tab` to the centre of the strip.
    fn scroll_into_view(&mut self, tab: TabId);
    fn scroll_strip_by(&mut self, delta: f64);
    fn set_client_width(&mut self, width: f64);
    fn set_scroll_buttons(&mut self, buttons: ScrollButtons);

    /// Number of slides in the track of `region`.
    fn slide_count(&self, region: &str) -> usize;
    /// Whether the indicator container of `region` exists.
    fn has_indicators(&self, region: &str) -> bool;
    fn render_carousel(&mut self, region: &str, view: &CarouselView);

    fn hide_loading_screen(&mut self);
}

/// A content panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub hidden: bool,
    pub vars: BTreeMap<String, String>,
}

/// A tab control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub style: ControlStyle,
    pub vars: BTreeMap<String, String>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            style: ControlStyle::inactive(),
            vars: BTreeMap::new(),
        }
    }
}

/// One rendered slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideState {
    pub active: bool,
    pub layout: SlideLayout,
}

/// Slides and indicators of one carousel region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselState {
    pub slides: Vec<SlideState>,
    /// `None` when the region has no indicator container
    pub indicators: Option<Vec<bool>>,
}

impl CarouselState {
    fn new(slides: usize, indicators: bool) -> Self {
        Self {
            slides: vec![
                SlideState {
                    active: false,
                    layout: SlideLayout::Static,
                };
                slides
            ],
            indicators: indicators.then(Vec::new),
        }
    }

    /// Index of the active slide when exactly one is active.
    pub fn active_slide(&self) -> Option<usize> {
        let mut active = self.slides.iter().enumerate().filter(|(_, s)| s.active);
        match (active.next(), active.next()) {
            (Some((index, _)), None) => Some(index),
            _ => None,
        }
    }
}

/// The tab strip with its scroll buttons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripState {
    pub metrics: ScrollMetrics,
    /// Width of one tab control
    pub control_width: f64,
    pub buttons: ScrollButtons,
}

/// In-memory page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadlessDocument {
    pub panels: BTreeMap<TabId, PanelState>,
    pub controls: BTreeMap<TabId, ControlState>,
    /// Title colour; `None` when there is no title element
    pub title: Option<String>,
    /// Stroke of the left and right arrows; `None` unless both exist
    pub arrows: Option<(String, String)>,
    pub strip: Option<StripState>,
    pub carousels: BTreeMap<String, CarouselState>,
    /// Whether the loading screen is shown; `None` when absent
    pub loading_screen: Option<bool>,
}

impl HeadlessDocument {
    /// An empty page without any elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the page described by `layout`.
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        let mut doc = Self::new();
        for tab in &layout.panels {
            doc.panels.insert(*tab, PanelState::default());
        }
        for tab in &layout.controls {
            doc.controls.insert(*tab, ControlState::default());
        }
        if layout.title {
            doc.title = Some(String::new());
        }
        if layout.arrows {
            doc.arrows = Some((String::new(), String::new()));
        }
        if layout.strip {
            let control_width = layout.control_width;
            doc.strip = Some(StripState {
                metrics: ScrollMetrics {
                    scroll_left: 0.0,
                    scroll_width: control_width * layout.controls.len() as f64,
                    client_width: layout.client_width,
                },
                control_width,
                buttons: ScrollButtons::default(),
            });
        }
        for (region, slides) in &layout.slides {
            let indicators = !layout.no_indicators.contains(region);
            doc.carousels
                .insert(region.clone(), CarouselState::new(*slides, indicators));
        }
        if layout.loading_screen {
            doc.loading_screen = Some(true);
        }
        doc
    }

    /// Tabs whose panels are visible.
    pub fn visible_panels(&self) -> Vec<TabId> {
        self.panels
            .iter()
            .filter(|(_, p)| !p.hidden)
            .map(|(tab, _)| *tab)
            .collect()
    }

    /// Tabs whose controls are styled active.
    pub fn active_controls(&self) -> Vec<TabId> {
        self.controls
            .iter()
            .filter(|(_, c)| c.style.active)
            .map(|(tab, _)| *tab)
            .collect()
    }

    pub fn carousel(&self, region: &str) -> Option<&CarouselState> {
        self.carousels.get(region)
    }
}

impl Document for HeadlessDocument {
    fn has_panel(&self, tab: TabId) -> bool {
        self.panels.contains_key(&tab)
    }

    fn has_control(&self, tab: TabId) -> bool {
        self.controls.contains_key(&tab)
    }

    fn set_panel_hidden(&mut self, tab: TabId, hidden: bool) {
        if let Some(panel) = self.panels.get_mut(&tab) {
            panel.hidden = hidden;
        }
    }

    fn set_panel_var(&mut self, tab: TabId, name: &str, value: &str) {
        if let Some(panel) = self.panels.get_mut(&tab) {
            panel.vars.insert(name.to_string(), value.to_string());
        }
    }

    fn set_control_var(&mut self, tab: TabId, name: &str, value: &str) {
        if let Some(control) = self.controls.get_mut(&tab) {
            control.vars.insert(name.to_string(), value.to_string());
        }
    }

    fn style_control(&mut self, tab: TabId, style: &ControlStyle) {
        if let Some(control) = self.controls.get_mut(&tab) {
            control.style = style.clone();
        }
    }

    fn set_title_color(&mut self, color: &str) -> bool {
        match self.title.as_mut() {
            Some(title) => {
                *title = color.to_string();
                true
            }
            None => false,
        }
    }

    fn set_arrow_stroke(&mut self, color: &str) -> bool {
        match self.arrows.as_mut() {
            Some((left, right)) => {
                *left = color.to_string();
                *right = color.to_string();
                true
            }
            None => false,
        }
    }

    fn strip_metrics(&self) -> Option<ScrollMetrics> {
        self.strip.as_ref().map(|s| s.metrics)
    }

    fn scroll_into_view(&mut self, tab: TabId) {
        let Some(position) = self.controls.keys().position(|t| *t == tab) else {
            return;
        };
        if let Some(strip) = self.strip.as_mut() {
            let centre = strip.control_width * (position as f64 + 0.5);
            let target = centre - strip.metrics.client_width / 2.0;
            let delta = target - strip.metrics.scroll_left;
            strip.metrics = strip.metrics.scrolled_by(delta);
        }
    }

    fn scroll_strip_by(&mut self, delta: f64) {
        if let Some(strip) = self.strip.as_mut() {
            strip.metrics = strip.metrics.scrolled_by(delta);
        }
    }

    fn set_client_width(&mut self, width: f64) {
        if let Some(strip) = self.strip.as_mut() {
            strip.metrics.client_width = width;
            strip.metrics = strip.metrics.scrolled_by(0.0);
        }
    }

    fn set_scroll_buttons(&mut self, buttons: ScrollButtons) {
        if let Some(strip) = self.strip.as_mut() {
            strip.buttons = buttons;
        }
    }

    fn slide_count(&self, region: &str) -> usize {
        self.carousels.get(region).map_or(0, |c| c.slides.len())
    }

    fn has_indicators(&self, region: &str) -> bool {
        self.carousels
            .get(region)
            .is_some_and(|c| c.indicators.is_some())
    }

    fn render_carousel(&mut self, region: &str, view: &CarouselView) {
        let Some(state) = self.carousels.get_mut(region) else {
            return;
        };
        for (index, slide) in state.slides.iter_mut().enumerate() {
            slide.active = view.is_active(index);
            slide.layout = view.layout(index);
        }
        if let Some(indicators) = state.indicators.as_mut() {
            if indicators.len() != view.len {
                indicators.resize(view.len, false);
            }
            for (index, lit) in indicators.iter_mut().enumerate() {
                *lit = view.is_active(index);
            }
        }
    }

    fn hide_loading_screen(&mut self) {
        if let Some(shown) = self.loading_screen.as_mut() {
            *shown = false;
        }
    }
}
