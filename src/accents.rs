//! Per-tab accent colours derived from a hue-rotated palette.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::color::{Hsl, generate_hue_variations};
use crate::tabs::TabId;

/// Lightness drop between the active colour and the panel hover colour.
pub const HOVER_DARKEN: u8 = 10;
/// Alpha of the control hover background.
pub const HOVER_BG_ALPHA: f32 = 0.1;
/// Alpha of the card background inside a panel.
pub const CARD_BG_ALPHA: f32 = 0.2;

/// CSS colours assigned to one tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabColors {
    pub hsl: Hsl,
    /// `--active-color`
    pub active: String,
    /// `--hover-color`
    pub hover: String,
    /// `--active-color-hover-bg`
    pub hover_bg: String,
    /// `--card-bg-color`
    pub card_bg: String,
}

impl TabColors {
    pub fn from_hsl(hsl: Hsl) -> Self {
        Self {
            hsl,
            active: hsl.to_css(),
            hover: hsl.darken(HOVER_DARKEN).to_css(),
            hover_bg: hsl.to_css_alpha(HOVER_BG_ALPHA),
            card_bg: hsl.to_css_alpha(CARD_BG_ALPHA),
        }
    }

    /// Style variables written on the tab control.
    pub fn control_vars(&self) -> [(&'static str, &str); 2] {
        [
            ("--active-color", self.active.as_str()),
            ("--active-color-hover-bg", self.hover_bg.as_str()),
        ]
    }

    /// Style variables written on the content panel.
    pub fn panel_vars(&self) -> [(&'static str, &str); 3] {
        [
            ("--active-color", self.active.as_str()),
            ("--hover-color", self.hover.as_str()),
            ("--card-bg-color", self.card_bg.as_str()),
        ]
    }
}

/// Accent colours for every tab, generated once at load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TabPalette {
    colors: BTreeMap<TabId, TabColors>,
}

impl TabPalette {
    /// One hue step per tab in page order, starting from `base_hex`.
    pub fn generate(base_hex: &str, hue_step: i32) -> Self {
        let variations = generate_hue_variations(base_hex, TabId::ALL.len(), hue_step);
        let colors = TabId::ALL
            .into_iter()
            .zip(variations)
            .map(|(tab, hsl)| (tab, TabColors::from_hsl(hsl)))
            .collect();
        Self { colors }
    }

    pub fn colors(&self, tab: TabId) -> Option<&TabColors> {
        self.colors.get(&tab)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TabId, &TabColors)> {
        self.colors.iter().map(|(tab, colors)| (*tab, colors))
    }

    /// CSS custom-property block, one rule per tab control.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (tab, colors) in self.iter() {
            css.push_str(&format!("#{} {{\n", tab.control_id()));
            for (name, value) in colors.control_vars() {
                css.push_str(&format!("  {name}: {value};\n"));
            }
            css.push_str("}\n");
        }
        css
    }
}
