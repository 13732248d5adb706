//! Tab identifiers and the active-tab decision.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accents::TabPalette;

/// Text colour of an inactive tab control.
pub const INACTIVE_TEXT: &str = "#4B4B4B";
/// Background of an inactive tab control.
pub const INACTIVE_BACKGROUND: &str = "#F3F4F6";
/// Text colour of the active tab control.
pub const ACTIVE_TEXT: &str = "white";

/// One of the fixed page tabs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    #[default]
    Plan,
    Task1,
    Task2,
    Task3,
    Outcome,
}

impl TabId {
    /// All tabs in page order.
    pub const ALL: [TabId; 5] = [
        TabId::Plan,
        TabId::Task1,
        TabId::Task2,
        TabId::Task3,
        TabId::Outcome,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::Task1 => "task1",
            Self::Task2 => "task2",
            Self::Task3 => "task3",
            Self::Outcome => "outcome",
        }
    }

    /// Element id of the content panel, e.g. `content-plan`.
    pub fn panel_id(self) -> String {
        format!("content-{}", self.as_str())
    }

    /// Element id of the tab control, e.g. `tab-plan`.
    pub fn control_id(self) -> String {
        format!("tab-{}", self.as_str())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TabId::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| format!("unknown tab '{s}'"))
    }
}

/// Visual state of one tab control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStyle {
    pub active: bool,
    pub text: String,
    pub background: String,
}

impl ControlStyle {
    pub fn inactive() -> Self {
        Self {
            active: false,
            text: INACTIVE_TEXT.to_string(),
            background: INACTIVE_BACKGROUND.to_string(),
        }
    }

    pub fn active(color: &str) -> Self {
        Self {
            active: true,
            text: ACTIVE_TEXT.to_string(),
            background: color.to_string(),
        }
    }
}

/// Everything that changes on the page when a tab is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabActivation {
    /// Tab whose panel becomes visible
    pub tab: TabId,
    /// Control marked active, if one triggered the activation
    pub trigger: Option<TabId>,
    /// Active colour of the trigger control (title, arrows, control background)
    pub accent: Option<String>,
    /// Whether the outcome carousel goes back to its first slide
    pub reset_carousel: bool,
}

impl TabActivation {
    /// Style of `control` after this activation.
    pub fn control_style(&self, control: TabId) -> ControlStyle {
        if self.trigger == Some(control) {
            ControlStyle::active(self.accent.as_deref().unwrap_or(INACTIVE_BACKGROUND))
        } else {
            ControlStyle::inactive()
        }
    }

    /// Whether the panel of `tab` is visible after this activation.
    pub fn panel_visible(&self, tab: TabId) -> bool {
        self.tab == tab
    }
}

/// Tracks which tab is active.
#[derive(Debug, Clone, Default)]
pub struct TabController {
    active: Option<TabId>,
}

impl TabController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<TabId> {
        self.active
    }

    /// Decide the page changes for activating `tab` from `trigger`.
    ///
    /// The accent is the trigger control's colour, which need not be the
    /// colour of `tab` itself.
    pub fn activate(
        &mut self,
        tab: TabId,
        trigger: Option<TabId>,
        palette: &TabPalette,
    ) -> TabActivation {
        let accent = trigger
            .and_then(|control| palette.colors(control))
            .map(|colors| colors.active.clone());

        if self.active != Some(tab) {
            debug!(from = ?self.active, to = %tab, "Switching tab");
        }
        self.active = Some(tab);

        TabActivation {
            tab,
            trigger,
            accent,
            reset_carousel: tab == TabId::Outcome,
        }
    }
}
