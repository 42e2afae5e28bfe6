//! Width-driven presentation decisions for the custom survey post.
//!
//! The survey post needs a fixed amount of horizontal room. How much depends
//! on the display density, whether the right-hand sidebar is open and whether
//! the team sidebar is shown, so the decision is a pure function of those
//! signals plus the current window width.

use serde::{Deserialize, Serialize};

/// Window widths at or below this are treated as mobile.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Horizontal space taken by the team sidebar when it is visible.
pub const TEAM_SIDEBAR_WIDTH: u32 = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplaySetting {
    #[default]
    Clean,
    Compact,
}

impl DisplaySetting {
    /// Parses the host's `message_display` preference value.
    pub fn from_preference(value: &str) -> Self {
        match value {
            "compact" => Self::Compact,
            _ => Self::Clean,
        }
    }

    pub fn is_compact(&self) -> bool {
        matches!(self, Self::Compact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthRequirement {
    pub compact_view: bool,
    pub sidebar_open: bool,
    pub full_width: u32,
    pub small_width: u32,
}

impl WidthRequirement {
    /// The thresholds once the team sidebar's space is handed back.
    pub fn without_team_sidebar(self) -> Self {
        Self {
            full_width: self.full_width - TEAM_SIDEBAR_WIDTH,
            small_width: self.small_width - TEAM_SIDEBAR_WIDTH,
            ..self
        }
    }
}

/// Required widths for the regular and small survey posts, one row per
/// combination of display density and sidebar state.
pub const REQUIRED_WIDTHS: [WidthRequirement; 4] = [
    WidthRequirement {
        compact_view: false,
        sidebar_open: false,
        full_width: 856,
        small_width: 769,
    },
    WidthRequirement {
        compact_view: false,
        sidebar_open: true,
        full_width: 1260,
        small_width: 1090,
    },
    WidthRequirement {
        compact_view: true,
        sidebar_open: false,
        full_width: 898,
        small_width: 769,
    },
    WidthRequirement {
        compact_view: true,
        sidebar_open: true,
        full_width: 1298,
        small_width: 1130,
    },
];

pub fn width_requirement(compact_view: bool, sidebar_open: bool) -> WidthRequirement {
    let index = match (compact_view, sidebar_open) {
        (false, false) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (true, true) => 3,
    };
    REQUIRED_WIDTHS[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PresentationMode {
    Full,
    Small,
    Suppressed,
}

impl PresentationMode {
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full)
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed)
    }
}

/// How the post behaves when rendered inside the right-hand side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePanelMode {
    /// Render the small post whenever the main area would render the post at all.
    #[default]
    Small,
    /// Never render the custom post in the side panel.
    Suppressed,
}

/// Environment signals the classifier depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutSignals {
    pub window_width: u32,
    pub display: DisplaySetting,
    pub sidebar_open: bool,
    pub team_count: usize,
}

impl LayoutSignals {
    pub fn team_sidebar_visible(&self) -> bool {
        self.team_count > 1
    }

    pub fn requirement(&self) -> WidthRequirement {
        let requirement = width_requirement(self.display.is_compact(), self.sidebar_open);
        if self.team_sidebar_visible() {
            requirement
        } else {
            requirement.without_team_sidebar()
        }
    }

    /// Mode for the post in the main content area.
    pub fn mode(&self) -> PresentationMode {
        classify(
            self.window_width,
            self.display.is_compact(),
            self.sidebar_open,
            self.team_sidebar_visible(),
        )
    }

    /// Mode for the post rendered inside the side panel. Never `Full`.
    pub fn side_panel_mode(&self, policy: SidePanelMode) -> PresentationMode {
        match (policy, self.mode()) {
            (SidePanelMode::Suppressed, _) | (_, PresentationMode::Suppressed) => {
                PresentationMode::Suppressed
            }
            (SidePanelMode::Small, _) => PresentationMode::Small,
        }
    }

    pub fn mode_in(&self, is_rhs: bool, policy: SidePanelMode) -> PresentationMode {
        if is_rhs {
            self.side_panel_mode(policy)
        } else {
            self.mode()
        }
    }

    /// Whether the custom post renderer should be registered at all.
    pub fn use_survey_post(&self) -> bool {
        !self.mode().is_suppressed()
    }
}

pub fn classify(
    window_width: u32,
    compact_view: bool,
    sidebar_open: bool,
    team_sidebar_visible: bool,
) -> PresentationMode {
    if window_width <= MOBILE_MAX_WIDTH {
        return PresentationMode::Suppressed;
    }

    let mut requirement = width_requirement(compact_view, sidebar_open);
    if !team_sidebar_visible {
        requirement = requirement.without_team_sidebar();
    }

    if window_width >= requirement.full_width {
        PresentationMode::Full
    } else if window_width >= requirement.small_width {
        PresentationMode::Small
    } else {
        PresentationMode::Suppressed
    }
}
