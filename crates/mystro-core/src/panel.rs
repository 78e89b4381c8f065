//! Open/closed state of the share dropdown.

/// Visibility of the dropdown panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    /// Whether the panel is visible.
    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }

    /// State after a click on the trigger button.
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Closed => PanelState::Open,
            PanelState::Open => PanelState::Closed,
        }
    }

    /// State after a click outside the widget.
    pub fn dismissed(self) -> Self {
        PanelState::Closed
    }
}
