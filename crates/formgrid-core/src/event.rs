#![forbid(unsafe_code)]

//! Host events.
//!
//! The host feeds these to the composition shell one at a time. Each event
//! is handled synchronously to completion before the next one arrives.

/// A user intent raised from the action cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionIntent {
    /// Run the host's validation/submit pipeline.
    Search,
    /// Run the reset callback, then clear host-managed values.
    Reset,
    /// Flip the collapse state.
    ToggleCollapse,
}

impl ActionIntent {
    /// Short label for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Reset => "reset",
            Self::ToggleCollapse => "toggle_collapse",
        }
    }
}

impl std::fmt::Display for ActionIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The container was measured.
    ///
    /// Width is in pixels as reported by the resize observer. Zero, negative
    /// and non-finite values mean "not measured yet".
    Resize {
        /// Container width in pixels.
        width: f64,
    },

    /// The user activated a control in the action cell.
    Action(ActionIntent),

    /// The controlled collapse value changed on the host side.
    CollapsedChanged(bool),

    /// The hosting surface was torn down. Later measurements are ignored.
    Teardown,
}

impl From<ActionIntent> for Event {
    fn from(intent: ActionIntent) -> Self {
        Self::Action(intent)
    }
}
