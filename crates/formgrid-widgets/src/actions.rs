#![forbid(unsafe_code)]

//! The action cell: reset/search controls and the collapse toggle.
//!
//! [`ActionBar`] renders the controls; [`dispatch`] routes a clicked control
//! back to the collapse cell, the host's reset callback, or the host form.

use crate::{FormHost, Frame, Node, StatefulWidget};
use formgrid_core::ActionIntent;
use formgrid_runtime::{CollapseController, Intl, message_keys};

/// Replaces the default submitter controls. Receives the resolved labels and
/// the nodes that would have been rendered.
pub type OptionRenderFn = fn(&SearchConfig, Vec<Node>) -> Vec<Node>;

/// Replaces the default toggle. Receives the current collapsed value.
pub type CollapseRenderFn = fn(bool, &SearchConfig) -> Node;

/// Host reset hook, run before field values are cleared.
pub type ResetCallback = Box<dyn FnMut()>;

/// Resolved labels for the action cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub search_text: String,
    pub reset_text: String,
    /// Toggle label while collapsed.
    pub collapsed_text: String,
    /// Toggle label while expanded.
    pub expand_text: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_text: "Search".to_string(),
            reset_text: "Reset".to_string(),
            collapsed_text: "Expand".to_string(),
            expand_text: "Collapse".to_string(),
        }
    }
}

impl SearchConfig {
    /// Look every label up in `intl`, falling back to English.
    #[must_use]
    pub fn from_intl<I: Intl + ?Sized>(intl: &I) -> Self {
        let fallback = Self::default();
        Self {
            search_text: intl.get_message(message_keys::SEARCH, &fallback.search_text),
            reset_text: intl.get_message(message_keys::RESET, &fallback.reset_text),
            collapsed_text: intl.get_message(message_keys::COLLAPSED, &fallback.collapsed_text),
            expand_text: intl.get_message(message_keys::EXPAND, &fallback.expand_text),
        }
    }

    /// Override the search label. Empty strings are ignored.
    #[must_use]
    pub fn with_search_text(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.search_text = text.to_string();
        }
        self
    }

    /// Override the reset label. Empty strings are ignored.
    #[must_use]
    pub fn with_reset_text(mut self, text: Option<&str>) -> Self {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            self.reset_text = text.to_string();
        }
        self
    }

    /// Toggle label for the given state.
    #[must_use]
    pub fn toggle_label(&self, collapsed: bool) -> &str {
        if collapsed {
            &self.collapsed_text
        } else {
            &self.expand_text
        }
    }
}

/// Submitter customization.
#[derive(Debug, Clone, Copy, Default)]
pub enum OptionRender {
    #[default]
    Default,
    Hidden,
    Custom(OptionRenderFn),
}

/// Toggle customization.
#[derive(Debug, Clone, Copy, Default)]
pub enum CollapseRender {
    #[default]
    Default,
    Hidden,
    Custom(CollapseRenderFn),
}

/// Controls inside the action cell.
///
/// Renders against the [`CollapseController`] it is given as state, so the
/// toggle always shows the committed value.
#[derive(Debug, Clone, Copy)]
pub struct ActionBar<'a> {
    search: &'a SearchConfig,
    need_collapse_toggle: bool,
    submitter: bool,
    option_render: OptionRender,
    collapse_render: CollapseRender,
}

impl<'a> ActionBar<'a> {
    #[must_use]
    pub fn new(search: &'a SearchConfig) -> Self {
        Self {
            search,
            need_collapse_toggle: false,
            submitter: true,
            option_render: OptionRender::Default,
            collapse_render: CollapseRender::Default,
        }
    }

    /// Offer the expand/collapse toggle.
    #[must_use]
    pub fn need_collapse_toggle(mut self, need: bool) -> Self {
        self.need_collapse_toggle = need;
        self
    }

    /// Render the reset/search controls at all.
    #[must_use]
    pub fn submitter(mut self, submitter: bool) -> Self {
        self.submitter = submitter;
        self
    }

    #[must_use]
    pub fn option_render(mut self, render: OptionRender) -> Self {
        self.option_render = render;
        self
    }

    #[must_use]
    pub fn collapse_render(mut self, render: CollapseRender) -> Self {
        self.collapse_render = render;
        self
    }

    fn default_controls(&self) -> Vec<Node> {
        vec![
            Node::Button {
                label: self.search.reset_text.clone(),
                intent: ActionIntent::Reset,
                primary: false,
            },
            Node::Button {
                label: self.search.search_text.clone(),
                intent: ActionIntent::Search,
                primary: true,
            },
        ]
    }

    fn controls(&self) -> Vec<Node> {
        if !self.submitter {
            return Vec::new();
        }
        match self.option_render {
            OptionRender::Default => self.default_controls(),
            OptionRender::Hidden => Vec::new(),
            OptionRender::Custom(render) => render(self.search, self.default_controls()),
        }
    }

    fn toggle(&self, collapsed: bool) -> Option<Node> {
        if !self.need_collapse_toggle {
            return None;
        }
        match self.collapse_render {
            CollapseRender::Default => Some(Node::Toggle {
                label: self.search.toggle_label(collapsed).to_string(),
                collapsed,
            }),
            CollapseRender::Hidden => None,
            CollapseRender::Custom(render) => Some(render(collapsed, self.search)),
        }
    }
}

impl StatefulWidget for ActionBar<'_> {
    type State = CollapseController;

    fn render(&self, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "ActionBar",
            collapsed = state.collapsed(),
            toggle = self.need_collapse_toggle
        )
        .entered();

        frame.extend(self.controls());
        if let Some(toggle) = self.toggle(state.collapsed()) {
            frame.push(toggle);
        }
    }
}

/// Route a clicked control.
///
/// - `Reset`: `on_reset`, then [`FormHost::reset_fields`]
/// - `Search`: [`FormHost::submit`]
/// - `ToggleCollapse`: [`CollapseController::toggle`]
///
/// Returns the requested collapsed value for a toggle, `None` otherwise.
pub fn dispatch<H: FormHost + ?Sized>(
    intent: ActionIntent,
    collapse: &mut CollapseController,
    host: &mut H,
    on_reset: Option<&mut ResetCallback>,
) -> Option<bool> {
    match intent {
        ActionIntent::Reset => {
            if let Some(on_reset) = on_reset {
                on_reset();
            }
            host.reset_fields();
            None
        }
        ActionIntent::Search => {
            host.submit();
            None
        }
        ActionIntent::ToggleCollapse => Some(collapse.toggle()),
    }
}
