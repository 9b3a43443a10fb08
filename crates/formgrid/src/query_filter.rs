#![forbid(unsafe_code)]

//! The composition shell.
//!
//! [`QueryFilter`] owns the two pieces of state a query filter has (the
//! container width and the collapse cell) and recomputes its [`LayoutPlan`]
//! whenever either moves. Everything else is delegated: span resolution and
//! planning to `formgrid-layout`, labels to the [`Intl`] provider, controls
//! to `formgrid-widgets`.
//!
//! Events are handled synchronously, one at a time. [`QueryFilter::handle_event`]
//! reports whether the plan was recomputed, so a host can skip repaints.

use std::fmt;

use formgrid_core::{ActionIntent, Event, FieldNode, flatten};
use formgrid_layout::{
    FormLayout, GUTTER_COMPENSATION, GridPlanner, LayoutPlan, ResolvedSpan, resolve_span,
};
use formgrid_runtime::{
    CollapseController, Intl, MessageCatalog, WidthTracker, WidthUpdate,
};
use formgrid_widgets::{
    ActionBar, CollapseRender, DefaultFieldRenderer, FieldGrid, FieldRenderer, FormHost, Frame,
    Node, OptionRender, ResetCallback, SearchConfig, StatefulWidget, TextPreview, Widget,
    dispatch,
};

use crate::config::{LabelWidth, QueryFilterConfig};

/// Responsive query filter.
pub struct QueryFilter {
    config: QueryFilterConfig,
    nodes: Vec<FieldNode>,
    collapse: CollapseController,
    width: WidthTracker,
    intl: Box<dyn Intl>,
    search: SearchConfig,
    option_render: OptionRender,
    collapse_render: CollapseRender,
    on_reset: Option<ResetCallback>,
    plan: Option<LayoutPlan>,
    relayouts: u64,
}

impl fmt::Debug for QueryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryFilter")
            .field("config", &self.config)
            .field("fields", &self.nodes.len())
            .field("collapse", &self.collapse)
            .field("width", &self.width)
            .field("search", &self.search)
            .field("plan", &self.plan)
            .field("relayouts", &self.relayouts)
            .finish_non_exhaustive()
    }
}

impl QueryFilter {
    /// Build the shell. Lays out immediately when `initial_width` is set.
    #[must_use]
    pub fn new(config: QueryFilterConfig, nodes: Vec<FieldNode>) -> Self {
        let collapse = if config.controlled {
            CollapseController::controlled(config.initial_collapsed())
        } else {
            CollapseController::uncontrolled(config.initial_collapsed())
        };
        let width = WidthTracker::with_initial(config.initial_width.unwrap_or(0));
        let intl: Box<dyn Intl> = match config.locale.as_deref() {
            Some(locale) => Box::new(MessageCatalog::builtin(locale)),
            None => Box::new(MessageCatalog::system()),
        };
        let search = Self::search_config(&config, intl.as_ref());

        let mut filter = Self {
            config,
            nodes,
            collapse,
            width,
            intl,
            search,
            option_render: OptionRender::Default,
            collapse_render: CollapseRender::Default,
            on_reset: None,
            plan: None,
            relayouts: 0,
        };
        filter.relayout();
        filter
    }

    fn search_config(config: &QueryFilterConfig, intl: &dyn Intl) -> SearchConfig {
        SearchConfig::from_intl(intl)
            .with_search_text(config.search_text.as_deref())
            .with_reset_text(config.reset_text.as_deref())
    }

    /// Called with the requested value on every toggle.
    #[must_use]
    pub fn on_collapse(mut self, on_collapse: impl FnMut(bool) + 'static) -> Self {
        self.collapse.set_callback(Some(Box::new(on_collapse)));
        self
    }

    /// Called on reset, before the host clears its field values.
    #[must_use]
    pub fn on_reset(mut self, on_reset: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(on_reset));
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

    /// Replace the translation source. Explicit texts in the config still win.
    #[must_use]
    pub fn intl(mut self, intl: impl Intl + 'static) -> Self {
        self.intl = Box::new(intl);
        self.search = Self::search_config(&self.config, self.intl.as_ref());
        self
    }

    /// Replace the field list and lay out again.
    pub fn set_fields(&mut self, nodes: Vec<FieldNode>) {
        self.nodes = nodes;
        self.relayout();
    }

    /// Replace the configuration and lay out again.
    ///
    /// The measured width is kept and labels are re-resolved. When collapse
    /// ownership changes the controller is rebuilt around the displayed value,
    /// keeping the `on_collapse` callback.
    pub fn set_config(&mut self, config: QueryFilterConfig) {
        if config.controlled != self.collapse.is_controlled() {
            let current = self.collapse.collapsed();
            let mut next = if config.controlled {
                CollapseController::controlled(config.collapsed.unwrap_or(current))
            } else {
                CollapseController::uncontrolled(current)
            };
            next.set_callback(self.collapse.take_callback());
            tracing::debug!(
                controlled = config.controlled,
                collapsed = next.collapsed(),
                "collapse ownership changed"
            );
            self.collapse = next;
        } else if config.controlled
            && let Some(collapsed) = config.collapsed
        {
            self.collapse.sync(collapsed);
        }
        self.search = Self::search_config(&config, self.intl.as_ref());
        self.config = config;
        self.relayout();
    }

    /// Feed one host event. Returns whether the plan was recomputed.
    pub fn handle_event<H: FormHost + ?Sized>(&mut self, event: Event, host: &mut H) -> bool {
        if self.is_torn_down() {
            tracing::trace!(?event, "event after teardown ignored");
            return false;
        }
        match event {
            Event::Resize { width } => match self.width.observe(width) {
                WidthUpdate::Changed { .. } => {
                    self.relayout();
                    true
                }
                WidthUpdate::Unchanged | WidthUpdate::Detached => false,
            },
            Event::Action(intent) => self.act(intent, host),
            Event::CollapsedChanged(collapsed) => {
                if self.collapse.sync(collapsed) {
                    self.relayout();
                    true
                } else {
                    false
                }
            }
            Event::Teardown => {
                self.teardown();
                false
            }
        }
    }

    fn act<H: FormHost + ?Sized>(&mut self, intent: ActionIntent, host: &mut H) -> bool {
        let version = self.collapse.version();
        tracing::debug!(%intent, "action dispatched");
        dispatch(intent, &mut self.collapse, host, self.on_reset.as_mut());
        if self.collapse.version() == version {
            return false;
        }
        self.relayout();
        true
    }

    /// Stop reacting to events. Idempotent.
    pub fn teardown(&mut self) {
        self.width.detach();
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        !self.width.is_attached()
    }

    /// Last measured width, `None` while unmeasured.
    #[must_use]
    pub fn width(&self) -> Option<u32> {
        self.width.width()
    }

    #[must_use]
    pub fn collapsed(&self) -> bool {
        self.collapse.collapsed()
    }

    #[must_use]
    pub fn config(&self) -> &QueryFilterConfig {
        &self.config
    }

    /// Span and layout for the current width.
    #[must_use]
    pub fn resolved_span(&self) -> ResolvedSpan {
        resolve_span(
            self.config.layout,
            self.width.width_or_zero().saturating_add(GUTTER_COMPENSATION),
            self.config.span.as_ref(),
        )
    }

    /// Items kept visible while collapsed.
    #[must_use]
    pub fn show_length(&self) -> u16 {
        self.planner().effective_show_length()
    }

    /// Label column in pixels. `None` lets labels size themselves.
    ///
    /// A fixed column only applies to side-by-side layouts.
    #[must_use]
    pub fn label_column_width(&self) -> Option<u16> {
        match self.config.label_width {
            LabelWidth::Px(px) if self.resolved_span().layout != FormLayout::Vertical => Some(px),
            _ => None,
        }
    }

    /// Current plan. `None` until the container has been measured.
    #[must_use]
    pub fn plan(&self) -> Option<&LayoutPlan> {
        self.plan.as_ref()
    }

    /// Number of plan recomputations so far.
    #[must_use]
    pub fn relayout_count(&self) -> u64 {
        self.relayouts
    }

    fn planner(&self) -> GridPlanner {
        self.planner_for(self.resolved_span())
    }

    fn planner_for(&self, resolved: ResolvedSpan) -> GridPlanner {
        GridPlanner::new(resolved)
            .collapsed(self.collapse.collapsed())
            .show_length(self.config.default_cols_number)
            .split(self.config.split)
            .action(self.config.submitter)
    }

    fn relayout(&mut self) {
        let span = tracing::debug_span!(
            "formgrid.relayout",
            width = self.width.width_or_zero(),
            collapsed = self.collapse.collapsed(),
            fields = self.nodes.len()
        );
        let _guard = span.enter();

        let resolved = self.resolved_span();
        let planner = self.planner_for(resolved);
        let flat = flatten(&self.nodes);
        self.plan = planner.plan(self.width.width_or_zero(), &flat);
        self.relayouts += 1;

        match &self.plan {
            Some(plan) => tracing::debug!(
                span = resolved.span,
                layout = %resolved.layout,
                visible = plan.visible().count(),
                rows = plan.row_count(),
                need_collapse_toggle = plan.need_collapse_toggle,
                "relayout"
            ),
            None => tracing::trace!("relayout skipped: container not measured"),
        }
    }

    /// Render with the default field renderer.
    #[must_use]
    pub fn view(&mut self) -> Vec<Node> {
        self.view_with(&DefaultFieldRenderer)
    }

    /// Render with a host field renderer. Empty until measured.
    pub fn view_with<R: FieldRenderer + ?Sized>(&mut self, renderer: &R) -> Vec<Node> {
        let label_width = self.label_column_width();
        let Some(plan) = self.plan.as_ref() else {
            return Vec::new();
        };

        let mut actions = Frame::new();
        ActionBar::new(&self.search)
            .need_collapse_toggle(plan.need_collapse_toggle)
            .option_render(self.option_render)
            .collapse_render(self.collapse_render)
            .render(&mut actions, &mut self.collapse);

        let flat = flatten(&self.nodes);
        let mut frame = Frame::new();
        FieldGrid::new(plan, &flat, renderer)
            .label_width(label_width)
            .actions(actions.into_nodes())
            .render(&mut frame);
        frame.into_nodes()
    }

    /// Text rendering of [`view`](Self::view), `unit_width` cells per grid unit.
    #[must_use]
    pub fn preview(&mut self, unit_width: usize) -> String {
        let nodes = self.view();
        TextPreview::new(&nodes).unit_width(unit_width).render()
    }
}
