#![forbid(unsafe_code)]

//! Plan-to-node mapping.
//!
//! [`FieldGrid`] walks a [`LayoutPlan`] in order and emits one row holding a
//! column per item (hidden items stay mounted with `hidden: true`), a dashed
//! divider after each entry the plan marks, and the action column last.

use crate::rule::Divider;
use crate::{DefaultFieldRenderer, FieldContext, FieldRenderer, Frame, Node, Widget};
use formgrid_core::FlatField;
use formgrid_layout::LayoutPlan;

/// Horizontal gutter between columns, in pixels.
pub const ROW_GUTTER: u16 = 24;

/// Key of the action column.
pub const ACTION_KEY: &str = "submitter";

/// Grid row for a planned field list.
#[derive(Debug, Clone)]
pub struct FieldGrid<'a, R: FieldRenderer + ?Sized = DefaultFieldRenderer> {
    plan: &'a LayoutPlan,
    items: &'a [FlatField<'a>],
    renderer: &'a R,
    label_width: Option<u16>,
    actions: Vec<Node>,
}

impl<'a, R: FieldRenderer + ?Sized> FieldGrid<'a, R> {
    /// `items` must be the list `plan` was computed from.
    #[must_use]
    pub fn new(plan: &'a LayoutPlan, items: &'a [FlatField<'a>], renderer: &'a R) -> Self {
        Self {
            plan,
            items,
            renderer,
            label_width: None,
            actions: Vec::new(),
        }
    }

    /// Fixed label column for every field.
    #[must_use]
    pub fn label_width(mut self, label_width: Option<u16>) -> Self {
        self.label_width = label_width;
        self
    }

    /// Content of the action column.
    #[must_use]
    pub fn actions(mut self, actions: Vec<Node>) -> Self {
        self.actions = actions;
        self
    }

    fn columns(&self) -> Vec<Node> {
        let mut children = Vec::with_capacity(self.plan.entries.len() + 1);
        for entry in &self.plan.entries {
            let Some(item) = self.items.get(entry.index) else {
                formgrid_core::warn!(
                    index = entry.index,
                    items = self.items.len(),
                    "plan entry has no matching item"
                );
                continue;
            };
            let ctx = FieldContext {
                key: &entry.key,
                layout: self.plan.span.layout,
                label_width: self.label_width,
            };
            children.push(Node::Col {
                key: entry.key.clone(),
                span: entry.col_span,
                offset: 0,
                hidden: !entry.visible,
                align_end: false,
                children: vec![self.renderer.render_field(item, &ctx)],
            });
            if entry.visible && entry.divider_after {
                children.push(Node::Divider(Divider::new().dashed(true)));
            }
        }
        if let Some(cell) = self.plan.action_cell {
            children.push(Node::Col {
                key: ACTION_KEY.to_string(),
                span: cell.span,
                offset: cell.offset,
                hidden: false,
                align_end: true,
                children: self.actions.clone(),
            });
        }
        children
    }
}

impl<R: FieldRenderer + ?Sized> Widget for FieldGrid<'_, R> {
    fn render(&self, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "FieldGrid",
            entries = self.plan.entries.len(),
            rows = self.plan.row_count()
        )
        .entered();

        frame.push(Node::Row {
            gutter: ROW_GUTTER,
            children: self.columns(),
        });
    }
}
