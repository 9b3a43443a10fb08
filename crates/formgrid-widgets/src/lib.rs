#![forbid(unsafe_code)]

//! Rendering for formgrid.
//!
//! Widgets turn a [`LayoutPlan`](formgrid_layout::LayoutPlan) and the action
//! cell state into a [`Node`] tree: a row of grid columns, dividers, and a
//! right-anchored action column. The tree is host-neutral; a UI binding maps
//! it onto real components, and [`preview::TextPreview`] prints it for
//! debugging and snapshot tests.

pub mod actions;
pub mod grid;
pub mod preview;
pub mod rule;

pub use actions::{
    ActionBar, CollapseRender, CollapseRenderFn, OptionRender, OptionRenderFn, ResetCallback,
    SearchConfig, dispatch,
};
pub use grid::{ACTION_KEY, FieldGrid, ROW_GUTTER};
pub use preview::TextPreview;
pub use rule::Divider;

use formgrid_core::{ActionIntent, FieldWidth, FlatField, LayoutItem};
use formgrid_layout::FormLayout;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Host-neutral UI primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A 24-unit grid row.
    Row { gutter: u16, children: Vec<Node> },
    /// A grid column.
    Col {
        key: String,
        span: u8,
        offset: u8,
        /// Mounted but not displayed (keeps host-side field state).
        hidden: bool,
        /// Content is right-aligned inside the column.
        align_end: bool,
        children: Vec<Node>,
    },
    /// A field control slot.
    Field {
        key: String,
        label: Option<String>,
        readonly: bool,
        width: Option<FieldWidth>,
        /// Fixed label column in pixels, `None` for automatic.
        label_width: Option<u16>,
    },
    /// A titled group rendered as one labelled cell.
    Group {
        key: String,
        title: String,
        label_width: Option<u16>,
        children: Vec<Node>,
    },
    Divider(Divider),
    Button {
        label: String,
        intent: ActionIntent,
        primary: bool,
    },
    /// The expand/collapse affordance.
    Toggle { label: String, collapsed: bool },
    Text(String),
    /// Siblings without a wrapper.
    Fragment(Vec<Node>),
}

impl Node {
    /// Every descendant (self included), depth first.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        let children: &[Node] = match self {
            Self::Row { children, .. }
            | Self::Col { children, .. }
            | Self::Group { children, .. }
            | Self::Fragment(children) => children,
            _ => &[],
        };
        for child in children {
            out.extend(child.descendants());
        }
        out
    }

    /// Buttons in document order.
    #[must_use]
    pub fn buttons(&self) -> Vec<ActionIntent> {
        self.descendants()
            .into_iter()
            .filter_map(|n| match n {
                Self::Button { intent, .. } => Some(*intent),
                _ => None,
            })
            .collect()
    }

    /// The toggle node, if present.
    #[must_use]
    pub fn toggle(&self) -> Option<(&str, bool)> {
        self.descendants().into_iter().find_map(|n| match n {
            Self::Toggle { label, collapsed } => Some((label.as_str(), *collapsed)),
            _ => None,
        })
    }
}

/// Render target: an append-only list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    nodes: Vec<Node>,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A `Widget` is a renderable component.
pub trait Widget {
    /// Append this widget's nodes to the frame.
    fn render(&self, frame: &mut Frame);
}

/// A `StatefulWidget` renders from, and may update, external state.
pub trait StatefulWidget {
    type State;

    fn render(&self, frame: &mut Frame, state: &mut Self::State);
}

/// Per-field rendering context handed to a [`FieldRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContext<'a> {
    pub key: &'a str,
    pub layout: FormLayout,
    pub label_width: Option<u16>,
}

/// Produces the node for one field slot. The host's widget library lives
/// behind this trait.
pub trait FieldRenderer {
    fn render_field(&self, field: &FlatField<'_>, ctx: &FieldContext<'_>) -> Node;
}

/// Emits [`Node::Field`] and [`Node::Group`] straight from the descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultFieldRenderer;

impl FieldRenderer for DefaultFieldRenderer {
    fn render_field(&self, field: &FlatField<'_>, ctx: &FieldContext<'_>) -> Node {
        match field {
            FlatField::Field(item) => Node::Field {
                key: ctx.key.to_string(),
                label: item.label.clone(),
                readonly: item.readonly,
                width: item.width,
                label_width: ctx.label_width,
            },
            FlatField::Group(group) => Node::Group {
                key: ctx.key.to_string(),
                title: group.title.clone().unwrap_or_default(),
                label_width: ctx.label_width,
                children: group
                    .children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| {
                        let key = child.key_at(i);
                        let child_ctx = FieldContext { key: &key, ..*ctx };
                        self.render_field(&FlatField::Field(child), &child_ctx)
                    })
                    .collect(),
            },
        }
    }
}

/// Submission and value reset, owned by the host's form state.
pub trait FormHost {
    /// Run validation and submit.
    fn submit(&mut self);
    /// Clear host-managed field values.
    fn reset_fields(&mut self);
}

/// Truncate `content` to `width` display cells and right-pad with spaces.
///
/// Zero-width graphemes are dropped; a wide grapheme that would straddle the
/// edge is not drawn.
pub(crate) fn fit_text(content: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0usize;
    for grapheme in content.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if used + w > width {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', width - used));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgrid_core::{FieldGroup, FieldItem};

    #[test]
    fn fit_text_pads_short_content() {
        assert_eq!(fit_text("AB", 4), "AB  ");
    }

    #[test]
    fn fit_text_clips_long_content() {
        assert_eq!(fit_text("ABCDEF", 3), "ABC");
    }

    #[test]
    fn fit_text_does_not_split_wide_graphemes() {
        // Each CJK glyph is two cells wide.
        assert_eq!(fit_text("重置", 3), "重 ");
        assert_eq!(fit_text("重置", 4), "重置");
    }

    #[test]
    fn fit_text_zero_width() {
        assert_eq!(fit_text("abc", 0), "");
    }

    #[test]
    fn default_renderer_passes_descriptors_through() {
        let item = FieldItem::new("name")
            .with_label("Name")
            .with_readonly(true)
            .with_width(FieldWidth::M);
        let ctx = FieldContext {
            key: "name",
            layout: FormLayout::Horizontal,
            label_width: Some(80),
        };
        let node = DefaultFieldRenderer.render_field(&FlatField::Field(&item), &ctx);
        assert_eq!(
            node,
            Node::Field {
                key: "name".into(),
                label: Some("Name".into()),
                readonly: true,
                width: Some(FieldWidth::M),
                label_width: Some(80),
            }
        );
    }

    #[test]
    fn default_renderer_keeps_titled_group_whole() {
        let group = FieldGroup::titled(
            "Range",
            vec![FieldItem::new("from"), FieldItem::named("to")],
        );
        let ctx = FieldContext {
            key: "Range",
            layout: FormLayout::Vertical,
            label_width: None,
        };
        let node = DefaultFieldRenderer.render_field(&FlatField::Group(&group), &ctx);
        let Node::Group {
            title, children, ..
        } = node
        else {
            panic!("expected group");
        };
        assert_eq!(title, "Range");
        let keys: Vec<_> = children
            .iter()
            .filter_map(|n| match n {
                Node::Field { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(keys, ["from", "to"]);
    }

    #[test]
    fn node_queries_walk_the_tree() {
        let tree = Node::Row {
            gutter: 24,
            children: vec![Node::Col {
                key: "a".into(),
                span: 8,
                offset: 0,
                hidden: false,
                align_end: true,
                children: vec![
                    Node::Button {
                        label: "Reset".into(),
                        intent: ActionIntent::Reset,
                        primary: false,
                    },
                    Node::Toggle {
                        label: "Expand".into(),
                        collapsed: true,
                    },
                ],
            }],
        };
        assert_eq!(tree.descendants().len(), 4);
        assert_eq!(tree.buttons(), [ActionIntent::Reset]);
        assert_eq!(tree.toggle(), Some(("Expand", true)));
    }

    #[test]
    fn frame_collects_nodes() {
        let mut frame = Frame::new();
        assert!(frame.is_empty());
        frame.push(Node::Text("x".into()));
        frame.extend([Node::Text("y".into())]);
        assert_eq!(frame.nodes().len(), 2);
        assert_eq!(frame.into_nodes().len(), 2);
    }
}
