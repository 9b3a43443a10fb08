#![forbid(unsafe_code)]

//! Responsive grid layout for field surfaces.
//!
//! Two pure pieces:
//!
//! - [`resolve_span`] - maps container width and span configuration to a
//!   per-field column span and a form layout
//! - [`GridPlanner`] - packs an ordered list of fields into rows of
//!   [`GRID_COLUMNS`] units, applies collapse, marks dividers, and anchors
//!   the action cell
//!
//! ```
//! use formgrid_core::FieldItem;
//! use formgrid_layout::{FormLayout, GridPlanner, resolve_span};
//!
//! let span = resolve_span(None, 750, None);
//! assert_eq!(span.span, 8);
//! assert_eq!(span.layout, FormLayout::Horizontal);
//!
//! let items: Vec<_> = (0..4).map(|i| FieldItem::new(format!("f{i}"))).collect();
//! let plan = GridPlanner::new(span)
//!     .collapsed(true)
//!     .action(true)
//!     .plan(734, &items)
//!     .expect("width is measured");
//! assert_eq!(plan.visible().count(), 2);
//! assert!(plan.need_collapse_toggle);
//! ```

pub mod breakpoint;
pub mod grid;

pub use breakpoint::{
    Breakpoint, BreakpointMap, BreakpointRow, DEFAULT_BREAKPOINTS, ResolvedSpan, SpanConfig,
    VERTICAL_BREAKPOINTS, builtin_table, resolve_span,
};
pub use grid::{ActionCell, GridPlanner, LayoutPlan, PlanEntry, default_show_length};

/// Units in one grid row.
pub const GRID_COLUMNS: u8 = 24;

/// Added to the measured container width before breakpoint lookup.
///
/// Two 8px negative row margins.
pub const GUTTER_COMPENSATION: u32 = 16;

/// Orientation of labels relative to their controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormLayout {
    /// Label beside the control.
    #[default]
    Horizontal,
    /// Label above the control.
    Vertical,
    /// Everything on one line.
    Inline,
}

impl FormLayout {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::Inline => "inline",
        }
    }
}

impl std::fmt::Display for FormLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
