#![forbid(unsafe_code)]

//! Greedy first-fit row packing on a 24-unit grid.
//!
//! Items are visited in order and never reordered. Two accumulators run side
//! by side:
//!
//! - `row_total` is padded up to the next multiple of 24 whenever an item does
//!   not fit in what is left of the current row, so `row_total / 24` is the
//!   row index and `row_total % 24` the used part of the last row.
//! - `raw_total` is the plain sum of visible spans. It drives divider
//!   placement and the collapse-toggle decision.
//!
//! # Invariants
//!
//! - Visible spans on one row sum to at most 24.
//! - Hidden items touch neither accumulator.
//! - `action.offset + action.span + row_total % 24 == 24`.

use formgrid_core::LayoutItem;

use crate::{GRID_COLUMNS, ResolvedSpan};

const ROW: u32 = GRID_COLUMNS as u32;

/// Items shown while collapsed when no explicit count is configured.
///
/// One row's worth of fields minus the slot taken by the action cell, but at
/// least one.
#[must_use]
pub fn default_show_length(span: u8) -> u16 {
    let columns = u16::from(GRID_COLUMNS / span.clamp(1, GRID_COLUMNS));
    columns.saturating_sub(1).max(1)
}

/// Placement of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Position in the flattened item list.
    pub index: usize,
    pub key: String,
    pub visible: bool,
    /// Units this item occupies (or would occupy, if hidden).
    pub col_span: u8,
    /// Row index for visible items.
    pub row: Option<usize>,
    /// The item did not fit in the remaining row and starts a new one.
    pub row_break_before: bool,
    /// A divider follows this item.
    pub divider_after: bool,
}

/// The trailing cell holding submit/reset/toggle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCell {
    pub span: u8,
    /// Empty units before the cell, right-aligning it on its row.
    pub offset: u8,
    pub row: usize,
    /// The cell did not fit after the last item and starts its own row.
    pub wrapped: bool,
}

/// Output of [`GridPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub span: ResolvedSpan,
    /// One entry per input item, in input order.
    pub entries: Vec<PlanEntry>,
    pub action_cell: Option<ActionCell>,
    /// Wrapped accumulator after the last item (and action cell padding).
    pub row_total: u32,
    /// Sum of visible spans.
    pub raw_total: u32,
    /// Items shown while collapsed.
    pub show_length: u16,
    /// Whether the expand/collapse control should be offered at all.
    pub need_collapse_toggle: bool,
}

impl LayoutPlan {
    /// Visible entries in order.
    pub fn visible(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.visible)
    }

    /// Number of hidden entries.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.visible).count()
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Visible entries grouped by row.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<&PlanEntry>> {
        let mut rows: Vec<Vec<&PlanEntry>> = Vec::new();
        for entry in self.visible() {
            let Some(row) = entry.row else { continue };
            if rows.len() <= row {
                rows.resize_with(row + 1, Vec::new);
            }
            rows[row].push(entry);
        }
        rows
    }

    /// Rows occupied by items and the action cell.
    #[must_use]
    pub fn row_count(&self) -> usize {
        let item_rows = self.visible().filter_map(|e| e.row).max().map_or(0, |r| r + 1);
        let action_rows = self.action_cell.map_or(0, |cell| cell.row + 1);
        item_rows.max(action_rows)
    }
}

/// Builder for a single layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlanner {
    span: ResolvedSpan,
    collapsed: bool,
    show_length: Option<u16>,
    split: bool,
    action: bool,
}

impl GridPlanner {
    /// Planner for a resolved span. Expanded, no dividers, no action cell.
    pub fn new(span: ResolvedSpan) -> Self {
        Self {
            span,
            collapsed: false,
            show_length: None,
            split: false,
            action: false,
        }
    }

    /// Hide overflow items.
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Override how many items stay visible while collapsed.
    pub fn show_length(mut self, show_length: Option<u16>) -> Self {
        self.show_length = show_length;
        self
    }

    /// Mark a divider after each item that completes a row.
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    /// Reserve a trailing action cell.
    pub fn action(mut self, action: bool) -> Self {
        self.action = action;
        self
    }

    /// Effective collapsed item count.
    #[must_use]
    pub fn effective_show_length(&self) -> u16 {
        self.show_length
            .map_or_else(|| default_show_length(self.span.span), |n| n.max(1))
    }

    /// Lay out `items` for a container `width` pixels wide.
    ///
    /// Returns `None` while the width is unmeasured (zero).
    pub fn plan<T: LayoutItem>(&self, width: u32, items: &[T]) -> Option<LayoutPlan> {
        if width == 0 {
            formgrid_core::trace!("grid plan withheld: width not measured");
            return None;
        }

        let span = self.span.span;
        let show_length = self.effective_show_length();
        let mut row_total: u32 = 0;
        let mut raw_total: u32 = 0;
        let mut last_visible_index: Option<usize> = None;
        let mut entries = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let hidden = item.is_hidden()
                || (self.collapsed && (index >= usize::from(show_length) || row_total >= ROW));
            let col_span = span.saturating_mul(item.col_size()).min(GRID_COLUMNS);
            let key = item.key_at(index);

            if hidden {
                entries.push(PlanEntry {
                    index,
                    key,
                    visible: false,
                    col_span,
                    row: None,
                    row_break_before: false,
                    divider_after: false,
                });
                continue;
            }

            let remaining = ROW - row_total % ROW;
            let row_break_before = remaining < u32::from(col_span);
            if row_break_before {
                row_total += remaining;
            }
            let row = (row_total / ROW) as usize;
            row_total += u32::from(col_span);
            raw_total += u32::from(col_span);
            last_visible_index = Some(index);

            let divider_after = self.split
                && raw_total % ROW == 0
                && last_visible_index.is_some_and(|last| index <= last);

            entries.push(PlanEntry {
                index,
                key,
                visible: true,
                col_span,
                row: Some(row),
                row_break_before,
                divider_after,
            });
        }

        let action_cell = self.action.then(|| {
            let used = row_total % ROW;
            let wrapped = used + u32::from(span) > ROW;
            if wrapped {
                row_total += ROW - used;
            }
            let used = row_total % ROW;
            ActionCell {
                span,
                // `used + span <= 24` holds after wrapping.
                offset: (ROW - u32::from(span) - used) as u8,
                row: (row_total / ROW) as usize,
                wrapped,
            }
        });

        let need_collapse_toggle = items.len() > usize::from(show_length) || raw_total > ROW;

        formgrid_core::debug!(
            items = items.len(),
            span,
            collapsed = self.collapsed,
            row_total,
            raw_total,
            need_collapse_toggle,
            "grid planned"
        );

        Some(LayoutPlan {
            span: self.span,
            entries,
            action_cell,
            row_total,
            raw_total,
            show_length,
            need_collapse_toggle,
        })
    }
}
