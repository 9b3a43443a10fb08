//! Property-based invariant tests for the grid planner.
//!
//! 1. Visible spans on any row sum to at most 24.
//! 2. Greedy first-fit: a row break happens iff the item does not fit.
//! 3. Collapse cutoff: collapsed plans show no item at index >= show_length.
//! 4. Expanding keeps relative order and shows every non-hidden item.
//! 5. Action cell is right-aligned on its row.
//! 6. Planning is deterministic.
//! 7. Resolved spans always lie in 1..=24.

use formgrid_core::FieldItem;
use formgrid_layout::{
    Breakpoint, BreakpointMap, FormLayout, GridPlanner, LayoutPlan, ResolvedSpan, SpanConfig,
    resolve_span,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn item_strategy() -> impl Strategy<Value = (u8, bool)> {
    (0u8..=6, prop::bool::weighted(0.15))
}

fn items_strategy() -> impl Strategy<Value = Vec<FieldItem>> {
    prop::collection::vec(item_strategy(), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (size, hidden))| {
                FieldItem::new(format!("f{i}"))
                    .with_col_size(size)
                    .with_hidden(hidden)
            })
            .collect()
    })
}

fn span_strategy() -> impl Strategy<Value = ResolvedSpan> {
    (1u8..=24).prop_map(|s| ResolvedSpan::new(s, FormLayout::Horizontal))
}

fn layout_strategy() -> impl Strategy<Value = Option<FormLayout>> {
    prop_oneof![
        Just(None),
        Just(Some(FormLayout::Horizontal)),
        Just(Some(FormLayout::Vertical)),
        Just(Some(FormLayout::Inline)),
    ]
}

fn row_sums(plan: &LayoutPlan) -> Vec<u32> {
    plan.rows()
        .iter()
        .map(|row| row.iter().map(|e| u32::from(e.col_span)).sum())
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Row capacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn row_capacity_never_exceeded(
        items in items_strategy(),
        span in span_strategy(),
        collapsed in any::<bool>(),
        split in any::<bool>(),
    ) {
        let plan = GridPlanner::new(span)
            .collapsed(collapsed)
            .split(split)
            .action(true)
            .plan(1024, &items)
            .expect("measured width");
        for (row, sum) in row_sums(&plan).iter().enumerate() {
            prop_assert!(*sum <= 24, "row {} sums to {}", row, sum);
        }
        for entry in &plan.entries {
            prop_assert!(entry.col_span <= 24);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Greedy first-fit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn greedy_first_fit(items in items_strategy(), span in span_strategy()) {
        let plan = GridPlanner::new(span).plan(1024, &items).expect("measured width");
        let mut used: u32 = 0;
        let mut row: usize = 0;
        for entry in plan.visible() {
            let fits = used + u32::from(entry.col_span) <= 24;
            prop_assert_eq!(entry.row_break_before, !fits, "entry {}", entry.index);
            if !fits {
                row += 1;
                used = 0;
            }
            prop_assert_eq!(entry.row, Some(row), "entry {}", entry.index);
            used += u32::from(entry.col_span);
            if used == 24 {
                // An exactly full row closes without padding.
                row += 1;
                used = 0;
            }
        }
        // Order is preserved and every input item has exactly one entry.
        let indices: Vec<usize> = plan.entries.iter().map(|e| e.index).collect();
        let expected: Vec<usize> = (0..items.len()).collect();
        prop_assert_eq!(indices, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Collapse cutoff and expansion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn collapse_cutoff(items in items_strategy(), span in span_strategy(), k in 1u16..10) {
        let collapsed = GridPlanner::new(span)
            .collapsed(true)
            .show_length(Some(k))
            .plan(1024, &items)
            .expect("measured width");
        for entry in collapsed.visible() {
            prop_assert!(entry.index < usize::from(k));
        }

        let expanded = GridPlanner::new(span)
            .show_length(Some(k))
            .plan(1024, &items)
            .expect("measured width");
        let shown: Vec<usize> = expanded.visible().map(|e| e.index).collect();
        let not_hidden: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, it)| !it.hidden)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(&shown, &not_hidden);

        // Collapsed visible set is a prefix of the expanded one.
        let collapsed_shown: Vec<usize> = collapsed.visible().map(|e| e.index).collect();
        prop_assert!(shown.starts_with(&collapsed_shown));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Right alignment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn action_cell_right_aligned(
        items in items_strategy(),
        span in span_strategy(),
        collapsed in any::<bool>(),
    ) {
        let plan = GridPlanner::new(span)
            .collapsed(collapsed)
            .action(true)
            .plan(1024, &items)
            .expect("measured width");
        let cell = plan.action_cell.expect("action requested");
        prop_assert_eq!(
            u32::from(cell.offset) + u32::from(cell.span) + plan.row_total % 24,
            24
        );
        prop_assert!(cell.row + 1 >= plan.rows().len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn planning_is_deterministic(
        items in items_strategy(),
        span in span_strategy(),
        collapsed in any::<bool>(),
        split in any::<bool>(),
    ) {
        let planner = GridPlanner::new(span).collapsed(collapsed).split(split).action(true);
        prop_assert_eq!(planner.plan(900, &items), planner.plan(900, &items));
    }

    #[test]
    fn resolution_is_deterministic_and_bounded(
        layout in layout_strategy(),
        width in 0u32..4000,
        fixed in prop::option::of(0u8..40),
        md in prop::option::of(0u8..30),
    ) {
        let explicit = match (fixed, md) {
            (Some(n), _) => Some(SpanConfig::Fixed(n)),
            (None, Some(v)) => Some(SpanConfig::Breakpoints(
                BreakpointMap::new().with(Breakpoint::Md, v),
            )),
            (None, None) => None,
        };
        let a = resolve_span(layout, width, explicit.as_ref());
        let b = resolve_span(layout, width, explicit.as_ref());
        prop_assert_eq!(a, b);
        prop_assert!((1..=24).contains(&a.span));
    }
}
