#![forbid(unsafe_code)]

//! Breakpoint resolution.
//!
//! A breakpoint table is an ordered list of rows `(max_width, columns,
//! layout)`. The first row whose `max_width` exceeds the width wins; the last
//! builtin row is unbounded so a builtin table always matches.
//!
//! | Table      | < 513 | < 701 | < 785 | < 1057 | < 1062 | < 1352 | else  |
//! |------------|-------|-------|-------|--------|--------|--------|-------|
//! | default    | 1 V   | 2 V   | 3 H   | 3 H    | 3 H    | 3 H    | 4 H   |
//! | vertical   | 1 V   | 2 V   | 2 V   | 3 V    | 4 V    | 4 V    | 4 V   |
//!
//! Widths passed to [`resolve_span`] already include
//! [`GUTTER_COMPENSATION`](crate::GUTTER_COMPENSATION).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{FormLayout, GRID_COLUMNS};

/// The width at which the resolver switches to inline mode unconditionally.
///
/// It is exactly the gutter compensation, i.e. a container reported as zero
/// pixels wide.
pub const NARROW_SENTINEL_WIDTH: u32 = 16;

/// Span used in inline mode.
pub const INLINE_SPAN: u8 = 8;

/// Named breakpoint keys accepted in a [`BreakpointMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    /// All breakpoints in ascending order.
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Exclusive upper width bound. `None` is unbounded.
    #[must_use]
    pub const fn max_width(self) -> Option<u32> {
        match self {
            Breakpoint::Xs | Breakpoint::Sm => Some(513),
            Breakpoint::Md => Some(785),
            Breakpoint::Lg | Breakpoint::Xl => Some(1057),
            Breakpoint::Xxl => None,
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "xxl",
        }
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-breakpoint span values.
///
/// Keys that are not breakpoint names are ignored when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreakpointMap {
    pub xs: Option<u8>,
    pub sm: Option<u8>,
    pub md: Option<u8>,
    pub lg: Option<u8>,
    pub xl: Option<u8>,
    pub xxl: Option<u8>,
}

impl BreakpointMap {
    /// Empty map.
    pub const fn new() -> Self {
        Self {
            xs: None,
            sm: None,
            md: None,
            lg: None,
            xl: None,
            xxl: None,
        }
    }

    /// Set the span for one breakpoint.
    #[must_use]
    pub fn with(mut self, bp: Breakpoint, span: u8) -> Self {
        *self.slot(bp) = Some(span);
        self
    }

    /// Span configured for a breakpoint.
    #[must_use]
    pub const fn get(&self, bp: Breakpoint) -> Option<u8> {
        match bp {
            Breakpoint::Xs => self.xs,
            Breakpoint::Sm => self.sm,
            Breakpoint::Md => self.md,
            Breakpoint::Lg => self.lg,
            Breakpoint::Xl => self.xl,
            Breakpoint::Xxl => self.xxl,
        }
    }

    fn slot(&mut self, bp: Breakpoint) -> &mut Option<u8> {
        match bp {
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Xl => &mut self.xl,
            Breakpoint::Xxl => &mut self.xxl,
        }
    }

    /// Convert to a breakpoint table in ascending key order.
    ///
    /// Zero spans are skipped, spans above 24 are clamped. All rows are
    /// horizontal.
    #[must_use]
    pub fn to_table(&self) -> Vec<BreakpointRow> {
        Breakpoint::ALL
            .iter()
            .filter_map(|&bp| {
                let span = self.get(bp).filter(|&s| s > 0)?.min(GRID_COLUMNS);
                Some(BreakpointRow::new(
                    bp.max_width(),
                    GRID_COLUMNS / span,
                    FormLayout::Horizontal,
                ))
            })
            .collect()
    }
}

/// Explicit span configuration supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SpanConfig {
    /// Same span at every width.
    Fixed(u8),
    /// Span per named breakpoint.
    Breakpoints(BreakpointMap),
}

/// One row of a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointRow {
    /// Exclusive upper width bound. `None` is unbounded.
    pub max_width: Option<u32>,
    /// Fields per row.
    pub columns: u8,
    pub layout: FormLayout,
}

impl BreakpointRow {
    /// Create a row.
    pub const fn new(max_width: Option<u32>, columns: u8, layout: FormLayout) -> Self {
        Self {
            max_width,
            columns,
            layout,
        }
    }

    /// Whether `width` falls below this row's bound.
    #[inline]
    pub const fn matches(&self, width: u32) -> bool {
        match self.max_width {
            Some(max) => width < max,
            None => true,
        }
    }

    /// The span this row resolves to.
    #[must_use]
    pub const fn resolve(&self) -> ResolvedSpan {
        let columns = if self.columns == 0 { 1 } else { self.columns };
        ResolvedSpan {
            span: GRID_COLUMNS / columns,
            layout: self.layout,
        }
    }
}

/// Builtin table used when the preferred layout is vertical.
pub const VERTICAL_BREAKPOINTS: [BreakpointRow; 4] = [
    BreakpointRow::new(Some(513), 1, FormLayout::Vertical),
    BreakpointRow::new(Some(785), 2, FormLayout::Vertical),
    BreakpointRow::new(Some(1057), 3, FormLayout::Vertical),
    BreakpointRow::new(None, 4, FormLayout::Vertical),
];

/// Builtin table for every other preference.
pub const DEFAULT_BREAKPOINTS: [BreakpointRow; 5] = [
    BreakpointRow::new(Some(513), 1, FormLayout::Vertical),
    BreakpointRow::new(Some(701), 2, FormLayout::Vertical),
    BreakpointRow::new(Some(1062), 3, FormLayout::Horizontal),
    BreakpointRow::new(Some(1352), 3, FormLayout::Horizontal),
    BreakpointRow::new(None, 4, FormLayout::Horizontal),
];

/// The builtin table for a layout preference.
#[must_use]
pub fn builtin_table(preference: Option<FormLayout>) -> &'static [BreakpointRow] {
    match preference {
        Some(FormLayout::Vertical) => &VERTICAL_BREAKPOINTS,
        _ => &DEFAULT_BREAKPOINTS,
    }
}

/// Column span and form layout for the current width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedSpan {
    /// Units per field, in `1..=24`.
    pub span: u8,
    pub layout: FormLayout,
}

impl ResolvedSpan {
    /// Create a resolved span, clamping into `1..=24`.
    pub const fn new(span: u8, layout: FormLayout) -> Self {
        let span = if span == 0 {
            1
        } else if span > GRID_COLUMNS {
            GRID_COLUMNS
        } else {
            span
        };
        Self { span, layout }
    }

    /// Fields that fit on one row at this span.
    #[must_use]
    pub const fn columns(&self) -> u8 {
        GRID_COLUMNS / self.span
    }
}

/// Resolve the span and layout for `width`.
///
/// `width` must already include the gutter compensation. Rules, first match
/// wins:
///
/// 1. `width == 16` resolves to span 8, inline.
/// 2. A fixed span is used as-is with the preferred layout (horizontal when
///    unspecified).
/// 3. A breakpoint map, then the builtin table for the preference, is
///    searched for the first row bounding `width`.
pub fn resolve_span(
    preference: Option<FormLayout>,
    width: u32,
    explicit: Option<&SpanConfig>,
) -> ResolvedSpan {
    if width == NARROW_SENTINEL_WIDTH {
        return ResolvedSpan::new(INLINE_SPAN, FormLayout::Inline);
    }

    match explicit {
        // A zero span counts as "not configured".
        Some(SpanConfig::Fixed(span)) if *span > 0 => {
            return ResolvedSpan::new(*span, preference.unwrap_or_default());
        }
        Some(SpanConfig::Breakpoints(map)) => {
            let table = map.to_table();
            if let Some(row) = select(&table, width) {
                return row.resolve();
            }
            formgrid_core::debug!(
                width,
                rows = table.len(),
                "breakpoint map has no row for width, using builtin table"
            );
        }
        _ => {}
    }

    let table = builtin_table(preference);
    select(table, width)
        .unwrap_or(&DEFAULT_BREAKPOINTS[DEFAULT_BREAKPOINTS.len() - 1])
        .resolve()
}

fn select(table: &[BreakpointRow], width: u32) -> Option<&BreakpointRow> {
    table.iter().find(|row| row.matches(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_sentinel_wins_over_everything() {
        let fixed = SpanConfig::Fixed(6);
        for explicit in [None, Some(&fixed)] {
            for pref in [None, Some(FormLayout::Vertical), Some(FormLayout::Horizontal)] {
                assert_eq!(
                    resolve_span(pref, 16, explicit),
                    ResolvedSpan::new(8, FormLayout::Inline)
                );
            }
        }
    }

    #[test]
    fn fixed_span_ignores_width() {
        let fixed = SpanConfig::Fixed(6);
        for width in [17, 400, 5000] {
            let r = resolve_span(Some(FormLayout::Vertical), width, Some(&fixed));
            assert_eq!(r, ResolvedSpan::new(6, FormLayout::Vertical));
        }
        let r = resolve_span(None, 400, Some(&fixed));
        assert_eq!(r.layout, FormLayout::Horizontal);
    }

    #[test]
    fn fixed_span_is_clamped() {
        let r = resolve_span(None, 400, Some(&SpanConfig::Fixed(40)));
        assert_eq!(r.span, 24);
    }

    #[test]
    fn zero_fixed_span_uses_builtin_table() {
        let r = resolve_span(None, 750, Some(&SpanConfig::Fixed(0)));
        assert_eq!(r, ResolvedSpan::new(8, FormLayout::Horizontal));
    }

    #[test]
    fn default_table_boundaries() {
        assert_eq!(resolve_span(None, 512, None).span, 24);
        assert_eq!(resolve_span(None, 513, None).span, 12);
        assert_eq!(resolve_span(None, 700, None).layout, FormLayout::Vertical);
        assert_eq!(resolve_span(None, 701, None).layout, FormLayout::Horizontal);
        assert_eq!(resolve_span(None, 1351, None).span, 8);
        assert_eq!(resolve_span(None, 1352, None).span, 6);
    }

    #[test]
    fn horizontal_preference_uses_default_table() {
        assert_eq!(
            resolve_span(Some(FormLayout::Horizontal), 600, None),
            resolve_span(None, 600, None)
        );
    }

    #[test]
    fn vertical_table() {
        let v = Some(FormLayout::Vertical);
        assert_eq!(resolve_span(v, 500, None), ResolvedSpan::new(24, FormLayout::Vertical));
        assert_eq!(resolve_span(v, 700, None), ResolvedSpan::new(12, FormLayout::Vertical));
        assert_eq!(resolve_span(v, 1000, None), ResolvedSpan::new(8, FormLayout::Vertical));
        assert_eq!(resolve_span(v, 2000, None), ResolvedSpan::new(6, FormLayout::Vertical));
    }

    #[test]
    fn breakpoint_map_is_horizontal() {
        let map = BreakpointMap::new()
            .with(Breakpoint::Xs, 24)
            .with(Breakpoint::Md, 12)
            .with(Breakpoint::Xxl, 6);
        let cfg = SpanConfig::Breakpoints(map);
        let v = Some(FormLayout::Vertical);
        assert_eq!(resolve_span(v, 400, Some(&cfg)), ResolvedSpan::new(24, FormLayout::Horizontal));
        assert_eq!(resolve_span(v, 700, Some(&cfg)), ResolvedSpan::new(12, FormLayout::Horizontal));
        assert_eq!(resolve_span(v, 900, Some(&cfg)), ResolvedSpan::new(6, FormLayout::Horizontal));
    }

    #[test]
    fn non_divisor_span_is_normalized_through_columns() {
        // 24 / 7 = 3 columns, 24 / 3 = 8 units.
        let cfg = SpanConfig::Breakpoints(BreakpointMap::new().with(Breakpoint::Xxl, 7));
        assert_eq!(resolve_span(None, 900, Some(&cfg)).span, 8);
    }

    #[test]
    fn exhausted_map_falls_back_to_builtin() {
        let cfg = SpanConfig::Breakpoints(BreakpointMap::new().with(Breakpoint::Md, 12));
        assert_eq!(resolve_span(None, 700, Some(&cfg)).span, 12);
        // Nothing bounds 2000 in the map.
        assert_eq!(resolve_span(None, 2000, Some(&cfg)), ResolvedSpan::new(6, FormLayout::Horizontal));
    }

    #[test]
    fn empty_map_falls_back_to_builtin() {
        let cfg = SpanConfig::Breakpoints(BreakpointMap::new().with(Breakpoint::Lg, 0));
        assert_eq!(resolve_span(None, 400, Some(&cfg)), ResolvedSpan::new(24, FormLayout::Vertical));
    }

    #[test]
    fn resolved_span_clamps() {
        assert_eq!(ResolvedSpan::new(0, FormLayout::Inline).span, 1);
        assert_eq!(ResolvedSpan::new(99, FormLayout::Inline).span, 24);
        assert_eq!(ResolvedSpan::new(8, FormLayout::Inline).columns(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn span_config_deserializes_number_or_map() {
        let fixed: SpanConfig = serde_json::from_str("6").expect("number");
        assert_eq!(fixed, SpanConfig::Fixed(6));
        let map: SpanConfig =
            serde_json::from_str(r#"{"xs": 24, "lg": 8, "huge": 3}"#).expect("map");
        assert_eq!(
            map,
            SpanConfig::Breakpoints(
                BreakpointMap::new()
                    .with(Breakpoint::Xs, 24)
                    .with(Breakpoint::Lg, 8)
            )
        );
    }
}
