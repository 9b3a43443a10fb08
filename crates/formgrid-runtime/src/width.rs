//! Container width tracking.
//!
//! Hosts forward raw measurements (CSS pixels, possibly fractional) as they
//! arrive. The tracker turns them into the integer width the layout crate
//! works in and reports only real changes, so a resize storm that lands on
//! the same width costs nothing.
//!
//! # Invariants
//!
//! - **Dedup**: observing the current width again yields [`WidthUpdate::Unchanged`].
//! - **Unmeasured**: zero, negative, and non-finite readings all mean "no width".
//! - **Detach is final**: after [`WidthTracker::detach`] every observation is
//!   [`WidthUpdate::Detached`] and the stored width never moves.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `NaN` / `inf` reading | treated as unmeasured |
//! | reading below 0.5 | rounds to 0, unmeasured |
//! | reading above `u32::MAX` | saturates |
//! | reading after teardown | dropped, logged at trace |

#![forbid(unsafe_code)]

/// Outcome of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthUpdate {
    /// The normalized width moved. `None` means the container is unmeasured.
    Changed {
        from: Option<u32>,
        to: Option<u32>,
    },
    /// Same normalized width as before.
    Unchanged,
    /// The tracker was detached; the reading was dropped.
    Detached,
}

impl WidthUpdate {
    #[must_use]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Round a raw measurement to whole pixels. `None` when unmeasured.
#[must_use]
pub fn normalize_width(raw: f64) -> Option<u32> {
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round();
    if rounded < 1.0 {
        return None;
    }
    if rounded >= f64::from(u32::MAX) {
        return Some(u32::MAX);
    }
    // In range and integral after the checks above.
    Some(rounded as u32)
}

/// Latest container width with change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthTracker {
    width: Option<u32>,
    attached: bool,
    changes: u64,
}

impl Default for WidthTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl WidthTracker {
    /// Unmeasured and attached.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            width: None,
            attached: true,
            changes: 0,
        }
    }

    /// Seed the width before the first measurement. `0` stays unmeasured.
    #[must_use]
    pub const fn with_initial(width: u32) -> Self {
        Self {
            width: if width == 0 { None } else { Some(width) },
            attached: true,
            changes: 0,
        }
    }

    /// Record a raw measurement.
    pub fn observe(&mut self, raw: f64) -> WidthUpdate {
        if !self.attached {
            tracing::trace!(raw, "width observation after detach dropped");
            return WidthUpdate::Detached;
        }
        let next = normalize_width(raw);
        if next == self.width {
            return WidthUpdate::Unchanged;
        }
        let from = self.width;
        self.width = next;
        self.changes += 1;
        tracing::debug!(?from, to = ?next, "container width changed");
        WidthUpdate::Changed { from, to: next }
    }

    /// Current width, `None` while unmeasured.
    #[must_use]
    pub const fn width(&self) -> Option<u32> {
        self.width
    }

    /// Current width with `0` standing in for unmeasured.
    #[must_use]
    pub fn width_or_zero(&self) -> u32 {
        self.width.unwrap_or(0)
    }

    #[must_use]
    pub const fn is_measured(&self) -> bool {
        self.width.is_some()
    }

    /// Stop accepting measurements. Idempotent.
    pub fn detach(&mut self) {
        if self.attached {
            tracing::debug!(width = ?self.width, "width tracker detached");
        }
        self.attached = false;
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Number of accepted changes so far.
    #[must_use]
    pub const fn changes(&self) -> u64 {
        self.changes
    }
}
