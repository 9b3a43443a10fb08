#![forbid(unsafe_code)]

//! Horizontal divider between completed rows.
//!
//! In a node tree a divider is just [`Node::Divider`](crate::Node::Divider);
//! [`Divider::to_line`] draws it as text for previews.

/// A horizontal rule.
///
/// # Examples
///
/// ```
/// use formgrid_widgets::Divider;
///
/// assert_eq!(Divider::new().dashed(true).to_line(4), "╌╌╌╌");
/// assert_eq!(Divider::new().to_line(3), "───");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Divider {
    dashed: bool,
}

impl Divider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashed line style (used between form rows).
    #[must_use]
    pub fn dashed(mut self, dashed: bool) -> Self {
        self.dashed = dashed;
        self
    }

    #[must_use]
    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// Draw the divider `width` cells wide.
    #[must_use]
    pub fn to_line(&self, width: usize) -> String {
        let rule = if self.dashed { '╌' } else { '─' };
        std::iter::repeat_n(rule, width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_and_dashed_fill_width() {
        assert_eq!(Divider::new().to_line(5), "─────");
        assert_eq!(Divider::new().dashed(true).to_line(3), "╌╌╌");
    }

    #[test]
    fn zero_width_is_empty() {
        assert_eq!(Divider::new().dashed(true).to_line(0), "");
    }

    #[test]
    fn dashed_flag_round_trips() {
        assert!(!Divider::new().is_dashed());
        assert!(Divider::new().dashed(true).is_dashed());
    }
}
