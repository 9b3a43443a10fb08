#![forbid(unsafe_code)]

//! The collapse cell.
//!
//! One boolean, one writer path ([`CollapseController::toggle`]). Who owns the
//! value is set at construction by [`CollapseMode`]. Switching owners means
//! building a new controller and moving the callback across with
//! [`CollapseController::take_callback`].
//!
//! | Mode           | Value source           | `toggle()`                            |
//! |----------------|------------------------|---------------------------------------|
//! | `Uncontrolled` | local, from default    | flips local value, then notifies      |
//! | `Controlled`   | host, via [`sync`]     | notifies only; host commits via `sync` |
//!
//! [`sync`]: CollapseController::sync

use std::fmt;

/// Change notification. Receives the requested next value.
pub type CollapseCallback = Box<dyn FnMut(bool)>;

/// Who owns the collapsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollapseMode {
    /// The controller owns the value.
    #[default]
    Uncontrolled,
    /// The host owns the value; the controller mirrors it.
    Controlled,
}

/// Controlled or uncontrolled "collapsed" flag.
pub struct CollapseController {
    mode: CollapseMode,
    value: bool,
    on_collapse: Option<CollapseCallback>,
    version: u64,
}

impl fmt::Debug for CollapseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapseController")
            .field("mode", &self.mode)
            .field("value", &self.value)
            .field("has_callback", &self.on_collapse.is_some())
            .field("version", &self.version)
            .finish()
    }
}

impl Default for CollapseController {
    fn default() -> Self {
        Self::uncontrolled(true)
    }
}

impl CollapseController {
    /// Own the value, starting at `default_collapsed`.
    #[must_use]
    pub fn uncontrolled(default_collapsed: bool) -> Self {
        Self {
            mode: CollapseMode::Uncontrolled,
            value: default_collapsed,
            on_collapse: None,
            version: 0,
        }
    }

    /// Mirror a host-owned value.
    #[must_use]
    pub fn controlled(value: bool) -> Self {
        Self {
            mode: CollapseMode::Controlled,
            value,
            on_collapse: None,
            version: 0,
        }
    }

    /// Register the change callback.
    #[must_use]
    pub fn with_callback(mut self, on_collapse: impl FnMut(bool) + 'static) -> Self {
        self.on_collapse = Some(Box::new(on_collapse));
        self
    }

    /// Replace (or clear) the change callback.
    pub fn set_callback(&mut self, on_collapse: Option<CollapseCallback>) {
        self.on_collapse = on_collapse;
    }

    /// Detach the change callback, leaving none registered.
    pub fn take_callback(&mut self) -> Option<CollapseCallback> {
        self.on_collapse.take()
    }

    /// Ownership mode.
    #[must_use]
    pub const fn mode(&self) -> CollapseMode {
        self.mode
    }

    /// Whether the host owns the value.
    #[must_use]
    pub const fn is_controlled(&self) -> bool {
        matches!(self.mode, CollapseMode::Controlled)
    }

    /// The value to render with.
    #[must_use]
    pub const fn collapsed(&self) -> bool {
        self.value
    }

    /// Bumped every time the displayed value changes.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Request the opposite state. Returns the requested value.
    ///
    /// Uncontrolled: the local value flips before the callback runs.
    /// Controlled: only the callback runs; the displayed value changes when
    /// the host calls [`sync`](Self::sync).
    pub fn toggle(&mut self) -> bool {
        let next = !self.value;
        match self.mode {
            CollapseMode::Uncontrolled => {
                self.value = next;
                self.version += 1;
            }
            CollapseMode::Controlled if self.on_collapse.is_none() => {
                tracing::warn!("controlled collapse toggled without an on_collapse handler");
            }
            CollapseMode::Controlled => {}
        }
        tracing::debug!(
            collapsed = next,
            controlled = self.is_controlled(),
            "collapse toggled"
        );
        if let Some(on_collapse) = self.on_collapse.as_mut() {
            on_collapse(next);
        }
        next
    }

    /// Adopt the host's committed value. Returns whether the value changed.
    ///
    /// Ignored in uncontrolled mode.
    pub fn sync(&mut self, value: bool) -> bool {
        if !self.is_controlled() {
            tracing::trace!(value, "collapse sync ignored: uncontrolled");
            return false;
        }
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(bool) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn default_is_uncontrolled_and_collapsed() {
        let c = CollapseController::default();
        assert_eq!(c.mode(), CollapseMode::Uncontrolled);
        assert!(c.collapsed());
    }

    #[test]
    fn uncontrolled_toggle_flips_and_notifies() {
        let (calls, cb) = recorder();
        let mut c = CollapseController::uncontrolled(true).with_callback(cb);
        assert!(!c.toggle());
        assert!(!c.collapsed());
        assert!(c.toggle());
        assert!(c.collapsed());
        assert_eq!(*calls.borrow(), [false, true]);
        assert_eq!(c.version(), 2);
    }

    #[test]
    fn uncontrolled_without_callback_still_flips() {
        let mut c = CollapseController::uncontrolled(false);
        c.toggle();
        assert!(c.collapsed());
    }

    #[test]
    fn controlled_toggle_only_notifies() {
        let (calls, cb) = recorder();
        let mut c = CollapseController::controlled(true).with_callback(cb);
        assert!(!c.toggle());
        assert!(c.collapsed(), "value waits for the host");
        assert_eq!(*calls.borrow(), [false]);
        assert_eq!(c.version(), 0);

        assert!(c.sync(false));
        assert!(!c.collapsed());
        assert_eq!(c.version(), 1);
    }

    #[test]
    fn controlled_toggle_requests_from_current_mirror() {
        let (calls, cb) = recorder();
        let mut c = CollapseController::controlled(true).with_callback(cb);
        // Host ignores the first request; a second toggle asks again.
        c.toggle();
        c.toggle();
        assert_eq!(*calls.borrow(), [false, false]);
    }

    #[test]
    fn sync_is_noop_when_unchanged_or_uncontrolled() {
        let mut controlled = CollapseController::controlled(true);
        assert!(!controlled.sync(true));
        let mut owned = CollapseController::uncontrolled(true);
        assert!(!owned.sync(false));
        assert!(owned.collapsed());
    }

    #[test]
    fn take_callback_moves_handler_between_modes() {
        let (calls, cb) = recorder();
        let mut owned = CollapseController::uncontrolled(true).with_callback(cb);
        let mut mirrored = CollapseController::controlled(owned.collapsed());
        mirrored.set_callback(owned.take_callback());

        owned.toggle();
        assert!(calls.borrow().is_empty(), "old controller no longer notifies");
        mirrored.toggle();
        assert_eq!(*calls.borrow(), [false]);
        assert!(owned.take_callback().is_none());
    }

    #[test]
    fn set_callback_replaces_handler() {
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        let mut c = CollapseController::uncontrolled(true).with_callback(cb1);
        c.set_callback(Some(Box::new(cb2)));
        c.toggle();
        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), [false]);
    }
}
