#![forbid(unsafe_code)]

//! formgrid runtime
//!
//! The stateful pieces that sit between a host's event stream and the pure
//! layout crate:
//!
//! - [`CollapseController`] - the single "collapsed" cell, controlled or
//!   uncontrolled, with change notification
//! - [`WidthTracker`] - normalizes and de-duplicates container measurements
//!   and ignores them after teardown
//! - [`MessageCatalog`] - localized labels behind the [`Intl`] trait

pub mod collapse;
pub mod locale;
pub mod width;

pub use collapse::{CollapseCallback, CollapseController, CollapseMode};
pub use locale::{Intl, Locale, MessageCatalog, detect_system_locale, message_keys};
pub use width::{WidthTracker, WidthUpdate, normalize_width};
