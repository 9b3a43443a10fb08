#![forbid(unsafe_code)]

//! Core: field descriptors, host events, and logging shims.
//!
//! Everything here is plain data. Layout, state, and rendering live in the
//! sibling crates (`formgrid-layout`, `formgrid-runtime`, `formgrid-widgets`).

pub mod event;
pub mod field;
pub mod logging;

pub use event::{ActionIntent, Event};
pub use field::{FieldGroup, FieldItem, FieldNode, FieldWidth, FlatField, LayoutItem, flatten};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
