#![forbid(unsafe_code)]

//! formgrid public facade.
//!
//! [`QueryFilter`] is the composition shell: it takes a field list and a
//! [`QueryFilterConfig`], consumes host [`Event`]s, and produces a
//! [`LayoutPlan`] plus a renderable [`Node`] tree. The lower crates are
//! re-exported for hosts that need the individual pieces.
//!
//! # Example
//!
//! ```
//! use formgrid::prelude::*;
//!
//! struct Host;
//! impl FormHost for Host {
//!     fn submit(&mut self) {}
//!     fn reset_fields(&mut self) {}
//! }
//!
//! let fields: Vec<FieldNode> = (0..5)
//!     .map(|i| FieldItem::new(format!("f{i}")).into())
//!     .collect();
//! let mut filter = QueryFilter::new(QueryFilterConfig::default(), fields);
//! assert!(filter.plan().is_none(), "nothing is laid out before the first measurement");
//!
//! filter.handle_event(Event::Resize { width: 1200.0 }, &mut Host);
//! let plan = filter.plan().expect("measured");
//! assert_eq!(plan.visible().count(), 2);
//! ```

use std::fmt;

pub mod config;
pub mod query_filter;

pub use config::{LabelWidth, QueryFilterConfig};
#[cfg(feature = "json")]
pub use config::field_nodes_from_json;
pub use query_filter::QueryFilter;

// --- Core re-exports -------------------------------------------------------

pub use formgrid_core::{
    ActionIntent, Event, FieldGroup, FieldItem, FieldNode, FieldWidth, FlatField, LayoutItem,
    flatten,
};

// --- Layout re-exports -----------------------------------------------------

pub use formgrid_layout::{
    Breakpoint, BreakpointMap, FormLayout, GridPlanner, LayoutPlan, ResolvedSpan, SpanConfig,
    resolve_span,
};

// --- Runtime re-exports ----------------------------------------------------

pub use formgrid_runtime::{CollapseController, CollapseMode, Intl, MessageCatalog};

// --- Widget re-exports -----------------------------------------------------

pub use formgrid_widgets::{
    CollapseRender, FieldRenderer, FormHost, Node, OptionRender, SearchConfig, TextPreview,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for formgrid.
#[derive(Debug)]
pub enum Error {
    /// Reading a configuration file failed.
    Io(std::io::Error),
    /// Configuration could not be parsed.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Standard result type for formgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ActionIntent, CollapseRender, Error, Event, FieldGroup, FieldItem, FieldNode, FormHost,
        FormLayout, LabelWidth, LayoutPlan, Node, OptionRender, QueryFilter, QueryFilterConfig,
        Result, SpanConfig,
    };

    pub use crate::{core, layout, runtime, widgets};
}

pub use formgrid_core as core;
pub use formgrid_layout as layout;
pub use formgrid_runtime as runtime;
pub use formgrid_widgets as widgets;
