#![forbid(unsafe_code)]

//! Query filter configuration.
//!
//! Every field has a default, so a host only spells out what it changes.
//! With the `json` feature the same struct loads from camelCase JSON:
//!
//! ```json
//! { "span": { "xs": 24, "md": 12, "xxl": 6 }, "split": true, "labelWidth": "auto" }
//! ```

use formgrid_layout::{FormLayout, SpanConfig};

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "json")]
use formgrid_core::FieldNode;

/// Width of the label column beside each control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(try_from = "LabelWidthRepr", into = "LabelWidthRepr"))]
pub enum LabelWidth {
    /// Fixed width in pixels.
    Px(u16),
    /// Sized by the label text.
    Auto,
}

impl Default for LabelWidth {
    fn default() -> Self {
        Self::Px(80)
    }
}

/// JSON shape: a number, `"auto"`, or a numeric string.
#[cfg(feature = "json")]
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum LabelWidthRepr {
    Px(u16),
    Text(String),
}

#[cfg(feature = "json")]
impl TryFrom<LabelWidthRepr> for LabelWidth {
    type Error = String;

    fn try_from(repr: LabelWidthRepr) -> Result<Self, Self::Error> {
        match repr {
            LabelWidthRepr::Px(px) => Ok(Self::Px(px)),
            LabelWidthRepr::Text(text) if text.eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            LabelWidthRepr::Text(text) => text
                .trim()
                .trim_end_matches("px")
                .parse()
                .map(Self::Px)
                .map_err(|_| format!("label width must be a pixel count or \"auto\", got {text:?}")),
        }
    }
}

#[cfg(feature = "json")]
impl From<LabelWidth> for LabelWidthRepr {
    fn from(width: LabelWidth) -> Self {
        match width {
            LabelWidth::Px(px) => Self::Px(px),
            LabelWidth::Auto => Self::Text("auto".to_string()),
        }
    }
}

/// Everything the composition shell reads from its host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "json", serde(default, rename_all = "camelCase"))]
pub struct QueryFilterConfig {
    /// Layout preference. `None` uses the default breakpoint table.
    pub layout: Option<FormLayout>,
    /// Explicit span: a fixed number or a per-breakpoint map.
    pub span: Option<SpanConfig>,
    /// Draw a divider after each completed row.
    pub split: bool,
    /// Items shown while collapsed. Defaults to one row minus the action cell.
    pub default_cols_number: Option<u16>,
    /// Initial collapse state when uncontrolled.
    pub default_collapsed: bool,
    /// The host owns the collapse state and commits it via
    /// [`Event::CollapsedChanged`](formgrid_core::Event::CollapsedChanged).
    pub controlled: bool,
    /// Initial mirrored value in controlled mode.
    pub collapsed: Option<bool>,
    pub label_width: LabelWidth,
    /// Overrides the localized search label.
    pub search_text: Option<String>,
    /// Overrides the localized reset label.
    pub reset_text: Option<String>,
    /// Width to lay out with before the first measurement.
    pub initial_width: Option<u32>,
    /// Render the action cell.
    pub submitter: bool,
    /// Catalog locale. `None` detects it from the environment.
    pub locale: Option<String>,
}

impl Default for QueryFilterConfig {
    fn default() -> Self {
        Self {
            layout: None,
            span: None,
            split: false,
            default_cols_number: None,
            default_collapsed: true,
            controlled: false,
            collapsed: None,
            label_width: LabelWidth::default(),
            search_text: None,
            reset_text: None,
            initial_width: None,
            submitter: true,
            locale: None,
        }
    }
}

impl QueryFilterConfig {
    /// Width assumed by non-interactive hosts that never measure.
    pub const HEADLESS_WIDTH: u32 = 1024;

    /// Defaults, pre-measured at [`HEADLESS_WIDTH`](Self::HEADLESS_WIDTH).
    #[must_use]
    pub fn headless() -> Self {
        Self {
            initial_width: Some(Self::HEADLESS_WIDTH),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn layout(mut self, layout: FormLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn span(mut self, span: SpanConfig) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn split(mut self, split: bool) -> Self {
        self.split = split;
        self
    }

    #[must_use]
    pub fn default_cols_number(mut self, count: u16) -> Self {
        self.default_cols_number = Some(count);
        self
    }

    #[must_use]
    pub fn default_collapsed(mut self, collapsed: bool) -> Self {
        self.default_collapsed = collapsed;
        self
    }

    /// Switch to controlled mode, mirroring `collapsed`.
    #[must_use]
    pub fn controlled(mut self, collapsed: bool) -> Self {
        self.controlled = true;
        self.collapsed = Some(collapsed);
        self
    }

    #[must_use]
    pub fn label_width(mut self, label_width: LabelWidth) -> Self {
        self.label_width = label_width;
        self
    }

    #[must_use]
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn reset_text(mut self, text: impl Into<String>) -> Self {
        self.reset_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn initial_width(mut self, width: u32) -> Self {
        self.initial_width = Some(width);
        self
    }

    #[must_use]
    pub fn submitter(mut self, submitter: bool) -> Self {
        self.submitter = submitter;
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Collapse value to start from, honoring the ownership mode.
    #[must_use]
    pub fn initial_collapsed(&self) -> bool {
        if self.controlled {
            self.collapsed.unwrap_or(self.default_collapsed)
        } else {
            self.default_collapsed
        }
    }
}

#[cfg(feature = "json")]
impl QueryFilterConfig {
    /// Parse camelCase JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text).map_err(|err| match err {
            crate::Error::Config(msg) => crate::Error::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "query filter config loaded");
        Ok(config)
    }
}

/// Parse a JSON field list (`[{"kind": "field", "key": "name"}, ...]`).
#[cfg(feature = "json")]
pub fn field_nodes_from_json(json: &str) -> crate::Result<Vec<FieldNode>> {
    Ok(serde_json::from_str(json)?)
}
