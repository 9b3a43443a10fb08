#![forbid(unsafe_code)]

//! Field descriptors.
//!
//! A host describes its surface as an ordered list of [`FieldNode`]s. Before
//! layout the list is [`flatten`]ed: groups without a title dissolve into their
//! children (one level deep), everything else stays a single layout unit.
//!
//! The layout engine only needs three facts about a unit (its key, its column
//! multiplier and whether it is force-hidden), which is what [`LayoutItem`]
//! exposes.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width hint for the control inside a field, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldWidth {
    /// Short numbers, short text, options.
    Xs,
    /// Names, phone numbers, ids.
    S,
    /// Standard width.
    M,
    /// Long URLs, tag groups, file paths.
    L,
    /// Free text, descriptions, remarks.
    Xl,
}

impl FieldWidth {
    /// Control width in pixels.
    #[must_use]
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Xs => 104,
            Self::S => 216,
            Self::M => 328,
            Self::L => 440,
            Self::Xl => 552,
        }
    }
}

/// A single field: the unit the grid lays out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FieldItem {
    /// Stable identity across renders.
    pub key: Option<String>,
    /// Form value name.
    pub name: Option<String>,
    /// Display label.
    pub label: Option<String>,
    /// Multiplier of the base column span. `0` reads as `1`.
    pub col_size: u8,
    /// Always hidden when set, regardless of collapse state.
    pub hidden: bool,
    /// Control width hint.
    pub width: Option<FieldWidth>,
    /// Render in read mode.
    pub readonly: bool,
}

impl Default for FieldItem {
    fn default() -> Self {
        Self {
            key: None,
            name: None,
            label: None,
            col_size: 1,
            hidden: false,
            width: None,
            readonly: false,
        }
    }
}

impl FieldItem {
    /// Create a field with an explicit key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// Create a keyless field identified by its form name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the form value name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the column multiplier.
    pub fn with_col_size(mut self, col_size: u8) -> Self {
        self.col_size = col_size;
        self
    }

    /// Force the field hidden (or not).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the control width hint.
    pub fn with_width(mut self, width: FieldWidth) -> Self {
        self.width = Some(width);
        self
    }

    /// Render in read mode.
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }
}

/// A group of fields.
///
/// Untitled groups are inlined into the parent sequence by [`flatten`].
/// Titled groups occupy one cell and render their children inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FieldGroup {
    pub key: Option<String>,
    pub title: Option<String>,
    pub children: Vec<FieldItem>,
    pub col_size: u8,
    pub hidden: bool,
}

impl Default for FieldGroup {
    fn default() -> Self {
        Self {
            key: None,
            title: None,
            children: Vec::new(),
            col_size: 1,
            hidden: false,
        }
    }
}

impl FieldGroup {
    /// An untitled group.
    pub fn new(children: Vec<FieldItem>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// A titled group.
    pub fn titled(title: impl Into<String>, children: Vec<FieldItem>) -> Self {
        Self {
            title: Some(title.into()),
            children,
            ..Self::default()
        }
    }

    /// Set an explicit key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the column multiplier.
    pub fn with_col_size(mut self, col_size: u8) -> Self {
        self.col_size = col_size;
        self
    }

    /// Whether the group dissolves into its children during flattening.
    #[must_use]
    pub fn is_unlabeled(&self) -> bool {
        self.title.as_deref().is_none_or(str::is_empty)
    }
}

/// One entry of a host-supplied field list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "camelCase"))]
pub enum FieldNode {
    Field(FieldItem),
    Group(FieldGroup),
}

impl From<FieldItem> for FieldNode {
    fn from(item: FieldItem) -> Self {
        Self::Field(item)
    }
}

impl From<FieldGroup> for FieldNode {
    fn from(group: FieldGroup) -> Self {
        Self::Group(group)
    }
}

/// The three facts the grid needs about a layout unit.
pub trait LayoutItem {
    /// Key for this unit at position `index` of the flattened list.
    ///
    /// Falls back to the form name, then to the index itself.
    fn key_at(&self, index: usize) -> String;

    /// Column multiplier, always at least 1.
    fn col_size(&self) -> u8;

    /// Explicit hidden override.
    fn is_hidden(&self) -> bool;
}

impl LayoutItem for FieldItem {
    fn key_at(&self, index: usize) -> String {
        self.key
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| index.to_string())
    }

    fn col_size(&self) -> u8 {
        self.col_size.max(1)
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl LayoutItem for FieldGroup {
    fn key_at(&self, index: usize) -> String {
        self.key
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| index.to_string())
    }

    fn col_size(&self) -> u8 {
        self.col_size.max(1)
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// A layout unit after flattening, borrowed from the host's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatField<'a> {
    Field(&'a FieldItem),
    /// A titled group, kept whole.
    Group(&'a FieldGroup),
}

impl LayoutItem for FlatField<'_> {
    fn key_at(&self, index: usize) -> String {
        match self {
            Self::Field(item) => item.key_at(index),
            Self::Group(group) => group.key_at(index),
        }
    }

    fn col_size(&self) -> u8 {
        match self {
            Self::Field(item) => LayoutItem::col_size(*item),
            Self::Group(group) => LayoutItem::col_size(*group),
        }
    }

    fn is_hidden(&self) -> bool {
        match self {
            Self::Field(item) => item.is_hidden(),
            Self::Group(group) => group.is_hidden(),
        }
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn key_at(&self, index: usize) -> String {
        (**self).key_at(index)
    }

    fn col_size(&self) -> u8 {
        (**self).col_size()
    }

    fn is_hidden(&self) -> bool {
        (**self).is_hidden()
    }
}

/// Inline untitled groups into the sequence, one level deep.
///
/// Order is preserved. Children of an untitled group take the group's place.
pub fn flatten(nodes: &[FieldNode]) -> Vec<FlatField<'_>> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            FieldNode::Field(item) => out.push(FlatField::Field(item)),
            FieldNode::Group(group) if group.is_unlabeled() => {
                out.extend(group.children.iter().map(FlatField::Field));
            }
            FieldNode::Group(group) => out.push(FlatField::Group(group)),
        }
    }
    out
}
