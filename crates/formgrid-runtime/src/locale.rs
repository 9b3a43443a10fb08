#![forbid(unsafe_code)]

//! Localized labels for the action cell.
//!
//! Hosts plug in their own translation source by implementing [`Intl`].
//! [`MessageCatalog`] is the bundled implementation with `en-US` and `zh-CN`
//! entries for every key in [`message_keys`].

use std::collections::HashMap;
use std::env;

/// BCP-47-ish locale tag, e.g. `"en-US"`.
pub type Locale = String;

/// Message keys looked up by the action cell.
pub mod message_keys {
    /// Reset button.
    pub const RESET: &str = "tableForm.reset";
    /// Search (submit) button.
    pub const SEARCH: &str = "tableForm.search";
    /// Toggle label while the form is collapsed ("expand it").
    pub const COLLAPSED: &str = "tableForm.collapsed";
    /// Toggle label while the form is expanded ("collapse it").
    pub const EXPAND: &str = "tableForm.expand";
    /// Generic submit label.
    pub const SUBMIT: &str = "tableForm.submit";
}

/// Translation lookup.
pub trait Intl {
    /// The message for `key`, or `default` when the key is unknown.
    fn get_message(&self, key: &str, default: &str) -> String;
}

/// Key/value message table for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: Locale,
    messages: HashMap<String, String>,
}

const EN_US: [(&str, &str); 5] = [
    (message_keys::RESET, "Reset"),
    (message_keys::SEARCH, "Search"),
    (message_keys::COLLAPSED, "Expand"),
    (message_keys::EXPAND, "Collapse"),
    (message_keys::SUBMIT, "Submit"),
];

const ZH_CN: [(&str, &str); 5] = [
    (message_keys::RESET, "重置"),
    (message_keys::SEARCH, "查询"),
    (message_keys::COLLAPSED, "展开"),
    (message_keys::EXPAND, "收起"),
    (message_keys::SUBMIT, "提交"),
];

impl MessageCatalog {
    /// Empty catalog for `locale`. Every lookup falls back to its default.
    #[must_use]
    pub fn new(locale: impl Into<Locale>) -> Self {
        Self {
            locale: normalize_locale(locale.into()),
            messages: HashMap::new(),
        }
    }

    /// Bundled catalog for `locale`. Any `zh*` tag selects `zh-CN`;
    /// everything else gets `en-US`.
    #[must_use]
    pub fn builtin(locale: &str) -> Self {
        let locale = normalize_locale(locale.to_string());
        let table = if locale.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("zh")) {
            &ZH_CN
        } else {
            &EN_US
        };
        let mut catalog = Self::new(locale);
        for (key, value) in table {
            catalog.messages.insert((*key).to_string(), (*value).to_string());
        }
        catalog
    }

    /// Bundled catalog for the detected system locale.
    #[must_use]
    pub fn system() -> Self {
        Self::builtin(&detect_system_locale())
    }

    /// Add or replace one message.
    #[must_use]
    pub fn with_message(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.messages.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Intl for MessageCatalog {
    fn get_message(&self, key: &str, default: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

impl<T: Intl + ?Sized> Intl for &T {
    fn get_message(&self, key: &str, default: &str) -> String {
        (**self).get_message(key, default)
    }
}

/// Detect the system locale from environment variables.
///
/// Preference order: `LC_ALL`, then `LANG`. Falls back to `"en"` when unknown.
#[must_use]
pub fn detect_system_locale() -> Locale {
    let lc_all = env::var("LC_ALL").ok();
    let lang = env::var("LANG").ok();
    detect_system_locale_from(lc_all.as_deref(), lang.as_deref())
}

fn normalize_locale(mut locale: Locale) -> Locale {
    normalize_locale_raw(&locale).unwrap_or_else(|| {
        locale.clear();
        locale.push_str("en");
        locale
    })
}

fn detect_system_locale_from(lc_all: Option<&str>, lang: Option<&str>) -> Locale {
    lc_all
        .and_then(normalize_locale_raw)
        .or_else(|| lang.and_then(normalize_locale_raw))
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_locale_raw(raw: &str) -> Option<Locale> {
    // Strip "@modifier" and ".codeset": "zh_CN.UTF-8@pinyin" -> "zh_CN".
    let raw = raw.trim();
    let raw = raw.split('@').next().unwrap_or(raw);
    let raw = raw.split('.').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("c") || raw.eq_ignore_ascii_case("posix") {
        return Some("en".to_string());
    }
    Some(raw.replace('_', "-"))
}
