use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{AnimapperError, AnimapperResult};

/// How resource acquisition is scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Graphic and data are fetched inside `Page::attach`.
    Blocking,
    /// Each fetch runs on its own page queue turn.
    #[default]
    NonBlocking,
}

/// When interactive elements receive `tabindex="0"` and `role="button"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPolicy {
    /// Every interactive element.
    #[default]
    Always,
    /// Only elements that resolved a data record.
    WithRecord,
}

/// Which part of the page document classification scans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanScope {
    /// Descendants of the widget's mount point.
    #[default]
    Mount,
    /// The whole page document. Widgets sharing a page will pick up each other's elements.
    Document,
}

/// Widget configuration. Everything except the two locators has a default.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimapperConfig {
    /// Locator of the graphic resource.
    pub graphic: String,
    /// Locator of the data resource.
    pub data: String,
    #[serde(default)]
    pub fetch_mode: FetchMode,
    #[serde(default)]
    pub focus_policy: FocusPolicy,
    #[serde(default)]
    pub scan_scope: ScanScope,
}

impl AnimapperConfig {
    pub fn new(graphic: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            graphic: graphic.into(),
            data: data.into(),
            fetch_mode: FetchMode::default(),
            focus_policy: FocusPolicy::default(),
            scan_scope: ScanScope::default(),
        }
    }

    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    pub fn with_focus_policy(mut self, policy: FocusPolicy) -> Self {
        self.focus_policy = policy;
        self
    }

    pub fn with_scan_scope(mut self, scope: ScanScope) -> Self {
        self.scan_scope = scope;
        self
    }

    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AnimapperResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| AnimapperError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AnimapperResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AnimapperError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> AnimapperResult<()> {
        if self.graphic.trim().is_empty() {
            return Err(AnimapperError::validation("graphic locator must be non-empty"));
        }
        if self.data.trim().is_empty() {
            return Err(AnimapperError::validation("data locator must be non-empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/config.rs"]
mod tests;
