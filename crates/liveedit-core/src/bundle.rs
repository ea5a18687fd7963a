//! Snippet bundle domain model

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{CoreError, Result};

/// A named markup/style/script triple (a saved project)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetBundle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "html")]
    pub markup: String,
    #[serde(default, alias = "css")]
    pub style: String,
    #[serde(default, alias = "js")]
    pub script: String,
    #[serde(with = "time::serde::rfc3339", alias = "timestamp")]
    pub created_at: OffsetDateTime,
    #[serde(default, alias = "size")]
    pub size_estimate: String,
}

impl SnippetBundle {
    /// Stamp a fresh id, creation time and size estimate onto the given content.
    ///
    /// The name is taken as-is; use [`BundleDraft::into_bundle`] for validated input.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        let markup = markup.into();
        let style = style.into();
        let script = script.into();
        let size_estimate = format_size(markup.len() + style.len() + script.len());

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: description.into(),
            markup,
            style,
            script,
            created_at: OffsetDateTime::now_utc(),
            size_estimate,
        }
    }
}

/// An unsaved bundle as submitted by the editor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "html")]
    pub markup: String,
    #[serde(default, alias = "css")]
    pub style: String,
    #[serde(default, alias = "js")]
    pub script: String,
}

impl BundleDraft {
    pub fn new(
        name: impl Into<String>,
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            markup: markup.into(),
            style: style.into(),
            script: script.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the draft and turn it into a storable bundle.
    ///
    /// The name is trimmed and must not be empty. Blobs are kept verbatim.
    pub fn into_bundle(self) -> Result<SnippetBundle> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("project name is required".to_string()));
        }

        let description = self.description.unwrap_or_default();
        Ok(SnippetBundle::new(
            name,
            description.trim(),
            self.markup,
            self.style,
            self.script,
        ))
    }
}

/// Read access to the three blobs a preview document is composed from
pub trait SnippetParts {
    fn markup(&self) -> &str;
    fn style(&self) -> &str;
    fn script(&self) -> &str;
}

impl SnippetParts for SnippetBundle {
    fn markup(&self) -> &str {
        &self.markup
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn script(&self) -> &str {
        &self.script
    }
}

impl SnippetParts for BundleDraft {
    fn markup(&self) -> &str {
        &self.markup
    }

    fn style(&self) -> &str {
        &self.style
    }

    fn script(&self) -> &str {
        &self.script
    }
}

/// Human-readable byte count: `"512 B"` below one KiB, otherwise `"1.2 KB"`.
///
/// Tenths of a KiB are rounded half up.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        let tenths = (bytes * 10 + 512) / 1024;
        format!("{}.{} KB", tenths / 10, tenths % 10)
    }
}
