//! Content records as seen by the ordering service.
//!
//! The host owns these. The service only reads ids, titles and status to
//! validate reorders and to build ordered listings.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "publish".to_string()
}

impl ContentItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: default_status(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// Read-path filter handed to the content store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentFilter {
    /// Exact status match (e.g. `"publish"`, `"draft"`).
    pub status: Option<String>,
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
}

impl ContentFilter {
    pub fn matches(&self, item: &ContentItem) -> bool {
        if let Some(status) = &self.status
            && &item.status != status
        {
            return false;
        }
        match &self.search {
            Some(needle) => item
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
