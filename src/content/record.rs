//! Content Record
//!
//! The typed shape of a content item as stored in the search index. Records
//! are validated here at the boundary; nothing downstream touches raw JSON.

use crate::address::truncate_address;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    Article,
    Tutorial,
    Guide,
    News,
}

impl FromStr for ContentType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "article" => Ok(ContentType::Article),
            "tutorial" => Ok(ContentType::Tutorial),
            "guide" => Ok(ContentType::Guide),
            "news" => Ok(ContentType::News),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentStatus {
    Published,
    Draft,
    Archived,
}

impl FromStr for ContentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "published" => Ok(ContentStatus::Published),
            "draft" => Ok(ContentStatus::Draft),
            "archived" => Ok(ContentStatus::Archived),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Object ID in the index.
    #[serde(alias = "objectID")]
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    pub status: ContentStatus,
    /// Wallet address of the author.
    pub author: String,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds.
    pub updated_at: i64,
}

impl ContentRecord {
    /// Decode a raw index hit into a record. `None` means the hit was
    /// malformed; the caller decides whether to log or drop it.
    pub fn from_hit(hit: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(hit.clone()).ok()
    }

    /// `updated_at` formatted for the dashboard table (DD/MM/YYYY).
    pub fn updated_at_display(&self) -> String {
        format_unix_date(self.updated_at)
    }

    /// How the author column reads for a given viewer: "You" for the
    /// viewer's own records, the abbreviated address otherwise.
    pub fn author_display(&self, identity: Option<&str>) -> String {
        match identity {
            Some(viewer) if viewer.eq_ignore_ascii_case(&self.author) => "You".to_string(),
            _ => truncate_address(&self.author),
        }
    }
}

impl Display for ContentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] ({}) by {}",
            self.title, self.status, self.content_type, self.author
        )
    }
}

fn format_unix_date(seconds: i64) -> String {
    match DateTime::from_timestamp(seconds, 0) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}
