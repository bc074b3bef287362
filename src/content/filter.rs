//! Content filter view model
//!
//! Pure derivation of the visible record set from the full fetched set, a
//! status tab, and a free-text search query. The per-row authorization gate
//! lives here too since the dashboard evaluates both per render.

use crate::content::record::{ContentRecord, ContentStatus};
use std::str::FromStr;

/// Status tabs of the content table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusTab {
    All,
    Published,
    Draft,
    Archived,
}

impl StatusTab {
    /// Parse a free-form tab label. Unrecognized labels get `None`; the
    /// caller treats them as matching nothing.
    pub fn parse(label: &str) -> Option<StatusTab> {
        match label.to_lowercase().as_str() {
            "all" => Some(StatusTab::All),
            "published" => Some(StatusTab::Published),
            "draft" => Some(StatusTab::Draft),
            "archived" => Some(StatusTab::Archived),
            _ => None,
        }
    }

    fn matches(&self, status: ContentStatus) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::Published => status == ContentStatus::Published,
            StatusTab::Draft => status == ContentStatus::Draft,
            StatusTab::Archived => status == ContentStatus::Archived,
        }
    }
}

/// Derive the visible subset of `records` for a tab and search query.
///
/// Fetch order is preserved; there is no implicit sort. The title match is a
/// case-insensitive substring check, and an empty query keeps everything.
pub fn visible(records: &[ContentRecord], tab: StatusTab, query: &str) -> Vec<ContentRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| tab.matches(r.status))
        .filter(|r| needle.is_empty() || r.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Same as [`visible`], driven by a free-form tab label. Labels outside the
/// four known tabs match nothing.
pub fn visible_by_label(records: &[ContentRecord], label: &str, query: &str) -> Vec<ContentRecord> {
    match StatusTab::parse(label) {
        Some(tab) => visible(records, tab, query),
        None => Vec::new(),
    }
}

/// Roles known to the dashboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            _ => Err(()),
        }
    }
}

/// Whether the viewer may edit or delete a record: admins always, everyone
/// else only their own records. Evaluated per row at render time.
pub fn can_modify(record: &ContentRecord, role: Role, identity: Option<&str>) -> bool {
    if role == Role::Admin {
        return true;
    }
    match identity {
        Some(address) => record.author.eq_ignore_ascii_case(address),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::record::ContentType;

    const AUTHOR_A: &str = "0x1234567890123456789012345678901234567890";
    const AUTHOR_B: &str = "0x9876543210987654321098765432109876544321";

    fn record(id: &str, title: &str, status: ContentStatus, author: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: title.to_string(),
            content_type: ContentType::Article,
            content: String::new(),
            image_url: String::new(),
            status,
            author: author.to_string(),
            created_at: 1686787200,
            updated_at: 1686873600,
        }
    }

    fn sample_records() -> Vec<ContentRecord> {
        vec![
            record(
                "1",
                "Getting Started with Web3",
                ContentStatus::Published,
                AUTHOR_A,
            ),
            record("2", "Guide", ContentStatus::Draft, AUTHOR_A),
            record(
                "3",
                "Blockchain Security Best Practices",
                ContentStatus::Published,
                AUTHOR_B,
            ),
            record("4", "NFT Marketplace Overview", ContentStatus::Archived, AUTHOR_A),
        ]
    }

    #[test]
    /// The "all" tab with an empty query is the identity on content and order.
    fn all_tab_empty_query_is_identity() {
        let records = sample_records();
        assert_eq!(visible(&records, StatusTab::All, ""), records);
    }

    #[test]
    /// Filtering an already-filtered set with the same inputs changes nothing.
    fn filtering_is_idempotent() {
        let records = sample_records();
        let once = visible(&records, StatusTab::Published, "b");
        let twice = visible(&once, StatusTab::Published, "b");
        assert_eq!(once, twice);
    }

    #[test]
    /// The published tab keeps only published records, never grows the set.
    fn published_tab_keeps_only_published() {
        let records = sample_records();
        let filtered = visible(&records, StatusTab::Published, "");
        assert!(filtered.len() <= records.len());
        assert!(filtered
            .iter()
            .all(|r| r.status == ContentStatus::Published));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    /// Title search is a case-insensitive substring match.
    fn search_matches_titles_case_insensitively() {
        let records = sample_records();
        let filtered = visible(&records, StatusTab::All, "started");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(visible(&[], StatusTab::All, "").is_empty());
        assert!(visible(&[], StatusTab::Published, "x").is_empty());
    }

    #[test]
    /// Labels outside the four known tabs match nothing.
    fn unknown_tab_label_matches_nothing() {
        let records = sample_records();
        assert!(visible_by_label(&records, "pending", "").is_empty());
        assert_eq!(visible_by_label(&records, "ALL", "").len(), records.len());
    }

    #[test]
    fn admins_modify_everything() {
        let r = record("1", "x", ContentStatus::Published, AUTHOR_B);
        assert!(can_modify(&r, Role::Admin, Some(AUTHOR_A)));
        assert!(can_modify(&r, Role::Admin, None));
    }

    #[test]
    /// Members modify only their own records; address compare ignores case.
    fn members_modify_only_their_own() {
        let r = record("1", "x", ContentStatus::Published, AUTHOR_A);
        assert!(can_modify(&r, Role::Member, Some(AUTHOR_A)));
        assert!(can_modify(
            &r,
            Role::Member,
            Some(&AUTHOR_A.to_uppercase().replace("0X", "0x"))
        ));
        assert!(!can_modify(&r, Role::Member, Some(AUTHOR_B)));
        assert!(!can_modify(&r, Role::Member, None));
    }
}
