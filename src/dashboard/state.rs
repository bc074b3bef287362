//! Dashboard state management
//!
//! Contains the dashboard view state, the working record set, and the
//! fetch-generation bookkeeping that keeps stale fetches from winning.

use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::content::filter::{self, StatusTab};
use crate::content::record::ContentRecord;
use crate::events::Event;
use std::collections::VecDeque;

/// Top-level dashboard tabs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    Dashboard,
    Content,
    Users,
    Settings,
}

impl Tab {
    /// Parse a free-form tab label; unknown labels get `None`.
    pub fn parse(label: &str) -> Option<Tab> {
        match label.to_lowercase().as_str() {
            "dashboard" => Some(Tab::Dashboard),
            "content" => Some(Tab::Content),
            "users" => Some(Tab::Users),
            "settings" => Some(Tab::Settings),
            _ => None,
        }
    }
}

/// View inputs owned by the controller. Ephemeral; reset per invocation.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub active_tab: Tab,
    pub status_filter: StatusTab,
    pub search_query: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Dashboard,
            status_filter: StatusTab::All,
            search_query: String::new(),
        }
    }
}

/// Dashboard state: view inputs, the working record set, and activity logs.
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current view inputs.
    pub view: ViewState,
    /// The working record set: records fetched for display, before
    /// tab/search filtering.
    records: Vec<ContentRecord>,
    /// Whether a fetch is in flight.
    loading: bool,
    /// Generation of the newest fetch. Outcomes carrying an older
    /// generation are stale and must be dropped.
    fetch_generation: u64,
    /// Activity logs for display (most recent last)
    activity_logs: VecDeque<Event>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ContentRecord] {
        &self.records
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn activity_logs(&self) -> &VecDeque<Event> {
        &self.activity_logs
    }

    /// Start a new fetch: bumps the generation, marks loading, and returns
    /// the generation the outcome must present to be applied.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_generation += 1;
        self.loading = true;
        self.fetch_generation
    }

    /// Whether an outcome with this generation is still the newest fetch.
    pub fn is_current_fetch(&self, generation: u64) -> bool {
        generation == self.fetch_generation
    }

    /// Replace the working record set and clear the loading flag.
    pub fn complete_fetch(&mut self, records: Vec<ContentRecord>) {
        self.records = records;
        self.loading = false;
    }

    /// Drop the working record set entirely.
    pub fn clear_records(&mut self) {
        self.records.clear();
        self.loading = false;
    }

    /// The subset of the working record set visible under the current
    /// status filter and search query.
    pub fn visible_records(&self) -> Vec<ContentRecord> {
        filter::visible(
            &self.records,
            self.view.status_filter,
            &self.view.search_query,
        )
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_classifier::LogLevel;
    use crate::events::EventType;

    #[test]
    fn parses_known_tabs() {
        assert_eq!(Tab::parse("content"), Some(Tab::Content));
        assert_eq!(Tab::parse("Dashboard"), Some(Tab::Dashboard));
        assert_eq!(Tab::parse("billing"), None);
    }

    #[test]
    /// Each begin_fetch invalidates the generations before it.
    fn newer_fetch_invalidates_older_generation() {
        let mut state = DashboardState::new();
        let first = state.begin_fetch();
        let second = state.begin_fetch();

        assert!(!state.is_current_fetch(first));
        assert!(state.is_current_fetch(second));
    }

    #[test]
    fn activity_log_is_bounded() {
        let mut state = DashboardState::new();
        for i in 0..(MAX_ACTIVITY_LOGS + 10) {
            state.add_to_activity_log(Event::content_fetcher_with_level(
                format!("event {}", i),
                EventType::Refresh,
                LogLevel::Info,
            ));
        }
        assert_eq!(state.activity_logs().len(), MAX_ACTIVITY_LOGS);
        // Oldest entries were evicted first
        assert_eq!(state.activity_logs()[0].msg, "event 10");
    }
}
