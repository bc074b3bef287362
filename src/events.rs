//! Event System
//!
//! Types and implementations for controller events and logging

use crate::error_classifier::LogLevel;
use crate::logging::should_log_with_env;
use chrono::Local;
use std::fmt::Display;
use tokio::sync::mpsc;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Worker {
    /// The session lifecycle (restore, login, logout).
    Session,
    /// The worker that fetches content records from the search index.
    ContentFetcher,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    StateChange,
}

/// Represents the current phase of the wallet session
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum SessionPhase {
    /// Restoring a prior session
    Restoring,
    /// Connected with a resolved identity
    Active,
    /// No identity present
    Anonymous,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Event {
    pub worker: Worker,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
    /// Optional phase information for state change events
    pub session_phase: Option<SessionPhase>,
}

impl Event {
    fn new(worker: Worker, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            worker,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
            session_phase: None,
        }
    }

    pub fn state_change(phase: SessionPhase, msg: String) -> Self {
        Self {
            worker: Worker::Session,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type: EventType::StateChange,
            log_level: LogLevel::Info,
            session_phase: Some(phase),
        }
    }

    pub fn session_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Worker::Session, msg, event_type, log_level)
    }

    pub fn content_fetcher_with_level(
        msg: String,
        event_type: EventType,
        log_level: LogLevel,
    ) -> Self {
        Self::new(Worker::ContentFetcher, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        // StateChange events are reflected in the dashboard header, not the logs
        if self.event_type == EventType::StateChange {
            return false;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}

/// Common event sending utilities for the controller and session store
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Send a generic event
    pub async fn send_event(&self, event: Event) {
        let _ = self.sender.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Success events are always shown, regardless of threshold.
    fn success_events_always_display() {
        let event = Event::content_fetcher_with_level(
            "Fetched 3 records".to_string(),
            EventType::Success,
            LogLevel::Debug,
        );
        assert!(event.should_display());
    }

    #[test]
    /// State changes drive the header, not the activity log.
    fn state_changes_are_not_displayed() {
        let event = Event::state_change(SessionPhase::Anonymous, "Disconnected".to_string());
        assert!(!event.should_display());
    }
}
