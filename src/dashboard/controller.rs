//! Dashboard controller
//!
//! Composes the session store, the content query facade, and the dashboard
//! state. Owns the fetch triggers: entering the content tab with an active
//! session, or the session becoming active while the content tab is
//! selected. Fetch outcomes are applied through a generation check so a
//! stale in-flight fetch can never overwrite a newer one.

use crate::auth::error::AuthError;
use crate::consts::cli_consts::DEFAULT_PAGE_SIZE;
use crate::content::filter::StatusTab;
use crate::content::query::ContentQuery;
use crate::content::record::ContentRecord;
use crate::dashboard::state::{DashboardState, Tab};
use crate::error_classifier::{ErrorClassifier, LogLevel};
use crate::events::{Event, EventSender, EventType, SessionPhase};
use crate::index::error::QueryError;
use crate::session::SessionStore;

pub struct DashboardController {
    session: SessionStore,
    query: ContentQuery,
    state: DashboardState,
    event_sender: EventSender,
    error_classifier: ErrorClassifier,
}

impl DashboardController {
    pub fn new(session: SessionStore, query: ContentQuery, event_sender: EventSender) -> Self {
        Self {
            session,
            query,
            state: DashboardState::new(),
            event_sender,
            error_classifier: ErrorClassifier::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// The working record set filtered by the current view inputs.
    pub fn visible_records(&self) -> Vec<ContentRecord> {
        self.state.visible_records()
    }

    pub fn set_search_query(&mut self, query: String) {
        self.state.view.search_query = query;
    }

    pub fn set_status_filter(&mut self, filter: StatusTab) {
        self.state.view.status_filter = filter;
    }

    /// Restore the wallet session. If it comes back active while the
    /// content tab is selected, fetch the working record set.
    pub async fn initialize(&mut self) {
        self.emit_phase(SessionPhase::Restoring).await;
        self.session.initialize().await;

        if self.session.is_active() {
            self.emit_phase(SessionPhase::Active).await;
            if self.state.view.active_tab == Tab::Content {
                self.refresh_content().await;
            }
        } else {
            self.emit_phase(SessionPhase::Anonymous).await;
        }
    }

    /// Run the interactive login flow. A successful login while the content
    /// tab is selected triggers a fetch.
    pub async fn login(&mut self) -> Result<String, AuthError> {
        match self.session.login().await {
            Ok(address) => {
                self.emit_phase(SessionPhase::Active).await;
                self.emit(Event::session_with_level(
                    format!("Connected as {}", address),
                    EventType::Success,
                    LogLevel::Info,
                ))
                .await;
                if self.state.view.active_tab == Tab::Content {
                    self.refresh_content().await;
                }
                Ok(address)
            }
            Err(e) => {
                let level = self.error_classifier.classify_auth_error(&e);
                self.emit(Event::session_with_level(
                    format!("Login failed: {}", e),
                    EventType::Error,
                    level,
                ))
                .await;
                Err(e)
            }
        }
    }

    /// Disconnect and drop the working record set; a disconnected identity
    /// must not keep stale data on screen.
    pub async fn logout(&mut self) {
        self.session.logout().await;
        self.state.clear_records();
        self.emit_phase(SessionPhase::Anonymous).await;
    }

    /// Switch the active tab. Only entering the content tab with an active
    /// session triggers a fetch; re-selecting the current tab does nothing.
    pub async fn select_tab(&mut self, tab: Tab) {
        let previous = self.state.view.active_tab;
        self.state.view.active_tab = tab;

        if tab == Tab::Content && previous != Tab::Content && self.session.is_active() {
            self.refresh_content().await;
        }
    }

    /// Fetch the working record set. No-op for anonymous sessions.
    pub async fn refresh_content(&mut self) {
        if !self.session.is_active() {
            return;
        }

        let generation = self.state.begin_fetch();
        self.emit(Event::content_fetcher_with_level(
            "Fetching content...".to_string(),
            EventType::Refresh,
            LogLevel::Info,
        ))
        .await;

        let outcome = self.query.fetch_all(DEFAULT_PAGE_SIZE).await;
        self.apply_fetch(generation, outcome).await;
    }

    /// Apply a fetch outcome. Outcomes from a superseded generation are
    /// dropped; failures degrade to an empty working set.
    pub(crate) async fn apply_fetch(
        &mut self,
        generation: u64,
        outcome: Result<Vec<ContentRecord>, QueryError>,
    ) {
        if !self.state.is_current_fetch(generation) {
            log::debug!("Dropping stale fetch result (generation {})", generation);
            return;
        }

        match outcome {
            Ok(records) => {
                let count = records.len();
                self.state.complete_fetch(records);
                self.emit(Event::content_fetcher_with_level(
                    format!("Fetched {} content records", count),
                    EventType::Success,
                    LogLevel::Info,
                ))
                .await;
            }
            Err(e) => {
                let level = self.error_classifier.classify_query_error(&e);
                self.state.clear_records();
                self.emit(Event::content_fetcher_with_level(
                    format!("Failed to fetch content: {}", e),
                    EventType::Error,
                    level,
                ))
                .await;
            }
        }
    }

    /// Record an event in the activity log and forward it to the event loop.
    async fn emit(&mut self, event: Event) {
        self.state.add_to_activity_log(event.clone());
        self.event_sender.send_event(event).await;
    }

    async fn emit_phase(&mut self, phase: SessionPhase) {
        let msg = match phase {
            SessionPhase::Restoring => "Restoring wallet session".to_string(),
            SessionPhase::Active => match self.session.identity_address() {
                Some(address) => format!("Session active for {}", address),
                None => "Session active".to_string(),
            },
            SessionPhase::Anonymous => "No wallet connected".to_string(),
        };
        self.emit(Event::state_change(phase, msg)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockWalletAuth, ProviderHandle};
    use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
    use crate::environment::Environment;
    use crate::index::MockSearchIndex;
    use crate::session::SessionStore;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    const ADDRESS: &str = "0x1234567890123456789012345678901234567890";

    fn hit(id: &str, title: &str, status: &str) -> serde_json::Value {
        json!({
            "objectID": id,
            "title": title,
            "type": "article",
            "content": "",
            "status": status,
            "author": ADDRESS,
            "createdAt": 0,
            "updatedAt": 0
        })
    }

    fn active_auth() -> MockWalletAuth {
        let mut auth = MockWalletAuth::new();
        auth.expect_init_modal()
            .returning(|| Ok(Some(ProviderHandle::new("sess_4f2a".to_string()))));
        auth.expect_resolve_address()
            .returning(|_| Ok(ADDRESS.to_string()));
        auth
    }

    fn anonymous_auth() -> MockWalletAuth {
        let mut auth = MockWalletAuth::new();
        auth.expect_init_modal().returning(|| Ok(None));
        auth
    }

    fn controller(
        auth: MockWalletAuth,
        index: MockSearchIndex,
    ) -> (DashboardController, mpsc::Receiver<Event>) {
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        let session = SessionStore::new(Arc::new(auth));
        let query = ContentQuery::new(Arc::new(index));
        (
            DashboardController::new(session, query, EventSender::new(sender)),
            receiver,
        )
    }

    fn mock_index() -> MockSearchIndex {
        let mut index = MockSearchIndex::new();
        index
            .expect_environment()
            .return_const(Environment::Staging);
        index
    }

    #[tokio::test]
    /// Entering the content tab with an active session fetches once.
    async fn content_tab_with_active_session_fetches() {
        let mut index = mock_index();
        index
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![hit("a", "First", "published")]));

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;

        assert_eq!(controller.state().records().len(), 1);
        assert!(!controller.state().loading());
    }

    #[tokio::test]
    /// An anonymous session never triggers a fetch on tab switch.
    async fn anonymous_session_never_fetches() {
        let mut index = mock_index();
        index.expect_search().never();

        let (mut controller, _events) = controller(anonymous_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;

        assert!(controller.state().records().is_empty());
        assert!(!controller.state().loading());
    }

    #[tokio::test]
    /// Re-selecting the content tab does not re-fetch.
    async fn reselecting_content_tab_does_not_refetch() {
        let mut index = mock_index();
        index
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![hit("a", "First", "published")]));

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;
        controller.select_tab(Tab::Content).await;
    }

    #[tokio::test]
    /// Switching to non-content tabs never fetches.
    async fn other_tabs_do_not_fetch() {
        let mut index = mock_index();
        index.expect_search().never();

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Users).await;
        controller.select_tab(Tab::Settings).await;
        controller.select_tab(Tab::Dashboard).await;
    }

    #[tokio::test]
    /// A session restored on the content tab fetches during initialize.
    async fn initialize_on_content_tab_fetches() {
        let mut index = mock_index();
        index
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![hit("a", "First", "published")]));

        let (mut controller, _events) = controller(active_auth(), index);
        controller.select_tab(Tab::Content).await; // anonymous until initialize
        controller.initialize().await;

        assert_eq!(controller.state().records().len(), 1);
    }

    #[tokio::test]
    /// A login that lands while the content tab is selected fetches.
    async fn login_on_content_tab_fetches() {
        let mut auth = anonymous_auth();
        auth.expect_connect()
            .returning(|| Ok(ProviderHandle::new("sess_4f2a".to_string())));
        auth.expect_resolve_address()
            .returning(|_| Ok(ADDRESS.to_string()));

        let mut index = mock_index();
        index
            .expect_search()
            .times(1)
            .returning(|_, _| Ok(vec![hit("a", "First", "published")]));

        let (mut controller, _events) = controller(auth, index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await; // anonymous, no fetch

        let address = controller.login().await.unwrap();

        assert_eq!(address, ADDRESS);
        assert_eq!(controller.state().records().len(), 1);
    }

    #[tokio::test]
    /// A failed fetch degrades to an empty working set, loading cleared.
    async fn fetch_failure_degrades_to_empty() {
        let mut index = mock_index();
        index.expect_search().returning(|_, _| {
            Err(QueryError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        });

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;

        assert!(controller.state().records().is_empty());
        assert!(!controller.state().loading());
    }

    #[tokio::test]
    /// A stale fetch outcome never overwrites a newer one.
    async fn stale_fetch_outcome_is_dropped() {
        let mut index = mock_index();
        index
            .expect_search()
            .returning(|_, _| Ok(vec![hit("new", "Newer", "published")]));

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;
        assert_eq!(controller.state().records()[0].id, "new");

        // An outcome from a fetch that began before the applied one
        let stale_generation = 0;
        let stale_records =
            vec![ContentRecord::from_hit(&hit("old", "Stale", "published")).unwrap()];
        controller
            .apply_fetch(stale_generation, Ok(stale_records))
            .await;

        assert_eq!(controller.state().records().len(), 1);
        assert_eq!(controller.state().records()[0].id, "new");
    }

    #[tokio::test]
    /// Logout clears the working record set.
    async fn logout_clears_working_set() {
        let mut auth = active_auth();
        auth.expect_disconnect().returning(|| Ok(()));
        let mut index = mock_index();
        index
            .expect_search()
            .returning(|_, _| Ok(vec![hit("a", "First", "published")]));

        let (mut controller, _events) = controller(auth, index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;
        assert_eq!(controller.state().records().len(), 1);

        controller.logout().await;

        assert!(controller.state().records().is_empty());
        assert!(controller.session().identity_address().is_none());
    }

    #[tokio::test]
    /// The visible set respects the status filter and search query.
    async fn visible_records_follow_view_state() {
        let mut index = mock_index();
        index.expect_search().returning(|_, _| {
            Ok(vec![
                hit("1", "Getting Started with Web3", "published"),
                hit("2", "Guide", "draft"),
            ])
        });

        let (mut controller, _events) = controller(active_auth(), index);
        controller.initialize().await;
        controller.select_tab(Tab::Content).await;

        controller.set_search_query("started".to_string());
        let visible = controller.visible_records();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");

        controller.set_search_query(String::new());
        controller.set_status_filter(StatusTab::Draft);
        let visible = controller.visible_records();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");
    }
}
