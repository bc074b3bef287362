pub mod cli_consts {
    //! Client Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard
    //! client, organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of events buffered between the controller and the
    /// command loop.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // CONTENT CONFIGURATION
    // =============================================================================

    /// Number of content records requested per index query. The index caps a
    /// single page at 1000 hits; 50 matches the dashboard table size.
    pub const DEFAULT_PAGE_SIZE: u32 = 50;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timeouts shared by the auth and index clients.
    pub mod http {
        use std::time::Duration;

        /// Time limit for establishing a connection (milliseconds).
        pub const CONNECT_TIMEOUT_MS: u64 = 10_000;

        /// Time limit for a whole request (milliseconds).
        pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

        /// Helper function to get the connect timeout
        pub const fn connect_timeout() -> Duration {
            Duration::from_millis(CONNECT_TIMEOUT_MS)
        }

        /// Helper function to get the request timeout
        pub const fn request_timeout() -> Duration {
            Duration::from_millis(REQUEST_TIMEOUT_MS)
        }
    }

    /// Interactive connect flow configuration.
    pub mod connect_flow {
        use std::time::Duration;

        /// Interval between approval polls (milliseconds).
        pub const POLL_INTERVAL_MS: u64 = 2_000;

        /// Maximum number of approval polls before the flow is treated as
        /// cancelled.
        pub const MAX_POLLS: u32 = 90;

        /// Helper function to get the poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_millis(POLL_INTERVAL_MS)
        }
    }
}
