use crate::auth::error::AuthError;
use crate::index::error::QueryError;
use log::LevelFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_query_error(&self, error: &QueryError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            QueryError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            QueryError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses
            QueryError::Http { status, .. } if *status == 401 => LogLevel::Error,
            QueryError::Http { status, .. } if *status == 403 => LogLevel::Error,
            QueryError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }

    pub fn classify_auth_error(&self, error: &AuthError) -> LogLevel {
        match error {
            // The user backed out of the connect flow; not a fault.
            AuthError::Cancelled => LogLevel::Info,

            // Session restore and disconnect failures degrade gracefully.
            AuthError::Restore(_) => LogLevel::Warn,
            AuthError::Disconnect(_) => LogLevel::Warn,

            // Critical: an established session that cannot name its account
            AuthError::AccountResolution(_) => LogLevel::Error,
            AuthError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> QueryError {
        QueryError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn rate_limiting_is_quiet() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_query_error(&http(429)), LogLevel::Debug);
    }

    #[test]
    fn server_errors_warn() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_query_error(&http(500)), LogLevel::Warn);
        assert_eq!(classifier.classify_query_error(&http(503)), LogLevel::Warn);
    }

    #[test]
    fn auth_failures_are_critical() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_query_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_query_error(&http(403)), LogLevel::Error);
    }

    #[test]
    fn cancelled_login_is_informational() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_auth_error(&AuthError::Cancelled),
            LogLevel::Info
        );
    }
}
